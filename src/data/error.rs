use thiserror::Error;

/// Failures that stop the pipeline before a report is produced.
///
/// Per-cell problems are never represented here; they end up in the skip
/// report as [`super::classify::FailureReason`]s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("The file must contain header columns named exactly 'inputs' and 'outputs'.")]
    MissingColumns,
    #[error("The file has the required columns but contains no records.")]
    EmptyTable,
    /// A resolved position does not exist on a record. Only possible if the
    /// table was not validated first.
    #[error("Internal error: column position {position} does not exist in row {row_number}")]
    ColumnOutOfRange { row_number: usize, position: usize },
}
