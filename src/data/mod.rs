/// Data layer: table model, loading, validation and classification.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  required columns + row count → ColumnPositions
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  per-record verdicts → ClassificationReport
///   └──────────┘
///        │
///        ▼
///   plot / skip list / export
/// ```

pub mod classify;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod schema;

use classify::ClassificationReport;
use error::PipelineError;
use model::Table;

/// Validate the table and classify every record.
pub fn process(table: &Table) -> Result<ClassificationReport, PipelineError> {
    let positions = schema::validate(table)?;
    classify::classify(table, &positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Cell;

    #[test]
    fn test_schema_errors_produce_no_report() {
        let table = Table::new(vec!["inputs".into(), "outputs".into()], Vec::new()).unwrap();
        assert_eq!(process(&table), Err(PipelineError::EmptyTable));

        let table = Table::new(
            vec!["inputs".into(), "labels".into()],
            vec![vec![Cell::text("1"), Cell::text("a")]],
        )
        .unwrap();
        assert_eq!(process(&table), Err(PipelineError::MissingColumns));
    }

    #[test]
    fn test_process_valid_table() {
        let table = Table::new(
            vec!["inputs".into(), "outputs".into()],
            vec![
                vec![Cell::Number(1.0), Cell::text("2")],
                vec![Cell::Missing, Cell::text("2")],
            ],
        )
        .unwrap();
        let report = process(&table).unwrap();
        assert_eq!(report.accepted, vec![(1.0, 2.0)]);
        assert_eq!(report.skipped[0].reasons, vec!["inputs is empty"]);
    }
}
