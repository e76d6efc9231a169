use std::fmt;

use super::error::PipelineError;
use super::model::{Cell, Table};
use super::schema::{ColumnPositions, INPUTS_COLUMN, OUTPUTS_COLUMN};

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Why a numeric cell was not usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    Empty,
    NonNumeric,
    /// Zero parses fine but is excluded from plotting as a policy choice.
    /// Keep this in mind before reusing the parser for other columns.
    Zero,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Empty => "empty",
            FailureReason::NonNumeric => "non-numeric",
            FailureReason::Zero => "zero",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseOutcome {
    Ok(f64),
    Failed(FailureReason),
}

/// Interpret a cell as a non-zero finite number.
pub fn parse_numeric(cell: &Cell) -> ParseOutcome {
    let value = match cell {
        Cell::Missing => return ParseOutcome::Failed(FailureReason::Empty),
        Cell::Number(n) if n.is_nan() => return ParseOutcome::Failed(FailureReason::Empty),
        Cell::Number(n) => *n,
        Cell::Text(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return ParseOutcome::Failed(FailureReason::Empty);
            }
            match trimmed.parse::<f64>() {
                Ok(n) => n,
                Err(_) => return ParseOutcome::Failed(FailureReason::NonNumeric),
            }
        }
    };

    // f64::from_str also accepts "inf" and "NaN"
    if !value.is_finite() {
        ParseOutcome::Failed(FailureReason::NonNumeric)
    } else if value == 0.0 {
        ParseOutcome::Failed(FailureReason::Zero)
    } else {
        ParseOutcome::Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Record verdicts
// ---------------------------------------------------------------------------

/// A rejected record as shown in the skip report.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Spreadsheet row, counting the header as row 1.
    pub row_number: usize,
    /// Trimmed label, or empty when there is none.
    pub label: String,
    /// `"<column> is <reason>"`, inputs before outputs.
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordVerdict {
    Accepted { x: f64, y: f64 },
    Rejected(SkippedRecord),
}

/// Spreadsheet row number of the data record at zero-based `index`.
pub fn row_number(index: usize) -> usize {
    index + 2
}

fn cell_at(record: &[Cell], position: usize, row_number: usize) -> Result<&Cell, PipelineError> {
    record.get(position).ok_or(PipelineError::ColumnOutOfRange {
        row_number,
        position,
    })
}

/// Decide the fate of one record.
pub fn classify_record(
    index: usize,
    record: &[Cell],
    positions: &ColumnPositions,
) -> Result<RecordVerdict, PipelineError> {
    let row_number = row_number(index);

    let label = match positions.labels {
        Some(position) => match cell_at(record, position, row_number)? {
            Cell::Missing => String::new(),
            cell => cell.to_string().trim().to_string(),
        },
        None => String::new(),
    };

    let inputs = parse_numeric(cell_at(record, positions.inputs, row_number)?);
    let outputs = parse_numeric(cell_at(record, positions.outputs, row_number)?);

    if let (ParseOutcome::Ok(x), ParseOutcome::Ok(y)) = (inputs, outputs) {
        return Ok(RecordVerdict::Accepted { x, y });
    }

    let reasons = [(INPUTS_COLUMN, inputs), (OUTPUTS_COLUMN, outputs)]
        .into_iter()
        .filter_map(|(column, outcome)| match outcome {
            ParseOutcome::Failed(reason) => Some(format!("{column} is {reason}")),
            ParseOutcome::Ok(_) => None,
        })
        .collect();

    Ok(RecordVerdict::Rejected(SkippedRecord {
        row_number,
        label,
        reasons,
    }))
}

// ---------------------------------------------------------------------------
// ClassificationReport
// ---------------------------------------------------------------------------

/// Everything downstream consumers need: plot points, skips and counts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassificationReport {
    /// `(inputs, outputs)` pairs in table order.
    pub accepted: Vec<(f64, f64)>,
    /// Rejected records in table order.
    pub skipped: Vec<SkippedRecord>,
    pub total_records: usize,
}

impl ClassificationReport {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.skipped.len()
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} plotted, {} skipped",
            self.total_records,
            self.accepted_count(),
            self.rejected_count()
        )
    }
}

/// Classify every record of a validated table.
///
/// Row-level problems never fail; only a position that does not exist on a
/// record does, which means `validate` was skipped.
pub fn classify(
    table: &Table,
    positions: &ColumnPositions,
) -> Result<ClassificationReport, PipelineError> {
    let mut report = ClassificationReport {
        total_records: table.len(),
        ..Default::default()
    };

    for (index, record) in table.records().iter().enumerate() {
        match classify_record(index, record, positions)? {
            RecordVerdict::Accepted { x, y } => report.accepted.push((x, y)),
            RecordVerdict::Rejected(skipped) => {
                log::debug!(
                    "Skipping row {}: {}",
                    skipped.row_number,
                    skipped.reasons.join("; ")
                );
                report.skipped.push(skipped);
            }
        }
    }

    Ok(report)
}
