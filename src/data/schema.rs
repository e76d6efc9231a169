use super::error::PipelineError;
use super::model::Table;

pub const INPUTS_COLUMN: &str = "inputs";
pub const OUTPUTS_COLUMN: &str = "outputs";
pub const LABELS_COLUMN: &str = "labels";

/// Where the three known columns live in a validated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPositions {
    pub inputs: usize,
    pub outputs: usize,
    /// `None` when the optional labels column is absent.
    pub labels: Option<usize>,
}

/// Check the table-level rules and resolve column positions.
///
/// Missing required columns are reported before an empty table, so a table
/// with neither the columns nor any rows fails with `MissingColumns`.
pub fn validate(table: &Table) -> Result<ColumnPositions, PipelineError> {
    let (Some(inputs), Some(outputs)) = (
        table.column_position(INPUTS_COLUMN),
        table.column_position(OUTPUTS_COLUMN),
    ) else {
        return Err(PipelineError::MissingColumns);
    };

    if table.is_empty() {
        return Err(PipelineError::EmptyTable);
    }

    let positions = ColumnPositions {
        inputs,
        outputs,
        labels: table.column_position(LABELS_COLUMN),
    };
    log::debug!("Resolved column positions {positions:?}");
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn table(columns: &[&str], rows: usize) -> Table {
        let names = columns.iter().map(|c| c.to_string()).collect();
        let records = (0..rows)
            .map(|_| columns.iter().map(|_| Cell::text("1")).collect())
            .collect();
        Table::new(names, records).unwrap()
    }

    #[test]
    fn test_missing_outputs_names_both_columns() {
        let err = validate(&table(&["inputs", "labels"], 3)).unwrap_err();
        assert_eq!(err, PipelineError::MissingColumns);
        let message = err.to_string();
        assert!(message.contains("'inputs'"));
        assert!(message.contains("'outputs'"));
    }

    #[test]
    fn test_missing_columns_regardless_of_row_count() {
        for rows in [0, 1, 5] {
            assert_eq!(
                validate(&table(&["outputs"], rows)),
                Err(PipelineError::MissingColumns)
            );
            assert_eq!(
                validate(&table(&[], rows)),
                Err(PipelineError::MissingColumns)
            );
        }
    }

    #[test]
    fn test_column_match_is_case_sensitive() {
        assert_eq!(
            validate(&table(&["Inputs", "OUTPUTS"], 2)),
            Err(PipelineError::MissingColumns)
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            validate(&table(&["inputs", "outputs"], 0)),
            Err(PipelineError::EmptyTable)
        );
    }

    #[test]
    fn test_positions_with_and_without_labels() {
        let positions = validate(&table(&["id", "outputs", "inputs"], 1)).unwrap();
        assert_eq!(
            positions,
            ColumnPositions {
                inputs: 2,
                outputs: 1,
                labels: None
            }
        );

        let positions = validate(&table(&["labels", "inputs", "outputs"], 1)).unwrap();
        assert_eq!(positions.labels, Some(0));
    }
}
