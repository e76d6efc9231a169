use std::fmt;

use anyhow::{bail, Result};

use super::classify::row_number;

// ---------------------------------------------------------------------------
// Cell – a single raw value in the table
// ---------------------------------------------------------------------------

/// A raw cell as it came out of the source file.
///
/// Loaders decide what counts as "no data" and map it to `Missing`, so the
/// classifier only ever has to deal with these three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Build a number cell, treating NaN as missing data.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Cell::Missing
        } else {
            Cell::Number(value)
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the fully loaded input
// ---------------------------------------------------------------------------

/// Column names plus one row of cells per record.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    column_names: Vec<String>,
    records: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, checking that every record has one cell per column.
    ///
    /// Errors name the offending record by its spreadsheet row, header
    /// counted as row 1.
    pub fn new(column_names: Vec<String>, records: Vec<Vec<Cell>>) -> Result<Self> {
        let width = column_names.len();
        if let Some((i, record)) = records
            .iter()
            .enumerate()
            .find(|(_, record)| record.len() != width)
        {
            bail!(
                "Record in row {} has {} cells but the table has {width} columns",
                row_number(i),
                record.len()
            );
        }
        Ok(Table {
            column_names,
            records,
        })
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Position of the first column with exactly this name.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    pub fn records(&self) -> &[Vec<Cell>] {
        &self.records
    }

    /// Number of data records (the header is not a record).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_number_is_missing() {
        assert_eq!(Cell::number(f64::NAN), Cell::Missing);
        assert_eq!(Cell::number(1.5), Cell::Number(1.5));
    }

    #[test]
    fn test_table_rejects_ragged_records() {
        let columns = vec!["inputs".to_string(), "outputs".to_string()];
        let records = vec![
            vec![Cell::text("1"), Cell::text("2")],
            vec![Cell::text("3")],
        ];
        let err = Table::new(columns, records).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Record in row 3 has 1 cells but the table has 2 columns"
        );
    }

    #[test]
    fn test_column_position_is_exact_and_first() {
        let columns = vec![
            "Inputs".to_string(),
            "inputs".to_string(),
            "inputs".to_string(),
        ];
        let table = Table::new(columns, Vec::new()).unwrap();
        assert_eq!(table.column_position("inputs"), Some(1));
        assert_eq!(table.column_position("outputs"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Missing.to_string(), "");
        assert_eq!(Cell::text(" a ").to_string(), " a ");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
    }
}
