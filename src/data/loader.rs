use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, Table};

/// Text values that mean "no data" in files written by spreadsheet tools
/// and dataframe libraries.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one record per line
/// * `.json`    – `[{ "inputs": 1, "outputs": "2", "labels": "a" }, ...]`
/// * `.parquet` – any schema; columns without a numeric or string reading
///                are formatted value by value as text
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    read_csv(reader)
}

/// Short rows are padded with missing cells; long rows are an error.
fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Table> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let width = headers.len();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.context("The file is not a valid CSV (parse error)")?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            bail!(
                "CSV line {line}: expected {width} fields, saw {}",
                record.len()
            );
        }
        let mut cells: Vec<Cell> = record.iter().map(csv_cell).collect();
        cells.resize(width, Cell::Missing);
        records.push(cells);
    }

    Table::new(headers, records)
}

fn csv_cell(raw: &str) -> Cell {
    if NA_TOKENS.contains(&raw) {
        Cell::Missing
    } else {
        Cell::text(raw)
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "inputs": 1.5, "outputs": 2, "labels": "A" },
///   { "inputs": "x", "outputs": null }
/// ]
/// ```
///
/// Keys absent from a record become missing cells.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(rows.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let records: Vec<Vec<Cell>> = objects
        .into_iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_cell).unwrap_or(Cell::Missing))
                .collect()
        })
        .collect();

    Table::new(columns, records)
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::String(s) => csv_cell(s),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => Cell::number(f),
            None => Cell::text(n.to_string()),
        },
        other => Cell::text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load every column of a Parquet file.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records: Vec<Vec<Cell>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let batch_columns = batch
            .columns()
            .iter()
            .zip(&columns)
            .map(|(col, name)| {
                normalize_column(col).with_context(|| format!("converting column '{name}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            let cells = batch_columns
                .iter()
                .zip(&columns)
                .map(|(col, name)| {
                    arrow_cell(col, row)
                        .with_context(|| format!("Row {row}: failed to read '{name}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            records.push(cells);
        }
    }

    Table::new(columns, records)
}

// -- Parquet / Arrow helpers --

/// Decode dictionary columns and widen decimals to `Float64` so the cell
/// extraction below sees plain values.
fn normalize_column(col: &ArrayRef) -> Result<ArrayRef> {
    match col.data_type() {
        DataType::Dictionary(_, value_type) => {
            let decoded = cast(col, value_type).context("decoding dictionary column")?;
            normalize_column(&decoded)
        }
        DataType::Decimal128(..) | DataType::Decimal256(..) | DataType::Float16 => {
            cast(col, &DataType::Float64).context("casting column to Float64")
        }
        _ => Ok(Arc::clone(col)),
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Result<Cell> {
    if col.is_null(row) {
        return Ok(Cell::Missing);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => csv_cell(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => csv_cell(col.as_string::<i64>().value(row)),
        DataType::Utf8View => csv_cell(col.as_string_view().value(row)),
        DataType::Int8 => Cell::number(col.as_primitive::<Int8Type>().value(row) as f64),
        DataType::Int16 => Cell::number(col.as_primitive::<Int16Type>().value(row) as f64),
        DataType::Int32 => Cell::number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => Cell::number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::UInt8 => Cell::number(col.as_primitive::<UInt8Type>().value(row) as f64),
        DataType::UInt16 => Cell::number(col.as_primitive::<UInt16Type>().value(row) as f64),
        DataType::UInt32 => Cell::number(col.as_primitive::<UInt32Type>().value(row) as f64),
        DataType::UInt64 => Cell::number(col.as_primitive::<UInt64Type>().value(row) as f64),
        DataType::Float32 => Cell::number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::text(col.as_boolean().value(row).to_string()),
        // Dates, timestamps, lists, structs...
        _ => {
            let options = FormatOptions::default();
            let formatter = ArrayFormatter::try_new(col.as_ref(), &options)
                .context("formatting column value")?;
            Cell::text(formatter.value(row).to_string())
        }
    };
    Ok(cell)
}
