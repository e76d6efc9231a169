use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::classify::{ClassificationReport, SkippedRecord};

/// One line of the human-readable skip list.
pub fn format_skipped(skipped: &SkippedRecord) -> String {
    let reasons = skipped.reasons.join("; ");
    if skipped.label.is_empty() {
        format!("Record in row {}: {reasons}", skipped.row_number)
    } else {
        format!(
            "Record in row {}, {}: {reasons}",
            skipped.row_number, skipped.label
        )
    }
}

#[derive(Serialize)]
struct SkipRow<'a> {
    row: usize,
    label: &'a str,
    reasons: String,
}

/// Write the skipped records as CSV with a `row,label,reasons` header.
pub fn write_skip_report<W: Write>(report: &ClassificationReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if report.skipped.is_empty() {
        writer
            .write_record(["row", "label", "reasons"])
            .context("writing skip report header")?;
    }
    for skipped in &report.skipped {
        writer
            .serialize(SkipRow {
                row: skipped.row_number,
                label: &skipped.label,
                reasons: skipped.reasons.join("; "),
            })
            .with_context(|| format!("writing skip report row {}", skipped.row_number))?;
    }
    writer.flush().context("flushing skip report")?;
    Ok(())
}

pub fn save_skip_report(report: &ClassificationReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_skip_report(report, file)?;
    log::info!(
        "Wrote {} skipped records to {}",
        report.rejected_count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn report() -> ClassificationReport {
        ClassificationReport {
            accepted: vec![(1.0, 2.0)],
            skipped: vec![
                SkippedRecord {
                    row_number: 3,
                    label: String::new(),
                    reasons: vec!["inputs is zero".into()],
                },
                SkippedRecord {
                    row_number: 4,
                    label: "L1".into(),
                    reasons: vec!["inputs is empty".into(), "outputs is non-numeric".into()],
                },
            ],
            total_records: 3,
        }
    }

    #[test]
    fn test_format_skipped_with_and_without_label() {
        let report = report();
        assert_eq!(
            format_skipped(&report.skipped[0]),
            "Record in row 3: inputs is zero"
        );
        assert_eq!(
            format_skipped(&report.skipped[1]),
            "Record in row 4, L1: inputs is empty; outputs is non-numeric"
        );
    }

    #[test]
    fn test_write_skip_report_csv() {
        let mut out = Vec::new();
        write_skip_report(&report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "row,label,reasons\n3,,inputs is zero\n4,L1,inputs is empty; outputs is non-numeric\n"
        );
    }

    #[test]
    fn test_empty_skip_report_still_has_header() {
        let mut out = Vec::new();
        write_skip_report(&ClassificationReport::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "row,label,reasons\n");
    }

    #[test]
    fn test_save_skip_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skipped.csv");
        save_skip_report(&report(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
