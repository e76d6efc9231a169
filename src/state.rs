use std::path::{Path, PathBuf};

use crate::data::classify::ClassificationReport;
use crate::data::error::PipelineError;
use crate::data::{export, loader, process};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Plot,
    Details,
}

/// Message shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// File the current report was built from.
    pub source: Option<PathBuf>,

    /// Report for the loaded file (None until a file passes validation).
    pub report: Option<ClassificationReport>,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,

    /// Destination of a requested plot export, waiting for the screenshot.
    pub pending_png: Option<PathBuf>,

    /// Set when the UI should ask the viewport for a screenshot.
    pub screenshot_requested: bool,
}

impl AppState {
    /// Load a file and run it through validation and classification.
    ///
    /// Any failure clears the previous report so a stale plot is never shown
    /// next to a new error.
    pub fn load_path(&mut self, path: &Path) {
        self.report = None;
        self.source = Some(path.to_path_buf());

        let table = match loader::load_file(path) {
            Ok(table) => table,
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(StatusMessage::Error(format!("Error: {e:#}")));
                return;
            }
        };
        log::info!(
            "Loaded {} records with columns {:?} from {}",
            table.len(),
            table.column_names(),
            path.display()
        );

        match process(&table) {
            Ok(report) => self.set_report(report),
            Err(e @ PipelineError::ColumnOutOfRange { .. }) => {
                log::error!("{e}");
                self.status_message = Some(StatusMessage::Error(e.to_string()));
            }
            Err(e) => {
                log::warn!("{} rejected: {e}", path.display());
                self.status_message = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    pub fn set_report(&mut self, report: ClassificationReport) {
        if report.rejected_count() > 0 {
            log::warn!("Classified {report}");
        } else {
            log::info!("Classified {report}");
        }
        self.report = Some(report);
        self.status_message = None;
    }

    /// Queue a plot export; the screenshot arrives in a later frame.
    pub fn request_png_export(&mut self, path: PathBuf) {
        self.active_tab = Tab::Plot;
        self.pending_png = Some(path);
        self.screenshot_requested = true;
    }

    /// Returns true once per request.
    pub fn take_screenshot_request(&mut self) -> bool {
        std::mem::take(&mut self.screenshot_requested)
    }

    pub fn export_skip_report(&mut self, path: &Path) {
        let Some(report) = &self.report else {
            return;
        };
        self.status_message = Some(match export::save_skip_report(report, path) {
            Ok(()) => StatusMessage::Info(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to export skip report: {e:#}");
                StatusMessage::Error(format!("Error: {e:#}"))
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn test_load_valid_file_sets_report() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "ok.csv",
            &["inputs,outputs,labels", "2,4,a", "0,5,b", "x,9,"],
        );

        let mut state = AppState::default();
        state.load_path(&path);

        let report = state.report.as_ref().unwrap();
        assert_eq!(report.total_records, 3);
        assert_eq!(report.accepted, vec![(2.0, 4.0)]);
        assert_eq!(report.skipped[0].label, "b");
        assert_eq!(report.skipped[1].label, "");
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn test_schema_error_is_shown_and_clears_report() {
        let dir = tempdir().unwrap();
        let good = write_csv(dir.path(), "good.csv", &["inputs,outputs", "1,1"]);
        let bad = write_csv(dir.path(), "bad.csv", &["inputs,output", "1,1"]);

        let mut state = AppState::default();
        state.load_path(&good);
        assert!(state.report.is_some());

        state.load_path(&bad);
        assert!(state.report.is_none());
        assert_eq!(
            state.status_message,
            Some(StatusMessage::Error(
                PipelineError::MissingColumns.to_string()
            ))
        );
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "empty.csv", &["inputs,outputs"]);

        let mut state = AppState::default();
        state.load_path(&path);
        assert_eq!(
            state.status_message,
            Some(StatusMessage::Error(PipelineError::EmptyTable.to_string()))
        );
    }

    #[test]
    fn test_unreadable_file_reports_error() {
        let mut state = AppState::default();
        state.load_path(Path::new("does/not/exist.csv"));
        assert!(state.report.is_none());
        assert!(matches!(
            state.status_message,
            Some(StatusMessage::Error(ref m)) if m.starts_with("Error:")
        ));
    }

    #[test]
    fn test_png_request_is_taken_once() {
        let mut state = AppState {
            active_tab: Tab::Details,
            ..Default::default()
        };
        state.request_png_export(PathBuf::from("plot.png"));
        assert_eq!(state.active_tab, Tab::Plot);
        assert!(state.take_screenshot_request());
        assert!(!state.take_screenshot_request());
        assert_eq!(state.pending_png, Some(PathBuf::from("plot.png")));
    }

    #[test]
    fn test_export_skip_report() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "in.csv", &["inputs,outputs", "0,1"]);
        let out = dir.path().join("skipped.csv");

        let mut state = AppState::default();
        state.load_path(&path);
        state.export_skip_report(&out);

        assert!(matches!(state.status_message, Some(StatusMessage::Info(_))));
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("2,,inputs is zero"));
    }
}
