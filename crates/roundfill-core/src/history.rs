//! Sources of historical trading days to replay.

use std::path::{Path, PathBuf};

use crate::domain::{Direction, HistoricalDay, TradingDate};
use crate::error::{BackfillError, ValidationError};

/// SPY sessions replayed when no history file is given. 2026-02-07 carries
/// the 2026-02-09 session prices.
const BUILTIN_DAYS: [(&str, f64, f64, Direction); 6] = [
    ("2026-02-03", 696.21, 689.53, Direction::Down),
    ("2026-02-04", 690.35, 686.19, Direction::Down),
    ("2026-02-05", 680.94, 677.62, Direction::Down),
    ("2026-02-06", 681.46, 690.62, Direction::Up),
    ("2026-02-07", 689.42, 693.95, Direction::Up),
    ("2026-02-10", 694.95, 692.12, Direction::Down),
];

/// Supplies the ordered list of days a run replays.
pub trait HistorySource {
    fn load(&self) -> Result<Vec<HistoricalDay>, BackfillError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// The curated table compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinHistory;

impl HistorySource for BuiltinHistory {
    fn load(&self) -> Result<Vec<HistoricalDay>, BackfillError> {
        let days = BUILTIN_DAYS
            .iter()
            .map(|(date, open, close, result)| {
                HistoricalDay::new(TradingDate::parse(date)?, *open, *close, *result)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(days)
    }

    fn describe(&self) -> String {
        String::from("builtin")
    }
}

/// A JSON array of `{date, open, close, result}` objects on disk.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySource for JsonFileHistory {
    fn load(&self) -> Result<Vec<HistoricalDay>, BackfillError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|error| BackfillError::History {
                path: self.path.clone(),
                message: error.to_string(),
            })?;

        let days: Vec<HistoricalDay> =
            serde_json::from_str(&content).map_err(|error| BackfillError::History {
                path: self.path.clone(),
                message: error.to_string(),
            })?;

        if days.is_empty() {
            return Err(ValidationError::EmptyHistory.into());
        }

        Ok(days)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_history_is_ordered_and_consistent() {
        let days = BuiltinHistory.load().expect("builtin table is valid");

        assert_eq!(days.len(), 6);
        assert_eq!(days[0].date.to_string(), "2026-02-03");
        assert_eq!(days[5].date.to_string(), "2026-02-10");
        assert!(days.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert!(days.iter().all(HistoricalDay::is_consistent));
    }

    #[test]
    fn json_file_history_loads_records_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                {{"date":"2026-03-02","open":700.0,"close":701.5,"result":"UP"}},
                {{"date":"2026-02-27","open":699.0,"close":698.0,"result":"DOWN"}}
            ]"#
        )
        .expect("write history");

        let source = JsonFileHistory::new(file.path());
        let days = source.load().expect("history should load");

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.to_string(), "2026-03-02");
        assert_eq!(days[1].result, Direction::Down);
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn empty_json_history_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[]").expect("write history");

        let error = JsonFileHistory::new(file.path())
            .load()
            .expect_err("empty history must fail");
        assert!(matches!(
            error,
            BackfillError::Validation(ValidationError::EmptyHistory)
        ));
    }

    #[test]
    fn invalid_record_reports_the_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"date":"2026-02-03","open":696.21,"close":689.53,"result":"SIDEWAYS"}}]"#
        )
        .expect("write history");

        let error = JsonFileHistory::new(file.path())
            .load()
            .expect_err("bad label must fail");
        match error {
            BackfillError::History { path, message } => {
                assert_eq!(path, file.path());
                assert!(message.contains("SIDEWAYS"), "message: {message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_history_error() {
        let error = JsonFileHistory::new("/nonexistent/roundfill/history.json")
            .load()
            .expect_err("missing file must fail");
        assert!(matches!(error, BackfillError::History { .. }));
    }
}
