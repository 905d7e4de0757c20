// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the training history to a CSV file after each epoch.
//
// Because rows are appended as epochs finish, the file keeps
// everything up to the last completed epoch even when a later
// epoch diverges or the process is killed.
//
// Output file: artifacts/history.csv
//
//   epoch,loss,accuracy,val_loss,val_accuracy
//   1,2.484120,0.417300,1.710530,0.521900
//   2,1.453310,0.596800,1.165270,0.650200
//   ...
//
// How to read the metrics:
//   - loss should decrease each epoch
//   - val_loss rising while loss falls → overfitting
//   - accuracy includes pad positions, so it starts high on
//     corpora with many short sentences
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::history::EpochMetrics;

pub const HISTORY_FILE: &str = "history.csv";

const HEADER: &str = "epoch,loss,accuracy,val_loss,val_accuracy";

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger, starting a fresh CSV with its header.
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let csv_path = dir.join(HISTORY_FILE);

        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{HEADER}")?;
        tracing::debug!("Created history CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot append to '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch,
            m.loss,
            m.accuracy,
            m.val_loss,
            m.val_accuracy,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_appended_after_header() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(tmp.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 2.5, 0.4, 2.25, 0.5)).unwrap();
        logger.log(&EpochMetrics::new(2, 1.5, 0.6, f64::NAN, 0.0)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "1,2.500000,0.400000,2.250000,0.500000");
        assert!(lines[2].starts_with("2,1.500000,0.600000,NaN"));
    }

    #[test]
    fn test_new_run_truncates_old_history() {
        let tmp = tempfile::tempdir().unwrap();
        MetricsLogger::new(tmp.path()).unwrap()
            .log(&EpochMetrics::new(1, 1.0, 0.0, 1.0, 0.0)).unwrap();
        let logger = MetricsLogger::new(tmp.path()).unwrap();
        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
