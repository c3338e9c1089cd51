// ============================================================
// Layer 6: Split Statistics Logger
// ============================================================
// Records how many examples survive each pipeline stage, one CSV
// row per split.
//
// Columns:
//   - split:                train / validation / test
//   - reformatted:          examples produced by the corpus
//   - after_error_filter:   examples left once "Error" contexts
//                           (answer not found) are dropped
//   - featurized:           examples tokenized successfully
//   - after_missing_filter: examples kept after removing answers
//                           outside the token window (equal to
//                           `featurized` when that filter is off)
//
// Output file: <output dir>/split_stats.csv
//
// Example CSV output:
//   split,reformatted,after_error_filter,featurized,after_missing_filter
//   train,74160,69821,69821,61377
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

use crate::domain::example::Split;

/// Example counts for one split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitStats {
    pub split:                Split,
    pub reformatted:          usize,
    pub after_error_filter:   usize,
    pub featurized:           usize,
    pub after_missing_filter: usize,
}

impl SplitStats {
    pub fn new(split: Split) -> Self {
        Self {
            split,
            reformatted:          0,
            after_error_filter:   0,
            featurized:           0,
            after_missing_filter: 0,
        }
    }

    /// Examples lost between the corpus and the final split
    pub fn dropped(&self) -> usize {
        self.reformatted.saturating_sub(self.after_missing_filter)
    }
}

/// Writes split statistics to a CSV file.
pub struct StatsLogger {
    csv_path: PathBuf,
}

impl StatsLogger {
    pub fn new(dir: &Path) -> Self {
        Self { csv_path: dir.join("split_stats.csv") }
    }

    /// Write all rows, replacing any previous file.
    pub fn write(&self, stats: &[SplitStats]) -> Result<()> {
        let mut f = File::create(&self.csv_path)
            .with_context(|| format!("Cannot create '{}'", self.csv_path.display()))?;

        writeln!(f, "split,reformatted,after_error_filter,featurized,after_missing_filter")?;
        for s in stats {
            writeln!(
                f,
                "{},{},{},{},{}",
                s.split,
                s.reformatted,
                s.after_error_filter,
                s.featurized,
                s.after_missing_filter,
            )?;

            tracing::info!(
                "{}: {} reformatted, {} after error filter, {} featurized, {} kept ({} dropped)",
                s.split,
                s.reformatted,
                s.after_error_filter,
                s.featurized,
                s.after_missing_filter,
                s.dropped(),
            );
        }

        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
