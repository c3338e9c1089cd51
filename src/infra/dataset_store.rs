// ============================================================
// Layer 6: Dataset Store
// ============================================================
// Saves and restores prepared splits.
//
// What gets saved per run:
//   1. One JSON Lines file per split (one QaFeatures per line)
//   2. prepare_config.json: the configuration of the run
//
// What the saved config is for:
//   The training side needs to know which tokenizer and window
//   length produced the labels, and the config records whether
//   missing answers were removed.
//
// File naming convention:
//   <output root>/<run name>/
//     train.jsonl
//     validation.jsonl
//     test.jsonl
//     prepare_config.json
//     split_stats.csv
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::dataset::FeatureDataset;
use crate::domain::example::Split;

/// Manages the files of one prepared dataset.
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    /// Create the store, creating its directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn split_path(&self, split: Split) -> PathBuf {
        self.dir.join(format!("{}.jsonl", split.name()))
    }

    /// Write every example of `dataset` to the split file.
    pub fn save_split(&self, split: Split, dataset: &FeatureDataset) -> Result<usize> {
        let path = self.split_path(split);
        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        let mut out = BufWriter::new(file);

        let mut written = 0usize;
        for features in dataset.iter() {
            serde_json::to_writer(&mut out, &features)?;
            out.write_all(b"\n")?;
            written += 1;
        }
        out.flush()
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Saved {} examples to '{}'", written, path.display());
        Ok(written)
    }

    pub fn save_config(&self, cfg: &PrepareConfig) -> Result<()> {
        let path = self.dir.join("prepare_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved preparation config to '{}'", path.display());
        Ok(())
    }
}

// Read-back of a finished run
#[cfg(test)]
impl DatasetStore {
    /// Read a previously saved split back.
    pub fn load_split(&self, split: Split) -> Result<FeatureDataset> {
        use crate::data::dataset::QaFeatures;
        use std::io::{BufRead, BufReader};

        let path = self.split_path(split);
        let file = File::open(&path)
            .with_context(|| format!("Cannot open '{}'. Has 'prepare' been run?", path.display()))?;

        let mut features = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let f: QaFeatures = serde_json::from_str(&line)
                .with_context(|| format!("Bad record on line {} of '{}'", line_no + 1, path.display()))?;
            features.push(f);
        }

        Ok(FeatureDataset::new(features))
    }

    pub fn load_config(&self) -> Result<PrepareConfig> {
        let path = self.dir.join("prepare_config.json");
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::QaFeatures;
    use crate::domain::span::SpanLabel;
    use tempfile::TempDir;

    fn temp_store(tmp: &TempDir) -> DatasetStore {
        DatasetStore::new(tmp.path().join("run")).unwrap()
    }

    #[test]
    fn test_split_round_trip() {
        let tmp   = TempDir::new().unwrap();
        let store = temp_store(&tmp);
        let mut f = QaFeatures::new("a", vec![101, 5, 102], vec![1, 1, 1], SpanLabel::Found { start: 1, end: 1 });
        f.question_lengths = Some(2);
        let ds = FeatureDataset::new(vec![f.clone(), QaFeatures::new("b", vec![0], vec![0], SpanLabel::OutOfWindow)]);

        assert_eq!(store.save_split(Split::Train, &ds).unwrap(), 2);

        let back = store.load_split(Split::Train).unwrap().into_inner();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0], f);
        assert_eq!(back[1].label, SpanLabel::OutOfWindow);
        assert!(store.dir().join("train.jsonl").exists());
    }

    #[test]
    fn test_config_round_trip() {
        let tmp   = TempDir::new().unwrap();
        let store = temp_store(&tmp);
        let cfg   = PrepareConfig::default();
        store.save_config(&cfg).unwrap();
        assert_eq!(store.load_config().unwrap(), cfg);
    }

    #[test]
    fn test_missing_split_is_an_error() {
        let tmp   = TempDir::new().unwrap();
        let store = temp_store(&tmp);
        assert!(store.load_split(Split::Test).is_err());
    }
}
