// ============================================================
// Layer 2: PrepareUseCase
// ============================================================
// Orchestrates the full preparation pipeline in order:
//
//   Step 1: Load + reformat corpus splits  (Layer 4 - data)
//   Step 2: Hold out a validation split    (Layer 4 - data)
//   Step 3: Reduce the train sample (opt)  (Layer 4 - data)
//   Step 4: Load tokenizer                 (Layer 6 - infra)
//   Step 5: Per split:
//             drop "Error" contexts
//             tokenize + label spans       (Layer 4 - data)
//             drop missing answers (opt)
//   Step 6: Save splits, config, stats     (Layer 6 - infra)
//
// The corpus "train" split becomes train + validation; the corpus
// "validation" split becomes test.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{
    corpus::{open_corpus, CorpusOptions},
    dataset::FeatureDataset,
    featurizer::{Featurizer, FeaturizerOptions},
    splitter::split_holdout,
};
use crate::domain::example::{CorpusKind, QaExample, SourceSplit, Split};
use crate::domain::traits::ExampleSource;
use crate::infra::{
    dataset_store::DatasetStore,
    stats::{SplitStats, StatsLogger},
    tokenizer_store::TokenizerStore,
};

/// Answer length for sequence-to-sequence targets
const SEQ2SEQ_ANSWER_TOKENS: usize = 16;

// ─── Preparation Configuration ───────────────────────────────────────────────
// Everything one preparation run depends on. Passed explicitly
// to every component and saved next to the prepared splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub corpus:                    CorpusKind,
    pub corpus_dir:                String,
    pub tokenizer_path:            String,
    pub model_name:                String,
    pub output_root:               String,
    pub context_cutoff_count:      usize,
    pub context_token_count:       usize,
    pub multi_answer:              bool,
    pub remove_missing_answers:    bool,
    pub reduced_sample:            bool,
    pub only_preprocess_questions: bool,
    pub seq2seq_prefixes:          bool,
    pub seed:                      u64,
    pub validation_fraction:       f64,
    pub reduced_fraction:          f64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            corpus:                    CorpusKind::TriviaQa,
            corpus_dir:                "data/trivia_qa".to_string(),
            tokenizer_path:            "tokenizer.json".to_string(),
            model_name:                "bert-base-uncased".to_string(),
            output_root:               "prepared".to_string(),
            context_cutoff_count:      0,
            context_token_count:       512,
            multi_answer:              false,
            remove_missing_answers:    false,
            reduced_sample:            false,
            only_preprocess_questions: false,
            seq2seq_prefixes:          false,
            seed:                      42,
            validation_fraction:       0.15,
            reduced_fraction:          0.05,
        }
    }
}

impl PrepareConfig {
    /// Directory name encoding the settings that change the labels.
    /// Slashes in hub-style model names ("org/model") become "_".
    pub fn output_dir_name(&self) -> String {
        format!(
            "{}_dataset_{}_{}_{}_{}_{}_{}",
            self.corpus,
            self.model_name.replace('/', "_"),
            self.context_cutoff_count,
            self.context_token_count,
            self.multi_answer,
            self.remove_missing_answers,
            self.reduced_sample,
        )
    }

    pub fn output_dir(&self) -> PathBuf {
        Path::new(&self.output_root).join(self.output_dir_name())
    }

    fn corpus_options(&self) -> CorpusOptions {
        CorpusOptions {
            context_cutoff_count: self.context_cutoff_count,
            multi_answer:         self.multi_answer,
        }
    }

    fn featurizer_options(&self) -> FeaturizerOptions {
        FeaturizerOptions {
            max_length:        self.context_token_count,
            question_lengths:  self.only_preprocess_questions,
            answer_max_length: self.seq2seq_prefixes.then_some(SEQ2SEQ_ANSWER_TOKENS),
        }
    }
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline; returns the directory the splits went to.
    pub fn execute(&self) -> Result<PathBuf> {
        let cfg = &self.config;
        tracing::info!("Preparing {}", cfg.output_dir().display());

        // ── Step 1: Load and reformat ─────────────────────────────────────────
        let source     = open_corpus(cfg.corpus, &cfg.corpus_dir, cfg.corpus_options());
        let corpus_dev = self.load(source.as_ref(), SourceSplit::Validation)?;
        let corpus_trn = self.load(source.as_ref(), SourceSplit::Train)?;
        anyhow::ensure!(
            !corpus_trn.is_empty(),
            "No training examples found in '{}'",
            cfg.corpus_dir
        );
        tracing::info!(
            "Corpus sizes: {} train, {} validation",
            corpus_trn.len(),
            corpus_dev.len()
        );

        // ── Step 2: Hold out validation from the corpus train split ───────────
        let (mut train, validation) = split_holdout(corpus_trn, cfg.validation_fraction, cfg.seed);

        // ── Step 3: Reduced sample ────────────────────────────────────────────
        if cfg.reduced_sample {
            let (_, kept) = split_holdout(train, cfg.reduced_fraction, cfg.seed);
            tracing::info!("Reduced train sample to {} examples", kept.len());
            train = kept;
        }

        // ── Step 4: Tokenizer ─────────────────────────────────────────────────
        let tokenizer  = TokenizerStore::new(&cfg.tokenizer_path).load()?;
        let featurizer = Featurizer::new(&tokenizer, &cfg.featurizer_options())?;

        let store = DatasetStore::new(cfg.output_dir())?;
        store.save_config(cfg)?;

        // ── Steps 5 and 6: Per-split filtering, featurizing, saving ──────────
        let mut all_stats = Vec::with_capacity(Split::ALL.len());
        for (split, examples) in [
            (Split::Train,      train),
            (Split::Validation, validation),
            (Split::Test,       corpus_dev),
        ] {
            let (dataset, stats) = self.prepare_split(split, examples, &featurizer);
            store.save_split(split, &dataset)?;
            all_stats.push(stats);
        }

        let stats_log = StatsLogger::new(store.dir());
        stats_log.write(&all_stats)?;
        tracing::info!("Split statistics written to '{}'", stats_log.csv_path().display());

        tracing::info!("Prepared dataset written to '{}'", store.dir().display());
        Ok(store.dir().to_path_buf())
    }

    fn load(&self, source: &dyn ExampleSource, split: SourceSplit) -> Result<Vec<QaExample>> {
        let examples = source.load_split(split)?;
        if self.config.seq2seq_prefixes {
            return Ok(examples.into_iter().map(QaExample::with_seq2seq_prefixes).collect());
        }
        Ok(examples)
    }

    fn prepare_split(
        &self,
        split:      Split,
        examples:   Vec<QaExample>,
        featurizer: &Featurizer,
    ) -> (FeatureDataset, SplitStats) {
        let mut stats = SplitStats::new(split);
        stats.reformatted = examples.len();

        let examples = drop_error_contexts(examples);
        stats.after_error_filter = examples.len();
        tracing::info!(
            "{}: {} before, {} after dropping unresolved answers",
            split,
            stats.reformatted,
            stats.after_error_filter
        );

        let mut dataset  = FeatureDataset::new(featurizer.featurize_all(&examples));
        stats.featurized = dataset.sample_count();

        if self.config.remove_missing_answers {
            let removed = dataset.retain_answerable();
            tracing::info!("{}: removed {} examples with missing answers", split, removed);
        }
        stats.after_missing_filter = dataset.sample_count();

        (dataset, stats)
    }
}

/// Remove examples whose context is the "Error" marker.
fn drop_error_contexts(examples: Vec<QaExample>) -> Vec<QaExample> {
    examples.into_iter().filter(|e| !e.is_error()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::{Answers, ERROR_CONTEXT};
    use crate::domain::span::SpanLabel;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_output_dir_name() {
        let cfg = PrepareConfig {
            model_name:           "microsoft/deberta-v2-xlarge".to_string(),
            context_cutoff_count: 1024,
            ..PrepareConfig::default()
        };
        assert_eq!(
            cfg.output_dir_name(),
            "trivia_qa_dataset_microsoft_deberta-v2-xlarge_1024_512_false_false_false"
        );
    }

    #[test]
    fn test_drop_error_contexts() {
        let examples = vec![
            QaExample::new("a", "ctx", "q", Answers::none()),
            QaExample::new("b", ERROR_CONTEXT, "q", Answers::none()),
        ];
        let kept = drop_error_contexts(examples);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
    }

    #[test]
    fn test_seq2seq_options() {
        let cfg = PrepareConfig { seq2seq_prefixes: true, ..PrepareConfig::default() };
        assert_eq!(cfg.featurizer_options().answer_max_length, Some(SEQ2SEQ_ANSWER_TOKENS));
        assert_eq!(PrepareConfig::default().featurizer_options().answer_max_length, None);
    }

    /// Writes a small TriviaQA corpus and a matching tokenizer.
    fn write_fixture(root: &Path) -> PrepareConfig {
        let corpus_dir = root.join("corpus");
        fs::create_dir_all(&corpus_dir).unwrap();

        let record = |id: usize, aliases: &[&str], passage: &str| {
            serde_json::json!({
                "question_id": format!("tc_{id}"),
                "question": "Where is the Eiffel Tower?",
                "answer": { "aliases": aliases },
                "search_results": { "search_context": [passage] },
            })
            .to_string()
        };

        // 20 train records: every 5th has no findable answer,
        // every 4th has its answer far past a short token window
        let mut train = Vec::new();
        for i in 0..20 {
            let line = if i % 5 == 0 {
                record(i, &["Berlin"], "The Eiffel Tower is in Paris.")
            } else if i % 4 == 0 {
                record(i, &["Paris"], "The tower is tall and old and iron and famous and in Paris.")
            } else {
                record(i, &["Paris"], "The Eiffel Tower is in Paris.")
            };
            train.push(line);
        }
        fs::write(corpus_dir.join("train.jsonl"), train.join("\n")).unwrap();
        fs::write(
            corpus_dir.join("validation.jsonl"),
            record(100, &["France", "Paris"], "Paris is in France."),
        )
        .unwrap();

        let tok_path = root.join("tokenizer.json");
        TokenizerStore::new(&tok_path)
            .build_and_save(
                &[
                    "Where is the Eiffel Tower?".to_string(),
                    "The Eiffel Tower is in Paris.".to_string(),
                    "The tower is tall and old and iron and famous and in Paris.".to_string(),
                    "Paris is in France.".to_string(),
                ],
                200,
            )
            .unwrap();

        PrepareConfig {
            corpus_dir:          corpus_dir.display().to_string(),
            tokenizer_path:      tok_path.display().to_string(),
            output_root:         root.join("out").display().to_string(),
            context_token_count: 16,
            ..PrepareConfig::default()
        }
    }


    #[test]
    fn test_pipeline_writes_all_splits() {
        let tmp = TempDir::new().unwrap();
        let cfg = write_fixture(tmp.path());
        let dir = PrepareUseCase::new(cfg.clone()).execute().unwrap();

        let store = DatasetStore::new(&dir).unwrap();
        assert_eq!(store.load_config().unwrap(), cfg);

        let train      = store.load_split(Split::Train).unwrap().into_inner();
        let validation = store.load_split(Split::Validation).unwrap().into_inner();
        let test       = store.load_split(Split::Test).unwrap().into_inner();

        // 20 records → 17 train + 3 validation; 4 of 20 are "Error"
        assert_eq!(train.len() + validation.len(), 16);
        assert_eq!(test.len(), 1);

        // Every example is padded to the window
        assert!(train.iter().all(|f| f.input_ids.len() == 16));

        // "Paris is in France." → earliest alias is "Paris" at 0
        // [CLS] where is the eiffel tower ? [SEP] paris ...
        assert_eq!(test[0].label, SpanLabel::Found { start: 8, end: 8 });

        // Long contexts lose their answer to truncation but are kept
        assert!(train.iter().chain(&validation).any(|f| f.label == SpanLabel::OutOfWindow));

        let stats = fs::read_to_string(dir.join("split_stats.csv")).unwrap();
        assert_eq!(stats.lines().count(), 4);
    }

    #[test]
    fn test_pipeline_removes_missing_answers() {
        let tmp = TempDir::new().unwrap();
        let cfg = PrepareConfig {
            remove_missing_answers: true,
            ..write_fixture(tmp.path())
        };
        let dir   = PrepareUseCase::new(cfg).execute().unwrap();
        let store = DatasetStore::new(&dir).unwrap();

        let train      = store.load_split(Split::Train).unwrap().into_inner();
        let validation = store.load_split(Split::Validation).unwrap().into_inner();

        // 16 resolvable records, 4 of which (i = 4, 8, 12, 16)
        // overflow the window
        assert_eq!(train.len() + validation.len(), 12);
        assert!(train.iter().chain(&validation).all(|f| f.label.is_found()));
    }

    #[test]
    fn test_pipeline_reduced_sample() {
        let tmp = TempDir::new().unwrap();
        let cfg = PrepareConfig {
            reduced_sample: true,
            ..write_fixture(tmp.path())
        };
        let dir   = PrepareUseCase::new(cfg).execute().unwrap();
        let store = DatasetStore::new(&dir).unwrap();

        // 17 train examples, 5% rounds up to 1, which may be an "Error"
        let train = store.load_split(Split::Train).unwrap();
        assert!(train.sample_count() <= 1);
    }

    #[test]
    fn test_pipeline_question_lengths() {
        let tmp = TempDir::new().unwrap();
        let cfg = PrepareConfig {
            only_preprocess_questions: true,
            ..write_fixture(tmp.path())
        };
        let dir   = PrepareUseCase::new(cfg).execute().unwrap();
        let store = DatasetStore::new(&dir).unwrap();

        let test = store.load_split(Split::Test).unwrap().into_inner();
        assert_eq!(test[0].question_lengths, Some(8));
    }

    #[test]
    fn test_mistyped_corpus_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let cfg = PrepareConfig {
            corpus_dir: tmp.path().join("typo_does_not_exist").display().to_string(),
            ..write_fixture(tmp.path())
        };

        let err = PrepareUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(format!("{err:#}").contains("typo_does_not_exist"));
        assert!(!cfg.output_dir().join("train.jsonl").exists());
    }

    #[test]
    fn test_empty_train_split_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let cfg = write_fixture(tmp.path());
        fs::write(Path::new(&cfg.corpus_dir).join("train.jsonl"), "").unwrap();

        assert!(PrepareUseCase::new(cfg).execute().is_err());
    }
}
