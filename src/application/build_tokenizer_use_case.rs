// ============================================================
// Layer 2: BuildTokenizerUseCase
// ============================================================
// Builds a word-level tokenizer from a corpus train split, for
// environments without a pretrained tokenizer.json.
//
//   Step 1: Load + reformat the train split  (Layer 4 - data)
//   Step 2: Collect questions and contexts,
//           skipping unresolved examples
//   Step 3: Count words, write tokenizer.json (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use std::path::PathBuf;

use crate::data::corpus::{open_corpus, CorpusOptions};
use crate::domain::example::{CorpusKind, SourceSplit};
use crate::infra::tokenizer_store::TokenizerStore;

#[derive(Debug, Clone)]
pub struct BuildTokenizerConfig {
    pub corpus:         CorpusKind,
    pub corpus_dir:     String,
    pub tokenizer_path: String,
    pub vocab_size:     usize,
}

pub struct BuildTokenizerUseCase {
    config: BuildTokenizerConfig,
}

impl BuildTokenizerUseCase {
    pub fn new(config: BuildTokenizerConfig) -> Self {
        Self { config }
    }

    /// Returns the path the tokenizer was written to.
    pub fn execute(&self) -> Result<PathBuf> {
        let cfg = &self.config;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let source   = open_corpus(cfg.corpus, &cfg.corpus_dir, CorpusOptions::default());
        let examples = source.load_split(SourceSplit::Train)?;
        anyhow::ensure!(
            !examples.is_empty(),
            "No training examples found in '{}'",
            cfg.corpus_dir
        );

        // ── Step 2: Collect text ──────────────────────────────────────────────
        let texts: Vec<String> = examples
            .into_iter()
            .filter(|e| !e.is_error())
            .flat_map(|e| [e.question, e.context])
            .collect();
        tracing::info!("Building vocabulary from {} texts", texts.len());

        // ── Step 3: Build and save ────────────────────────────────────────────
        let store = TokenizerStore::new(&cfg.tokenizer_path);
        let tok   = store.build_and_save(&texts, cfg.vocab_size)?;
        tracing::info!("Tokenizer vocabulary size: {}", tok.get_vocab_size(true));

        Ok(PathBuf::from(&cfg.tokenizer_path))
    }
}
