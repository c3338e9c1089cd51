// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `prepare`, `locate` and
// `build-tokenizer`, and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, CorpusKind, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::{
    build_tokenizer_use_case::BuildTokenizerConfig,
    prepare_use_case::PrepareConfig,
};
use crate::domain::example::CorpusKind;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Turn a QA corpus into tokenized, span-labelled splits
    Prepare(PrepareArgs),

    /// Find the earliest answer alias in a context
    Locate(LocateArgs),

    /// Build a word-level tokenizer from a corpus
    BuildTokenizer(BuildTokenizerArgs),
}

/// All arguments for the `prepare` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Corpus format: trivia_qa, squad or squad_v2
    #[arg(long, default_value = "trivia_qa")]
    pub corpus: CorpusKind,

    /// Directory holding the corpus train and validation files
    #[arg(long, default_value = "data/trivia_qa")]
    pub corpus_dir: String,

    /// HuggingFace tokenizer.json for the target model
    #[arg(long, default_value = "tokenizer.json")]
    pub tokenizer: String,

    /// Model name, used only to name the output directory
    #[arg(long, default_value = "bert-base-uncased")]
    pub model_name: String,

    /// Directory the prepared dataset directory is created in
    #[arg(long, default_value = "prepared")]
    pub output_root: String,

    /// Keep only the first N words of each TriviaQA context
    /// before searching for the answer (0 keeps everything)
    #[arg(long, default_value_t = 0)]
    pub context_cutoff_count: usize,

    /// Tokens per sequence: [CLS] question [SEP] context [SEP] + padding
    #[arg(long, default_value_t = 512)]
    pub context_token_count: usize,

    /// Record every alias occurrence instead of only the earliest
    #[arg(long)]
    pub multi_answer: bool,

    /// Drop examples whose answer was cut off by truncation
    #[arg(long)]
    pub remove_missing_answers: bool,

    /// Keep only a 5% sample of the training split
    #[arg(long)]
    pub reduced_sample: bool,

    /// Also record question-only token counts
    #[arg(long)]
    pub only_preprocess_questions: bool,

    /// Add "question: " / "context: " prefixes and answer targets
    /// for sequence-to-sequence models
    #[arg(long)]
    pub seq2seq_prefixes: bool,

    /// Seed for the validation hold-out shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Share of the corpus train split held out for validation
    #[arg(long, default_value_t = 0.15)]
    pub validation_fraction: f64,
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            corpus:                    a.corpus,
            corpus_dir:                a.corpus_dir,
            tokenizer_path:            a.tokenizer,
            model_name:                a.model_name,
            output_root:               a.output_root,
            context_cutoff_count:      a.context_cutoff_count,
            context_token_count:       a.context_token_count,
            multi_answer:              a.multi_answer,
            remove_missing_answers:    a.remove_missing_answers,
            reduced_sample:            a.reduced_sample,
            only_preprocess_questions: a.only_preprocess_questions,
            seq2seq_prefixes:          a.seq2seq_prefixes,
            seed:                      a.seed,
            validation_fraction:       a.validation_fraction,
            ..PrepareConfig::default()
        }
    }
}

/// All arguments for the `locate` command
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Evidence passage; repeat to join several
    #[arg(long = "context", required = true)]
    pub contexts: Vec<String>,

    /// Answer alias; repeat for several
    #[arg(long = "alias", required = true)]
    pub aliases: Vec<String>,

    /// Keep only the first N words of the joined context (0 keeps everything)
    #[arg(long, default_value_t = 0)]
    pub context_cutoff_count: usize,
}

/// All arguments for the `build-tokenizer` command
#[derive(Args, Debug)]
pub struct BuildTokenizerArgs {
    /// Corpus format: trivia_qa, squad or squad_v2
    #[arg(long, default_value = "trivia_qa")]
    pub corpus: CorpusKind,

    /// Directory holding the corpus train file
    #[arg(long, default_value = "data/trivia_qa")]
    pub corpus_dir: String,

    /// Where to write tokenizer.json
    #[arg(long, default_value = "tokenizer.json")]
    pub output: String,

    /// Maximum vocabulary size, special tokens included
    #[arg(long, default_value_t = 30522)]
    pub vocab_size: usize,
}

impl From<BuildTokenizerArgs> for BuildTokenizerConfig {
    fn from(a: BuildTokenizerArgs) -> Self {
        BuildTokenizerConfig {
            corpus:         a.corpus,
            corpus_dir:     a.corpus_dir,
            tokenizer_path: a.output,
            vocab_size:     a.vocab_size,
        }
    }
}
