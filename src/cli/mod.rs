// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `prepare`         : corpus → tokenized, labelled splits
//   2. `locate`          : run the alias search on one context
//   3. `build-tokenizer` : word-level tokenizer from a corpus
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BuildTokenizerArgs, Commands, LocateArgs, PrepareArgs};

use crate::data::{alias_locator, context_builder::ContextBuilder};

/// clap reads the fields and generates argument parsing code
/// via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "qa-prep",
    version = "0.1.0",
    about = "Prepare extractive QA corpora: locate answers, tokenize, label answer spans."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Routing only.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args)        => run_prepare(args),
            Commands::Locate(args)         => run_locate(args),
            Commands::BuildTokenizer(args) => run_build_tokenizer(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    tracing::info!("Preparing {} corpus from: {}", args.corpus, args.corpus_dir);

    let out_dir = PrepareUseCase::new(args.into()).execute()?;

    println!("Prepared dataset saved to {}", out_dir.display());
    Ok(())
}

fn run_locate(args: LocateArgs) -> Result<()> {
    let context = ContextBuilder::new(args.context_cutoff_count).build("cli", &args.contexts, &[]);

    match alias_locator::locate(&args.aliases, &context) {
        Some(m) => println!("Answer: {:?} at character {}", m.text, m.offset),
        None    => println!("No alias found in the context"),
    }
    Ok(())
}

fn run_build_tokenizer(args: BuildTokenizerArgs) -> Result<()> {
    use crate::application::build_tokenizer_use_case::BuildTokenizerUseCase;

    let path = BuildTokenizerUseCase::new(args.into()).execute()?;

    println!("Tokenizer saved to {}", path.display());
    Ok(())
}
