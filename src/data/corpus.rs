// ============================================================
// Layer 4: Corpora
// ============================================================
// One ExampleSource implementation per supported corpus, and
// `open_corpus` which picks the implementation for a CorpusKind.
//
// File layout expected in the corpus directory:
//
//   trivia_qa   train.jsonl         validation.jsonl
//   squad       train-v1.1.json     dev-v1.1.json
//   squad_v2    train-v2.0.json     dev-v2.0.json
//
// TriviaQA reformatting:
//   context  = ContextBuilder over search / wiki passages
//   answer   = earliest alias occurrence (Alias Locator)
//   no alias found → context becomes "Error", answers empty
//
// SQuAD reformatting:
//   context and answers are taken as given; v2.0 questions
//   without answers keep their context and get empty answers.
//
// Reference: Rust Book §17 (Trait Objects)

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{alias_locator, context_builder::ContextBuilder, loader};
use crate::domain::example::{Answers, CorpusKind, QaExample, SourceSplit, ERROR_CONTEXT};
use crate::domain::record::{SquadFile, TriviaQaRecord};
use crate::domain::span::Match;
use crate::domain::traits::ExampleSource;

/// Reformatting options shared by all corpora.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusOptions {
    /// Keep only the first N context words (TriviaQA); 0 disables
    pub context_cutoff_count: usize,

    /// Keep every answer occurrence instead of only the first
    pub multi_answer: bool,
}

/// Select the ExampleSource for `kind`, reading from `dir`.
pub fn open_corpus(
    kind:    CorpusKind,
    dir:     impl Into<PathBuf>,
    options: CorpusOptions,
) -> Box<dyn ExampleSource> {
    let dir = dir.into();
    match kind {
        CorpusKind::TriviaQa => Box::new(TriviaQaCorpus::new(dir, options)),
        CorpusKind::Squad | CorpusKind::SquadV2 => Box::new(SquadCorpus::new(kind, dir, options)),
    }
}

// ─── TriviaQA ─────────────────────────────────────────────────────────────────

pub struct TriviaQaCorpus {
    dir:          PathBuf,
    contexts:     ContextBuilder,
    multi_answer: bool,
}

impl TriviaQaCorpus {
    pub fn new(dir: impl Into<PathBuf>, options: CorpusOptions) -> Self {
        Self {
            dir:          dir.into(),
            contexts:     ContextBuilder::new(options.context_cutoff_count),
            multi_answer: options.multi_answer,
        }
    }

    /// Turn one raw record into a QaExample.
    pub fn reformat(&self, record: &TriviaQaRecord) -> QaExample {
        let context = self.contexts.build(
            &record.question_id,
            &record.search_results.search_context,
            &record.entity_pages.wiki_context,
        );

        let aliases = record.answer.aliases.as_slice();
        let answers = if self.multi_answer {
            Answers::from_matches(alias_locator::locate_all(aliases, &context))
        } else {
            Answers::from_matches(alias_locator::locate(aliases, &context))
        };

        let context = if answers.is_empty() {
            tracing::debug!("No alias of question '{}' found in its context", record.question_id);
            ERROR_CONTEXT.to_string()
        } else {
            context
        };

        QaExample::new(&record.question_id, context, &record.question, answers)
    }
}

impl ExampleSource for TriviaQaCorpus {
    fn load_split(&self, split: SourceSplit) -> Result<Vec<QaExample>> {
        let file = match split {
            SourceSplit::Train      => "train.jsonl",
            SourceSplit::Validation => "validation.jsonl",
        };

        let records: Vec<TriviaQaRecord> = loader::read_json_lines(&self.dir.join(file))?;
        Ok(records.iter().map(|r| self.reformat(r)).collect())
    }
}

// ─── SQuAD ────────────────────────────────────────────────────────────────────

pub struct SquadCorpus {
    kind:         CorpusKind,
    dir:          PathBuf,
    multi_answer: bool,
}

impl SquadCorpus {
    pub fn new(kind: CorpusKind, dir: impl Into<PathBuf>, options: CorpusOptions) -> Self {
        Self { kind, dir: dir.into(), multi_answer: options.multi_answer }
    }

    fn file_name(&self, split: SourceSplit) -> &'static str {
        match (self.kind, split) {
            (CorpusKind::SquadV2, SourceSplit::Train)      => "train-v2.0.json",
            (CorpusKind::SquadV2, SourceSplit::Validation) => "dev-v2.0.json",
            (_, SourceSplit::Train)                        => "train-v1.1.json",
            (_, SourceSplit::Validation)                   => "dev-v1.1.json",
        }
    }

    /// Flatten a SQuAD document into one QaExample per question.
    pub fn reformat(&self, file: SquadFile) -> Vec<QaExample> {
        let mut examples = Vec::new();

        for article in file.data {
            for paragraph in article.paragraphs {
                for qa in paragraph.qas {
                    let answers = if qa.is_impossible {
                        Answers::none()
                    } else {
                        let mut gold: Vec<Match> = qa.answers
                            .into_iter()
                            .map(|a| Match::new(a.text, a.answer_start))
                            .collect();
                        if !self.multi_answer {
                            gold.truncate(1);
                        }
                        Answers::from_matches(gold)
                    };

                    let mut example = QaExample::new(
                        qa.id,
                        paragraph.context.clone(),
                        qa.question,
                        answers,
                    );
                    example.title = article.title.clone();
                    examples.push(example);
                }
            }
        }

        examples
    }
}

impl ExampleSource for SquadCorpus {
    fn load_split(&self, split: SourceSplit) -> Result<Vec<QaExample>> {
        let path = self.dir.join(self.file_name(split));
        let file: SquadFile = loader::read_json_file(&path)?;
        Ok(self.reformat(file))
    }
}
