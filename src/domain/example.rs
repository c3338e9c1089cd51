// ============================================================
// Layer 3: QaExample Domain Type
// ============================================================
// The corpus-independent form of one training example, in the
// common extractive-QA column layout:
//
//   id, title, context, question,
//   answers: { text: [..], answer_start: [..] }
//
// Offsets in `answer_start` are CHARACTER offsets into `context`.
//
// Example:
//   context:  "The Eiffel Tower is in Paris."
//   answers:  { text: ["Paris"], answer_start: [23] }
//
// Reference: Rajpurkar et al. (2016) SQuAD
//            Rust Book §5 (Structs)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::span::Match;

/// Context marker for examples whose answer could not be found.
/// Such examples are dropped before tokenization.
pub const ERROR_CONTEXT: &str = "Error";

const QUESTION_PREFIX: &str = "question: ";
const CONTEXT_PREFIX:  &str = "context: ";

/// Parallel answer lists. Empty when the example has no answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub text:         Vec<String>,
    pub answer_start: Vec<usize>,
}

impl Answers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_matches(matches: impl IntoIterator<Item = Match>) -> Self {
        let mut answers = Self::default();
        for m in matches {
            answers.text.push(m.text);
            answers.answer_start.push(m.offset);
        }
        answers
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The answer used for labelling: always the first entry
    pub fn primary(&self) -> Option<Match> {
        let text  = self.text.first()?;
        let start = *self.answer_start.first()?;
        Some(Match::new(text.as_str(), start))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaExample {
    pub id:       String,
    pub title:    String,
    pub context:  String,
    pub question: String,
    pub answers:  Answers,
}

impl QaExample {
    pub fn new(
        id:       impl Into<String>,
        context:  impl Into<String>,
        question: impl Into<String>,
        answers:  Answers,
    ) -> Self {
        Self {
            id:       id.into(),
            title:    String::new(),
            context:  context.into(),
            question: question.into(),
            answers,
        }
    }

    /// True when the context is the "Error" marker
    pub fn is_error(&self) -> bool {
        self.context == ERROR_CONTEXT
    }

    /// `[start_char, end_char)` of the primary answer
    pub fn answer_char_span(&self) -> Option<(usize, usize)> {
        let answer = self.answers.primary()?;
        Some((answer.offset, answer.end()))
    }

    /// Prefix question and context the way T5-style models expect.
    /// Answer offsets move right by the context prefix length.
    /// "Error" examples are left untouched.
    pub fn with_seq2seq_prefixes(mut self) -> Self {
        if self.is_error() {
            return self;
        }
        let shift = CONTEXT_PREFIX.chars().count();
        self.question = format!("{QUESTION_PREFIX}{}", self.question);
        self.context  = format!("{CONTEXT_PREFIX}{}", self.context);
        for start in &mut self.answers.answer_start {
            *start += shift;
        }
        self
    }
}

/// The splits written by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    pub fn name(&self) -> &'static str {
        match self {
            Split::Train      => "train",
            Split::Validation => "validation",
            Split::Test       => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The splits a corpus ships with on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSplit {
    Train,
    Validation,
}

/// The supported corpora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKind {
    TriviaQa,
    Squad,
    SquadV2,
}

impl CorpusKind {
    pub fn name(&self) -> &'static str {
        match self {
            CorpusKind::TriviaQa => "trivia_qa",
            CorpusKind::Squad    => "squad",
            CorpusKind::SquadV2  => "squad_v2",
        }
    }
}

impl fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CorpusKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trivia_qa" => Ok(CorpusKind::TriviaQa),
            "squad"     => Ok(CorpusKind::Squad),
            "squad_v2"  => Ok(CorpusKind::SquadV2),
            other => Err(format!(
                "unknown corpus '{other}' (expected trivia_qa, squad or squad_v2)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris_example() -> QaExample {
        QaExample::new(
            "q1",
            "The Eiffel Tower is in Paris.",
            "Where is the Eiffel Tower?",
            Answers::from_matches([Match::new("Paris", 23)]),
        )
    }

    #[test]
    fn test_answer_char_span() {
        assert_eq!(paris_example().answer_char_span(), Some((23, 28)));
    }

    #[test]
    fn test_no_answer_has_no_span() {
        let ex = QaExample::new("q", "ctx", "q?", Answers::none());
        assert_eq!(ex.answer_char_span(), None);
        assert!(ex.answers.is_empty());
    }

    #[test]
    fn test_prefixes_shift_answer_offsets() {
        let ex = paris_example().with_seq2seq_prefixes();
        assert_eq!(ex.question, "question: Where is the Eiffel Tower?");
        let (start, end) = ex.answer_char_span().unwrap();
        let answer: String = ex.context.chars().skip(start).take(end - start).collect();
        assert_eq!(answer, "Paris");
    }

    #[test]
    fn test_prefixes_skip_error_examples() {
        let ex = QaExample::new("q", ERROR_CONTEXT, "q?", Answers::none());
        let ex = ex.with_seq2seq_prefixes();
        assert!(ex.is_error());
        assert_eq!(ex.question, "q?");
    }

    #[test]
    fn test_corpus_kind_round_trips_through_str() {
        for kind in [CorpusKind::TriviaQa, CorpusKind::Squad, CorpusKind::SquadV2] {
            assert_eq!(kind.name().parse::<CorpusKind>(), Ok(kind));
        }
        assert!("natural_questions".parse::<CorpusKind>().is_err());
    }
}
