// ============================================================
// Layer 3: Span Types
// ============================================================
// The values exchanged between the Alias Locator and the
// Span Label Mapper.
//
//   Match        one occurrence of one alias in a context,
//                measured in characters (not bytes)
//   SequenceTag  which segment a token came from
//   SpanLabel    the token-level answer label of one example
//
// Reference: Devlin et al. (2019) BERT, SQuAD fine-tuning
//            Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};

/// One occurrence of an alias inside a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// The alias exactly as it was supplied
    pub text: String,

    /// Character offset of the first character of the occurrence
    pub offset: usize,
}

impl Match {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self { text: text.into(), offset }
    }

    /// Exclusive character offset one past the last matched character
    pub fn end(&self) -> usize {
        self.offset + self.text.chars().count()
    }
}

/// Which logical segment a token belongs to.
///
/// The tokenizer reports `Some(0)` for the question, `Some(1)`
/// for the context and `None` for special and padding tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTag {
    Question,
    Context,
    None,
}

impl From<Option<usize>> for SequenceTag {
    fn from(id: Option<usize>) -> Self {
        match id {
            Some(0) => SequenceTag::Question,
            Some(1) => SequenceTag::Context,
            _       => SequenceTag::None,
        }
    }
}

/// Token-level answer label of one tokenized example.
///
/// `start` and `end` are inclusive indices into the full
/// question + context token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpanLabel {
    /// The answer lies entirely inside the tokenized context window
    Found { start: usize, end: usize },

    /// The answer exists but was truncated out of the window
    OutOfWindow,

    /// The example carries no answer at all
    NotFound,
}

impl SpanLabel {
    /// The `(start_positions, end_positions)` pair written for training.
    /// Both non-found variants collapse to the conventional `(0, 0)`.
    pub fn positions(&self) -> (usize, usize) {
        match *self {
            SpanLabel::Found { start, end } => (start, end),
            SpanLabel::OutOfWindow | SpanLabel::NotFound => (0, 0),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SpanLabel::Found { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_end_counts_chars() {
        // "café" is 4 chars but 5 bytes
        let m = Match::new("café", 3);
        assert_eq!(m.end(), 7);
    }

    #[test]
    fn test_sequence_tag_from_ids() {
        assert_eq!(SequenceTag::from(Some(0)), SequenceTag::Question);
        assert_eq!(SequenceTag::from(Some(1)), SequenceTag::Context);
        assert_eq!(SequenceTag::from(None),    SequenceTag::None);
    }

    #[test]
    fn test_positions_collapse_to_zero() {
        assert_eq!(SpanLabel::Found { start: 7, end: 9 }.positions(), (7, 9));
        assert_eq!(SpanLabel::OutOfWindow.positions(), (0, 0));
        assert_eq!(SpanLabel::NotFound.positions(),    (0, 0));
    }

    #[test]
    fn test_found_at_token_zero_is_still_found() {
        let label = SpanLabel::Found { start: 0, end: 0 };
        assert_eq!(label.positions(), (0, 0));
        assert!(label.is_found());
        assert!(!SpanLabel::OutOfWindow.is_found());
    }

    #[test]
    fn test_label_serialises_with_status_tag() {
        let json = serde_json::to_string(&SpanLabel::Found { start: 3, end: 4 }).unwrap();
        assert_eq!(json, r#"{"status":"found","start":3,"end":4}"#);
        let json = serde_json::to_string(&SpanLabel::OutOfWindow).unwrap();
        assert_eq!(json, r#"{"status":"out_of_window"}"#);
    }
}
