// ============================================================
// Layer 4: Span Label Mapper
// ============================================================
// Converts a character-level answer span into token-level
// start/end labels for one tokenized (question, context) pair.
//
// Inputs, one entry per token:
//   offsets  (start_char, end_char) into the CONTEXT string
//   tags     Question / Context / None (special + padding)
//
//   tokens:  [CLS] where is it ? [SEP] it is in paris . [SEP] [PAD]
//   tags:     N     Q     Q  Q Q  N     C  C  C  C     C  N     N
//                                       ▲              ▲
//                              context_start   context_end
//
// Steps:
//   1. Find the contiguous block of context tokens
//   2. If the answer is not fully inside that block (the context
//      was truncated before or through it) → OutOfWindow
//   3. start = last context token starting at or before start_char
//      end   = first context token from which every token up to
//              context_end ends at or after end_char
//
// The result is the tightest token range covering the answer.
//
// Reference: Devlin et al. (2019) BERT §4.2 (SQuAD)
//            Rust Book §13 (Iterators)

use crate::domain::span::{SequenceTag, SpanLabel};

/// First and last index of the contiguous context block.
///
/// # Panics
/// Panics if no token is tagged `Context`: every pair encoding
/// keeps at least one context token.
pub fn context_bounds(tags: &[SequenceTag]) -> (usize, usize) {
    let Some(start) = tags.iter().position(|t| *t == SequenceTag::Context) else {
        panic!("token sequence has no context tokens");
    };

    let run = tags[start..]
        .iter()
        .take_while(|t| **t == SequenceTag::Context)
        .count();

    (start, start + run - 1)
}

/// Map `[start_char, end_char)` onto inclusive token labels.
///
/// # Panics
/// Panics if `offsets` and `tags` differ in length, or if the
/// sequence holds no context token.
pub fn map_span(
    offsets:    &[(usize, usize)],
    tags:       &[SequenceTag],
    start_char: usize,
    end_char:   usize,
) -> SpanLabel {
    assert_eq!(
        offsets.len(),
        tags.len(),
        "offset mapping ({}) and sequence tags ({}) must have the same length",
        offsets.len(),
        tags.len(),
    );

    let (context_start, context_end) = context_bounds(tags);

    // The answer must sit entirely within the tokenized context
    if offsets[context_start].0 > start_char || offsets[context_end].1 < end_char {
        return SpanLabel::OutOfWindow;
    }

    let start = (context_start..=context_end)
        .take_while(|&i| offsets[i].0 <= start_char)
        .last();

    let end = (context_start..=context_end)
        .rev()
        .take_while(|&i| offsets[i].1 >= end_char)
        .last();

    match (start, end) {
        (Some(start), Some(end)) => SpanLabel::Found { start, end },
        _ => SpanLabel::OutOfWindow,
    }
}
