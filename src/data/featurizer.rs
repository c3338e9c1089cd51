// ============================================================
// Layer 4: Featurizer
// ============================================================
// Tokenizes (question, context) pairs and labels the answer span.
//
// For each QaExample:
//   1. Trim the question
//   2. Encode the pair with truncation applied to the CONTEXT only
//      and fixed padding to `max_length`, in character-offset mode
//      so token offsets share units with `answer_start`
//   3. Read per-token offsets and sequence ids from the encoding
//   4. Span Label Mapper → Found / OutOfWindow
//      (examples without answers are NotFound)
//
// Optional extras:
//   - question_lengths: token count of the question on its own
//   - decoded_inputs:   answer text encoded to a fixed length,
//                       the target side of seq2seq models
//
// Tokenizers are configured once per Featurizer: the tokenizer
// passed in is cloned, never mutated.
//
// Reference: HuggingFace tokenizers documentation
//            Devlin et al. (2019) BERT §4.2

use anyhow::Result;
use tokenizers::{PaddingStrategy, Tokenizer, TruncationParams, TruncationStrategy};

use crate::data::{dataset::QaFeatures, span_mapper};
use crate::domain::example::QaExample;
use crate::domain::span::{SequenceTag, SpanLabel};

/// Tokenization settings for one preparation run.
#[derive(Debug, Clone)]
pub struct FeaturizerOptions {
    /// Total tokens per (question, context) sequence
    pub max_length: usize,

    /// Also record the question-only token count
    pub question_lengths: bool,

    /// Encode the answer text to this many tokens, if set
    pub answer_max_length: Option<usize>,
}

pub struct Featurizer {
    pair_tokenizer:     Tokenizer,
    question_tokenizer: Option<Tokenizer>,
    answer_tokenizer:   Option<Tokenizer>,
}

impl Featurizer {
    pub fn new(base: &Tokenizer, options: &FeaturizerOptions) -> Result<Self> {
        let pair_tokenizer = configure(base, options.max_length, TruncationStrategy::OnlySecond)?;

        // Questions are measured untruncated and unpadded
        let question_tokenizer = if options.question_lengths {
            let mut tok = base.clone();
            tok.with_padding(None);
            tok.with_truncation(None)
                .map_err(|e| anyhow::anyhow!("Cannot disable truncation: {e}"))?;
            Some(tok)
        } else {
            None
        };

        let answer_tokenizer = options
            .answer_max_length
            .map(|len| configure(base, len, TruncationStrategy::LongestFirst))
            .transpose()?;

        Ok(Self { pair_tokenizer, question_tokenizer, answer_tokenizer })
    }

    /// Tokenize and label one example.
    pub fn featurize(&self, example: &QaExample) -> Result<QaFeatures> {
        let question = example.question.trim();

        let encoding = self
            .pair_tokenizer
            .encode_char_offsets((question, example.context.as_str()), true)
            .map_err(|e| anyhow::anyhow!("Tokenisation error in '{}': {e}", example.id))?;

        let tags: Vec<SequenceTag> = encoding
            .get_sequence_ids()
            .into_iter()
            .map(SequenceTag::from)
            .collect();

        anyhow::ensure!(
            tags.contains(&SequenceTag::Context),
            "Example '{}' has no context tokens left after truncation",
            example.id
        );

        let label = match example.answer_char_span() {
            Some((start_char, end_char)) => {
                span_mapper::map_span(encoding.get_offsets(), &tags, start_char, end_char)
            }
            None => SpanLabel::NotFound,
        };

        let mut features = QaFeatures::new(
            &example.id,
            encoding.get_ids().to_vec(),
            encoding.get_attention_mask().to_vec(),
            label,
        );

        if let Some(tok) = &self.question_tokenizer {
            let q_enc = tok
                .encode_char_offsets(question, true)
                .map_err(|e| anyhow::anyhow!("Question tokenisation error in '{}': {e}", example.id))?;
            features.question_lengths = Some(q_enc.len());
        }

        if let Some(tok) = &self.answer_tokenizer {
            let answer = example.answers.primary().map(|m| m.text).unwrap_or_default();
            let a_enc  = tok
                .encode(answer.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Answer tokenisation error in '{}': {e}", example.id))?;
            features.decoded_inputs = Some(a_enc.get_ids().to_vec());
        }

        Ok(features)
    }

    /// Featurize every example, skipping (and logging) failures.
    pub fn featurize_all(&self, examples: &[QaExample]) -> Vec<QaFeatures> {
        let mut out     = Vec::with_capacity(examples.len());
        let mut skipped = 0usize;

        for example in examples {
            match self.featurize(example) {
                Ok(features) => out.push(features),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping example: {e}");
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("{} of {} examples could not be featurized", skipped, examples.len());
        }
        out
    }
}

/// Clone `base` with fixed-length padding and the given truncation.
fn configure(
    base:       &Tokenizer,
    max_length: usize,
    strategy:   TruncationStrategy,
) -> Result<Tokenizer> {
    let mut tok = base.clone();

    tok.with_truncation(Some(TruncationParams {
        max_length,
        strategy,
        ..Default::default()
    }))
    .map_err(|e| anyhow::anyhow!("Invalid truncation settings: {e}"))?;

    // Keep the tokenizer's own pad token, only force the length
    let mut padding  = base.get_padding().cloned().unwrap_or_default();
    padding.strategy = PaddingStrategy::Fixed(max_length);
    tok.with_padding(Some(padding));

    Ok(tok)
}
