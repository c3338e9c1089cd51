// ============================================================
// Layer 6: Tokenizer Store
// ============================================================
// Loads the tokenizer used for preparation, or builds a simple
// word-level one from the corpus when no pretrained
// tokenizer.json is available.
//
// The built tokenizer is written straight as HuggingFace JSON:
//   - BertNormalizer (lowercase, accents stripped) so offsets
//     map back to the original text
//   - Whitespace pre-tokenizer (\w+ | [^\w\s]+)
//   - WordLevel model, BERT special token ids
//   - BertProcessing post-processor, which adds [CLS]/[SEP] and
//     records sequence ids (question = 0, context = 1) that the
//     Span Label Mapper depends on
//
// Vocabulary pieces are produced by the same normalizer and
// pre-tokenizer objects that are serialized into the JSON, so
// every counted word is reachable at encode time.
//
// Reference: HuggingFace tokenizers JSON format

use anyhow::{Context, Result};
use std::{collections::HashMap, path::PathBuf};
use tokenizers::{
    normalizers::BertNormalizer,
    pre_tokenizers::whitespace::Whitespace,
    Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer, Tokenizer,
};

/// Ids below this are reserved for special tokens
const FIRST_WORD_ID: u32 = 104;
const SPECIAL_TOKENS: [(&str, u32); 5] = [
    ("[PAD]",  0),
    ("[UNK]",  1),
    ("[CLS]",  101),
    ("[SEP]",  102),
    ("[MASK]", 103),
];

pub struct TokenizerStore {
    path: PathBuf,
}

impl TokenizerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load a tokenizer.json from disk
    pub fn load(&self) -> Result<Tokenizer> {
        Tokenizer::from_file(&self.path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", self.path.display(), e
            ))
    }

    /// Build a word-level tokenizer from `texts`, write it to the
    /// store path, and load it back.
    pub fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = word_level_json(texts, vocab_size)?;
        std::fs::write(&self.path, serde_json::to_string_pretty(&json)?)
            .with_context(|| format!("Cannot write tokenizer JSON to '{}'", self.path.display()))?;

        tracing::info!("Tokenizer saved to '{}'", self.path.display());
        self.load()
    }
}

/// Build a word-level tokenizer in memory.
#[cfg(test)]
pub fn build_word_level(texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
    use std::str::FromStr;

    let json = word_level_json(texts, vocab_size)?;
    Tokenizer::from_str(&json.to_string())
        .map_err(|e| anyhow::anyhow!("Cannot build tokenizer: {e}"))
}

/// Lowercases, strips accents, keeps offsets aligned
fn normalizer() -> BertNormalizer {
    BertNormalizer::new(true, true, None, true)
}

/// Normalize and split `text` into the pieces the word-level
/// model looks up.
fn pre_tokenize(
    normalizer:    &BertNormalizer,
    pre_tokenizer: &Whitespace,
    text:          &str,
) -> Result<Vec<String>> {
    let mut pretok = PreTokenizedString::from(text);
    pretok
        .normalize(|s| normalizer.normalize(s))
        .map_err(|e| anyhow::anyhow!("Cannot normalize text: {e}"))?;
    pre_tokenizer
        .pre_tokenize(&mut pretok)
        .map_err(|e| anyhow::anyhow!("Cannot pre-tokenize text: {e}"))?;

    Ok(pretok
        .get_splits(OffsetReferential::Normalized, OffsetType::Char)
        .into_iter()
        .map(|(piece, _, _)| piece.to_string())
        .collect())
}

/// Most frequent pieces first, ties alphabetical, capped so the
/// vocabulary plus special tokens fits `vocab_size`.
fn build_vocab(
    texts:         &[String],
    vocab_size:    usize,
    normalizer:    &BertNormalizer,
    pre_tokenizer: &Whitespace,
) -> Result<Vec<String>> {
    let mut freq: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for piece in pre_tokenize(normalizer, pre_tokenizer, text)? {
            *freq.entry(piece).or_insert(0) += 1;
        }
    }

    // Pieces are lowercased and split at brackets, so they never
    // collide with the special tokens
    let mut words: Vec<(String, usize)> = freq.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(vocab_size.saturating_sub(SPECIAL_TOKENS.len()));

    Ok(words.into_iter().map(|(w, _)| w).collect())
}

fn word_level_json(texts: &[String], vocab_size: usize) -> Result<serde_json::Value> {
    let normalizer    = normalizer();
    let pre_tokenizer = Whitespace::default();

    let mut vocab = serde_json::Map::new();
    for (token, id) in SPECIAL_TOKENS {
        vocab.insert(token.to_string(), serde_json::json!(id));
    }

    let words = build_vocab(texts, vocab_size, &normalizer, &pre_tokenizer)?;
    for (i, word) in words.iter().enumerate() {
        vocab.insert(word.clone(), serde_json::json!(FIRST_WORD_ID + i as u32));
    }

    tracing::info!("Word-level vocabulary: {} words + {} special tokens", words.len(), SPECIAL_TOKENS.len());

    let added_tokens: Vec<serde_json::Value> = SPECIAL_TOKENS
        .iter()
        .map(|(content, id)| serde_json::json!({
            "id": id, "content": content, "single_word": false, "lstrip": false,
            "rstrip": false, "normalized": false, "special": true
        }))
        .collect();

    Ok(serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": added_tokens,
        "normalizer": serde_json::to_value(&normalizer)?,
        "pre_tokenizer": serde_json::to_value(&pre_tokenizer)?,
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", 102],
            "cls": ["[CLS]", 101]
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    }))
}
