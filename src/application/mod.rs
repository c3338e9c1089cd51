// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal per use case.
//
// Rules for this layer:
//   - No tokenization or span arithmetic here (Layer 4)
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Corpus → tokenized, span-labelled train/validation/test splits
pub mod prepare_use_case;

// Corpus → word-level tokenizer.json
pub mod build_tokenizer_use_case;
