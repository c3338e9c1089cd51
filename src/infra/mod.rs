// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the application layer:
//
//   tokenizer_store.rs: Tokenizer loading, and building a
//                       word-level tokenizer from a corpus
//                       when no pretrained one is available.
//
//   dataset_store.rs:   Writing prepared splits as JSON Lines
//                       plus the run configuration, and
//                       reading them back.
//
//   stats.rs:           Per-split example counts written to
//                       CSV after each run.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Tokenizer loading and building
pub mod tokenizer_store;

/// Prepared split persistence
pub mod dataset_store;

/// Split statistics CSV logger
pub mod stats;
