// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything between raw corpus files and labelled features.
//
// The pipeline flows in this order:
//
//   corpus files (JSON / JSON Lines)
//       │
//       ▼
//   loader            → parses records, skipping bad lines
//       │
//       ▼
//   corpus            → one QaExample per question
//       │               (context_builder + alias_locator
//       │                resolve TriviaQA answers)
//       ▼
//   splitter          → seeded train / validation hold-out
//       │
//       ▼
//   featurizer        → tokenizes pairs, span_mapper labels
//       │               the answer tokens
//       ▼
//   dataset           → implements Burn's Dataset trait
//
// Reference: Burn Book §4 (Datasets)
//            Rust Book §13 (Iterators and Closures)

/// Finds the earliest alias occurrence in a context
pub mod alias_locator;

/// Maps character spans to token spans
pub mod span_mapper;

/// Joins and truncates evidence passages
pub mod context_builder;

/// Reads JSON and JSON Lines corpus files
pub mod loader;

/// Corpus-specific reformatting into QaExamples
pub mod corpus;

/// Seeded hold-out splitting
pub mod splitter;

/// Tokenization and span labelling
pub mod featurizer;

/// Implements Burn's Dataset trait for prepared features
pub mod dataset;
