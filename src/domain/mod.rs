// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits describing the
// concepts of extractive QA data preparation.
//
// Rules for this layer:
//   - NO tokenizer or burn types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// Raw corpus records exactly as they are stored on disk
pub mod record;

// A reformatted question / context / answers example
pub mod example;

// Character matches, sequence tags and span labels
pub mod span;

// Core abstractions (traits) that other layers implement
pub mod traits;
