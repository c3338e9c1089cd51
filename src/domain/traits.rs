// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// Each supported corpus turns its own on-disk format into
// QaExamples. The application layer only sees ExampleSource
// and never branches on the corpus name.
//
// Implementations:
//   - TriviaQaCorpus → JSON Lines, answers located by alias
//   - SquadCorpus    → nested SQuAD JSON, answers given
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Trait Objects)

use anyhow::Result;

use crate::domain::example::{QaExample, SourceSplit};

/// Any corpus that can produce reformatted examples for a split.
pub trait ExampleSource {
    /// Load and reformat every example of one on-disk split.
    /// Unanswerable or unresolvable examples are still returned
    /// (with empty answers or the "Error" context) so callers
    /// can count them before filtering.
    fn load_split(&self, split: SourceSplit) -> Result<Vec<QaExample>>;
}
