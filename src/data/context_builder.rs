// ============================================================
// Layer 4: Context Builder
// ============================================================
// Assembles the single context string an answer is searched in.
//
// A TriviaQA question carries two evidence sources:
//   - search_context: web search snippets (primary)
//   - wiki_context:   Wikipedia pages (fallback)
//
// Steps:
//   1. Join the primary passages with a single space
//   2. If that is empty, join the fallback passages instead
//   3. If both are empty, log an error and return ""
//      (the alias search then fails and the example is
//       marked with the "Error" context)
//   4. Optionally keep only the first N space-separated words
//
// Reference: Joshi et al. (2017) TriviaQA
//            Rust Book §8 (Strings in Rust)

pub struct ContextBuilder {
    /// Keep at most this many words; 0 keeps everything
    cutoff_words: usize,
}

impl ContextBuilder {
    pub fn new(cutoff_words: usize) -> Self {
        Self { cutoff_words }
    }

    /// Build the context for question `id`.
    pub fn build(&self, id: &str, primary: &[String], fallback: &[String]) -> String {
        let mut context = primary.join(" ");

        if context.is_empty() {
            context = fallback.join(" ");

            if context.is_empty() {
                tracing::error!("Question '{}' has neither search nor wiki context", id);
                return context;
            }
        }

        self.truncate_words(context)
    }

    fn truncate_words(&self, context: String) -> String {
        if self.cutoff_words == 0 {
            return context;
        }

        // Split on single spaces, the separator used by `build`
        let words: Vec<&str> = context.split(' ').collect();
        if words.len() <= self.cutoff_words {
            return context;
        }

        words[..self.cutoff_words].join(" ")
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(0)
    }
}
