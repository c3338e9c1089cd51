// ============================================================
// Layer 4: Alias Locator
// ============================================================
// Finds where a ground-truth answer appears in a noisy context.
//
// A TriviaQA answer comes as a list of aliases ("Paris",
// "City of Light", ...) and a context built from several search
// snippets. None of the aliases is guaranteed to appear, and
// several may appear many times.
//
// Rule: the answer is the occurrence with the smallest character
// offset over every alias and every occurrence. Ties on offset
// go to the alias listed first.
//
// Occurrences of one alias are scanned left to right without
// overlap: after a match at `i` the search resumes at the END
// of that match, so "aa" in "aaa" is found once, at 0.
//
// All offsets are CHARACTER offsets, never byte offsets, so they
// line up with tokenizer offsets produced in character mode.
//
// Reference: Joshi et al. (2017) TriviaQA
//            Rust Book §13 (Iterators)

use crate::domain::span::Match;

/// Iterator over the non-overlapping character offsets of
/// `needle` in `haystack`, left to right.
///
/// An empty needle yields nothing.
pub struct Occurrences<'a> {
    haystack: &'a str,
    needle:   &'a str,
    /// Byte position where the next search begins
    cursor:   usize,
    /// Number of chars in `haystack[..cursor]`
    chars_before_cursor: usize,
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.needle.is_empty() || self.cursor > self.haystack.len() {
            return None;
        }

        let rest  = &self.haystack[self.cursor..];
        let found = rest.find(self.needle)?;

        let offset = self.chars_before_cursor + rest[..found].chars().count();

        // Resume after the whole match; both ends are char boundaries
        self.cursor              += found + self.needle.len();
        self.chars_before_cursor  = offset + self.needle.chars().count();

        Some(offset)
    }
}

/// All non-overlapping occurrences of `alias` in `context`.
pub fn occurrences<'a>(context: &'a str, alias: &'a str) -> Occurrences<'a> {
    Occurrences {
        haystack: context,
        needle:   alias,
        cursor:   0,
        chars_before_cursor: 0,
    }
}

/// Resolve the earliest occurring alias in `context`.
///
/// Returns `None` when no alias occurs (including an empty
/// alias list). Empty-string aliases never match.
pub fn locate<S: AsRef<str>>(aliases: &[S], context: &str) -> Option<Match> {
    let mut best: Option<Match> = None;

    for alias in aliases {
        let alias = alias.as_ref();

        for offset in occurrences(context, alias) {
            // Strict less-than keeps the earlier alias on ties
            if best.as_ref().map_or(true, |b| offset < b.offset) {
                best = Some(Match::new(alias, offset));
            }
        }
    }

    best
}

/// Every occurrence of every alias, ordered by offset.
///
/// The first element is always the same match `locate` returns:
/// the sort is stable and candidates are gathered in alias order.
pub fn locate_all<S: AsRef<str>>(aliases: &[S], context: &str) -> Vec<Match> {
    let mut matches: Vec<Match> = aliases
        .iter()
        .flat_map(|alias| {
            let alias = alias.as_ref();
            occurrences(context, alias).map(move |offset| Match::new(alias, offset))
        })
        .collect();

    matches.sort_by_key(|m| m.offset);
    matches
}
