// ============================================================
// Layer 4: Seeded Hold-out Splitter
// ============================================================
// Shuffles examples with a fixed seed and carves off a held-out
// fraction. Used twice by the pipeline:
//
//   - corpus train → (train, validation) with 15% held out
//   - reduced sample: keep only the 5% "held-out" part of train
//
// The held-out size is rounded UP (ceil), so any non-empty input
// with a non-zero fraction holds out at least one example.
//
// A fixed seed makes every preparation run reproducible: the
// same corpus and seed always produce the same splits.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom on a
// seeded StdRng.
//
// Reference: rand crate documentation
//            Rust Book §8 (Vectors)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (rest, held_out).
///
/// # Panics
/// Panics if `holdout_fraction` is outside `[0.0, 1.0]`.
pub fn split_holdout<T>(mut samples: Vec<T>, holdout_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    assert!(
        (0.0..=1.0).contains(&holdout_fraction),
        "holdout fraction ({}) must be within [0, 1]",
        holdout_fraction
    );

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let held_out = ((total as f64) * holdout_fraction).ceil() as usize;
    let held_out = held_out.min(total);

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let held = samples.split_off(total - held_out);

    tracing::debug!(
        "Split {} samples: {} kept, {} held out (seed {})",
        total,
        samples.len(),
        held.len(),
        seed
    );

    (samples, held)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holdout_sizes_round_up() {
        let items: Vec<usize> = (0..100).collect();
        let (rest, held)      = split_holdout(items, 0.15, 42);
        assert_eq!(rest.len(), 85);
        assert_eq!(held.len(), 15);

        let items: Vec<usize> = (0..10).collect();
        let (rest, held)      = split_holdout(items, 0.15, 42);
        assert_eq!(held.len(), 2);
        assert_eq!(rest.len(), 8);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (rest, held)      = split_holdout(items, 0.3, 7);
        let mut all: Vec<usize> = rest.into_iter().chain(held).collect();
        all.sort();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_holdout((0..40).collect::<Vec<usize>>(), 0.25, 42);
        let b = split_holdout((0..40).collect::<Vec<usize>>(), 0.25, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_fraction_keeps_at_least_one() {
        let (_, held) = split_holdout((0..3).collect::<Vec<usize>>(), 0.05, 1);
        assert_eq!(held.len(), 1);
    }

    #[test]
    fn test_empty_dataset() {
        let (rest, held) = split_holdout(Vec::<usize>::new(), 0.15, 42);
        assert!(rest.is_empty());
        assert!(held.is_empty());
    }

    #[test]
    fn test_zero_fraction_holds_nothing_out() {
        let (rest, held) = split_holdout((0..10).collect::<Vec<usize>>(), 0.0, 42);
        assert_eq!(rest.len(), 10);
        assert!(held.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_fraction_above_one_panics() {
        let _ = split_holdout(vec![1, 2, 3], 1.5, 42);
    }
}
