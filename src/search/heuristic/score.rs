//! Positional alignment score
//!
//! Walks the compound position by position against the target. A match adds
//! `3 / depth`; a mismatch subtracts `depth` and shifts later comparisons one
//! place left, as if the mismatching atom were an insertion. Higher is better.
//! This is a tunable proxy, not an edit distance and not admissible.

use crate::reagent::Atom;

const MATCH_REWARD: f64 = 3.0;

/// Alignment score of `sequence` against `target` for a node at `depth`
pub fn alignment_score(sequence: &[Atom], target: &[Atom], depth: usize) -> f64 {
    let depth = depth.max(1) as f64;
    let mut score = 0.0;
    let mut offset = 0;

    for (i, atom) in sequence.iter().enumerate() {
        // `offset` grows by at most one per position, so this never underflows
        let Some(expected) = target.get(i - offset) else {
            break;
        };
        if atom == expected {
            score += MATCH_REWARD / depth;
        } else {
            score -= depth;
            offset += 1;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reagent::atoms;

    #[test]
    fn test_exact_match() {
        let t = atoms("a b c");
        assert!((alignment_score(&t, &t, 1) - 9.0).abs() < 1e-10);
        assert!((alignment_score(&t, &t, 3) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_insertion_realigns() {
        // `x` is skipped over, then `a b` line up again
        let score = alignment_score(&atoms("x a b"), &atoms("a b"), 2);
        assert!((score - (-2.0 + 1.5 + 1.5)).abs() < 1e-10);
    }

    #[test]
    fn test_extra_tail_ignored() {
        let score = alignment_score(&atoms("a z z"), &atoms("a"), 1);
        assert!((score - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_closer_scores_higher() {
        let target = atoms("a b c");
        let near = alignment_score(&atoms("a b"), &target, 2);
        let far = alignment_score(&atoms("z y"), &target, 2);
        assert!(near > far);
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(alignment_score(&[], &atoms("a"), 1), 0.0);
    }
}
