//! Combination algebra: how a reagent merges into the current compound
//!
//! `combine(a, b)` keeps the positive atoms of `a` that `b` does not cancel,
//! followed by the positive atoms of `b` that `a` does not already contain.
//! Negative atoms never survive a combination. The operation is not
//! commutative.

use crate::reagent::Atom;
use std::collections::HashSet;

/// Merge reagent atoms `b` into the compound `a`
pub fn combine(a: &[Atom], b: &[Atom]) -> Vec<Atom> {
    let in_a: HashSet<&Atom> = a.iter().collect();
    let in_b: HashSet<&Atom> = b.iter().collect();

    let kept = a
        .iter()
        .filter(|x| x.is_positive() && !in_b.contains(&x.counterpart()));
    let added = b
        .iter()
        .filter(|y| y.is_positive() && !in_a.contains(*y));

    kept.chain(added).cloned().collect()
}

/// Atoms of `a` that `b` cancels, in order
pub fn cancelled_by<'a>(a: &'a [Atom], b: &[Atom]) -> Vec<&'a Atom> {
    a.iter()
        .filter(|x| x.is_positive() && b.iter().any(|y| y.is_counterpart_of(x)))
        .collect()
}
