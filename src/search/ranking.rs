//! Start-candidate ranking by contiguous target-prefix overlap
//!
//! A reagent scores `i` when `target[..i]` appears as a contiguous run inside
//! its atom sequence, for the largest such `i`. Purely advisory: it orders and
//! filters start tasks, it never changes what a search returns.

use crate::reagent::{Atom, ReagentTable};

/// A reagent ranked as a search starting point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCandidate {
    pub score: usize,
    pub name: String,
}

/// Longest target prefix found contiguously in `atoms`
pub fn prefix_overlap(atoms: &[Atom], target: &[Atom]) -> usize {
    let mut best = 0;
    for i in 1..=target.len().min(atoms.len()) {
        let prefix = &target[..i];
        if atoms.windows(i).any(|w| w == prefix) {
            best = i;
        } else {
            break;
        }
    }
    best
}

/// Viable start candidates, best first.
///
/// Reagents scoring zero are dropped. Equal scores keep table order.
pub fn rank_start_candidates(table: &ReagentTable, target: &[Atom]) -> Vec<StartCandidate> {
    let mut ranked: Vec<StartCandidate> = table
        .iter()
        .map(|r| StartCandidate {
            score: prefix_overlap(r.atoms(), target),
            name: r.name().to_string(),
        })
        .filter(|c| c.score > 0)
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
