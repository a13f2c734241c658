//! Fixed-point removal of reagents that can never appear in a solution
//!
//! A reagent is dead when it carries a positive atom that is not part of the
//! target and that no remaining reagent can cancel. Removing one dead reagent
//! can strand atoms of another, so passes repeat until one removes nothing.
//!
//! Each pass computes its removal set from an immutable snapshot of the table
//! and applies it between passes.
//!
//! A reagent's own negative atoms count towards the cancel pool, so a reagent
//! holding both `X` and `-X` keeps itself alive.

use crate::reagent::{Atom, ReagentTable};
use std::collections::HashSet;
use std::sync::Arc;

/// Result of pruning a reagent table
#[derive(Debug, Clone)]
pub struct PruneReport {
    /// The surviving reagents
    pub table: ReagentTable,
    /// Removed reagent names, in removal order
    pub removed: Vec<String>,
    /// Number of passes run, including the final pass that removed nothing
    pub passes: usize,
}

/// Names of reagents that are dead with respect to the current table
fn dead_reagents(table: &ReagentTable, target: &HashSet<&Atom>) -> Vec<Arc<str>> {
    let pool: HashSet<&Atom> = table.all_atoms().collect();

    table
        .iter()
        .filter(|reagent| {
            reagent.atoms().iter().any(|atom| {
                atom.is_positive() && !target.contains(atom) && !pool.contains(&atom.counterpart())
            })
        })
        .map(|reagent| Arc::clone(reagent.name_arc()))
        .collect()
}

/// Prune `table` to its fixed point against `target`
pub fn prune_reagents(mut table: ReagentTable, target: &[Atom]) -> PruneReport {
    let target: HashSet<&Atom> = target.iter().collect();
    let mut removed = Vec::new();
    let mut passes = 0;

    loop {
        passes += 1;
        let dead = dead_reagents(&table, &target);
        if dead.is_empty() {
            break;
        }

        tracing::debug!(
            pass = passes,
            removed = dead.len(),
            remaining = table.len() - dead.len(),
            "pruning pass"
        );
        table.remove_all(&dead);
        removed.extend(dead.iter().map(|n| n.to_string()));
    }

    PruneReport {
        table,
        removed,
        passes,
    }
}
