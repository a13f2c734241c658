//! Search nodes shared by both strategies

use crate::algebra::combine;
use crate::reagent::{Atom, Reagent, ReagentPath};
use std::sync::Arc;

/// One state of the search: the compound reached by `path`.
///
/// Nodes are never mutated; expansion builds new, independent children.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Reagent applied last; `None` for the root
    pub previous: Option<Arc<str>>,
    pub compound: Vec<Atom>,
    pub path: ReagentPath,
}

impl SearchNode {
    /// Root node: the start reagent's own atoms, path `[start]`
    pub fn root(start: &Reagent) -> Self {
        Self {
            previous: None,
            compound: start.atoms().to_vec(),
            path: ReagentPath::start(Arc::clone(start.name_arc())),
        }
    }

    /// Only the immediately preceding reagent is excluded from expansion
    pub fn can_apply(&self, reagent: &Reagent) -> bool {
        self.previous.as_deref() != Some(reagent.name())
    }

    pub fn child(&self, reagent: &Reagent) -> Self {
        Self {
            previous: Some(Arc::clone(reagent.name_arc())),
            compound: combine(&self.compound, reagent.atoms()),
            path: self.path.extended(reagent.name_arc()),
        }
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}
