//! Reagents, the reagent table and search paths

use crate::algebra::combine;
use crate::reagent::atom::{Atom, format_atoms};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A named, ordered, immutable list of atoms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reagent {
    name: Arc<str>,
    atoms: Vec<Atom>,
}

impl Reagent {
    pub fn new(name: impl Into<Arc<str>>, atoms: Vec<Atom>) -> Self {
        Self {
            name: name.into(),
            atoms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the name, cheap to clone into search paths
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
}

impl fmt::Display for Reagent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, format_atoms(&self.atoms))
    }
}

/// Reagents keyed by name, in input order.
///
/// Iteration order is insertion order; both search strategies expand children
/// in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReagentTable {
    entries: IndexMap<Arc<str>, Reagent>,
}

impl ReagentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a reagent. Returns the reagent back if the name is taken.
    pub fn insert(&mut self, reagent: Reagent) -> Result<(), Reagent> {
        if self.entries.contains_key(reagent.name()) {
            return Err(reagent);
        }
        self.entries.insert(Arc::clone(&reagent.name), reagent);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Reagent> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reagent> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_ref())
    }

    /// Every atom of every reagent, in table order
    pub fn all_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.iter().flat_map(|r| r.atoms().iter())
    }

    /// Remove the named reagents, keeping the order of the rest
    pub(crate) fn remove_all(&mut self, names: &[Arc<str>]) {
        for name in names {
            self.entries.shift_remove(name.as_ref());
        }
    }
}

/// Builds a table in iteration order. The first reagent with a given name
/// wins and later duplicates are dropped; use [`ReagentTable::insert`] to
/// detect them.
impl FromIterator<Reagent> for ReagentTable {
    fn from_iter<I: IntoIterator<Item = Reagent>>(iter: I) -> Self {
        let mut table = ReagentTable::new();
        for reagent in iter {
            let _ = table.insert(reagent);
        }
        table
    }
}

/// The order in which reagents are applied, start reagent first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReagentPath(Vec<Arc<str>>);

impl ReagentPath {
    pub fn new(steps: Vec<Arc<str>>) -> Self {
        Self(steps)
    }

    pub fn start(start: Arc<str>) -> Self {
        Self(vec![start])
    }

    /// A copy of this path with one more reagent applied
    pub fn extended(&self, next: &Arc<str>) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend(self.0.iter().cloned());
        steps.push(Arc::clone(next));
        Self(steps)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[Arc<str>] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(|s| s.as_ref())
    }

    pub fn to_names(&self) -> Vec<String> {
        self.0.iter().map(|s| s.to_string()).collect()
    }

    /// Fold the combination algebra over the path.
    ///
    /// Seeded with the start reagent's own atoms. `None` if a step names a
    /// reagent missing from `table` or the path is empty.
    pub fn realize(&self, table: &ReagentTable) -> Option<Vec<Atom>> {
        let (first, rest) = self.0.split_first()?;
        let mut compound = table.get(first)?.atoms().to_vec();
        for name in rest {
            compound = combine(&compound, table.get(name)?.atoms());
        }
        Some(compound)
    }
}

impl fmt::Display for ReagentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|s| s.as_ref()).collect();
        write!(f, "{}", names.join(" -> "))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ReagentPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|s| Arc::from(s.as_ref())).collect())
    }
}

/// A parsed puzzle: the reagent table and the target sequence
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub reagents: ReagentTable,
    pub target: Vec<Atom>,
}
