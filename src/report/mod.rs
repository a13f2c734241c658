//! Step-by-step replay of a solution path
//!
//! Each step shows the compound before, the reagent applied and the resulting
//! compound, with atoms annotated in the rendered text:
//!
//! | form    | meaning                                              |
//! |---------|------------------------------------------------------|
//! | `<p>`   | compound atom cancelled by this reagent              |
//! | `<-p>`  | reagent atom doing the cancelling                    |
//! | `(q)`   | reagent atom already in the compound, suppressed     |
//! | `(-z)`  | negative atom with nothing to cancel                 |
//! | `+q`    | reagent atom added to the compound                   |
//! | `?q`    | result atom present in the target at another place   |
//! | `!q`    | result atom absent from the target                   |

use crate::algebra::{cancelled_by, combine};
use crate::reagent::{Atom, ReagentPath, ReagentTable, format_atoms};
use std::fmt;

/// Annotation of an atom in the compound before a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundMark {
    Kept,
    Cancelled,
    /// Negative atom left in the seed compound; never carried forward
    Dropped,
}

/// Annotation of an atom of the applied reagent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReagentMark {
    Cancels,
    Duplicate,
    Added,
    Inert,
}

/// Annotation of an atom of the result against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMark {
    InPlace,
    Misplaced,
    Foreign,
}

/// One application of a reagent
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub reagent: String,
    pub before: Vec<(Atom, CompoundMark)>,
    pub applied: Vec<(Atom, ReagentMark)>,
    pub after: Vec<(Atom, TargetMark)>,
}

/// Replay of a whole path against the target
#[derive(Debug, Clone)]
pub struct SolutionTrace {
    pub path: ReagentPath,
    pub start_atoms: Vec<Atom>,
    pub steps: Vec<TraceStep>,
    pub target: Vec<Atom>,
    /// Whether the final compound equals the target
    pub reached: bool,
}

fn mark_compound(compound: &[Atom], reagent: &[Atom]) -> Vec<(Atom, CompoundMark)> {
    let cancelled = cancelled_by(compound, reagent);
    compound
        .iter()
        .map(|atom| {
            let mark = if atom.is_negative() {
                CompoundMark::Dropped
            } else if cancelled.contains(&atom) {
                CompoundMark::Cancelled
            } else {
                CompoundMark::Kept
            };
            (atom.clone(), mark)
        })
        .collect()
}

fn mark_reagent(compound: &[Atom], reagent: &[Atom]) -> Vec<(Atom, ReagentMark)> {
    reagent
        .iter()
        .map(|atom| {
            let mark = match (atom.is_negative(), compound.contains(atom)) {
                (true, _) if compound.contains(&atom.counterpart()) => ReagentMark::Cancels,
                (true, _) => ReagentMark::Inert,
                (false, true) => ReagentMark::Duplicate,
                (false, false) => ReagentMark::Added,
            };
            (atom.clone(), mark)
        })
        .collect()
}

fn mark_target(result: &[Atom], target: &[Atom]) -> Vec<(Atom, TargetMark)> {
    result
        .iter()
        .enumerate()
        .map(|(i, atom)| {
            let mark = if target.get(i) == Some(atom) {
                TargetMark::InPlace
            } else if target.contains(atom) {
                TargetMark::Misplaced
            } else {
                TargetMark::Foreign
            };
            (atom.clone(), mark)
        })
        .collect()
}

impl SolutionTrace {
    /// Replay `path` over `table`. `None` if a step names an unknown reagent.
    pub fn build(table: &ReagentTable, target: &[Atom], path: &ReagentPath) -> Option<Self> {
        let (first, rest) = path.steps().split_first()?;
        let start_atoms = table.get(first)?.atoms().to_vec();
        let mut compound = start_atoms.clone();
        let mut steps = Vec::with_capacity(rest.len());

        for name in rest {
            let reagent = table.get(name)?;
            let next = combine(&compound, reagent.atoms());
            steps.push(TraceStep {
                reagent: reagent.name().to_string(),
                before: mark_compound(&compound, reagent.atoms()),
                applied: mark_reagent(&compound, reagent.atoms()),
                after: mark_target(&next, target),
            });
            compound = next;
        }

        Some(Self {
            path: path.clone(),
            start_atoms,
            steps,
            target: target.to_vec(),
            reached: compound == target,
        })
    }
}

fn render<T, F>(atoms: &[(Atom, T)], form: F) -> String
where
    F: Fn(&Atom, &T) -> String,
{
    atoms
        .iter()
        .map(|(atom, mark)| form(atom, mark))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for SolutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path: {}", self.path)?;
        writeln!(f, " 0.\t  {}", format_atoms(&self.start_atoms))?;

        for (i, step) in self.steps.iter().enumerate() {
            let before = render(&step.before, |a, m| match m {
                CompoundMark::Kept => a.to_string(),
                CompoundMark::Cancelled => format!("<{}>", a),
                CompoundMark::Dropped => format!("({})", a),
            });
            let applied = render(&step.applied, |a, m| match m {
                ReagentMark::Cancels => format!("<{}>", a),
                ReagentMark::Duplicate | ReagentMark::Inert => format!("({})", a),
                ReagentMark::Added => format!("+{}", a),
            });
            let after = render(&step.after, |a, m| match m {
                TargetMark::InPlace => a.to_string(),
                TargetMark::Misplaced => format!("?{}", a),
                TargetMark::Foreign => format!("!{}", a),
            });

            writeln!(f, " {}.\t  {}", i + 1, before)?;
            writeln!(f, "\t+ {}   [{}]", applied, step.reagent)?;
            writeln!(f, "\t= {}", after)?;
            writeln!(f, "\t  {}", format_atoms(&self.target))?;
        }

        if self.reached {
            writeln!(f, "Target reached.")
        } else {
            writeln!(f, "Target not reached.")
        }
    }
}
