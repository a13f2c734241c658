//! Solver for the mutagen puzzle.
//!
//! Reagents are named, ordered lists of signed atoms. Starting from one
//! reagent and applying others one at a time, the goal is a path whose
//! compound equals the target ("Exitus") exactly.
//!
//! Pipeline: [`reagent`] parsing, [`prune`] to a fixed point, optional start
//! ranking, then [`search`] from every viable start on a worker pool.

pub mod algebra;
pub mod error;
pub mod prune;
pub mod reagent;
pub mod report;
pub mod search;

pub use algebra::combine;
pub use error::{MutagenError, ParseError, SearchError};
pub use prune::{PruneReport, prune_reagents};
pub use reagent::{Atom, Puzzle, Reagent, ReagentPath, ReagentTable};
