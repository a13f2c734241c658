//! Atom and reagent model, plus the reagent file parser

pub mod atom;
pub mod parser;
pub mod table;

pub use atom::{Atom, Polarity, atoms, format_atoms};
pub use parser::{DEFAULT_EXITUS_NAME, load_puzzle, parse_puzzle, validate_target};
pub use table::{Puzzle, Reagent, ReagentPath, ReagentTable};
