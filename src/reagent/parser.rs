//! Line-oriented reagent file parser
//!
//! Each non-blank line is `NAME ATOM ATOM ...`. One line carries the reserved
//! target name; its atoms become the target sequence and it is kept out of the
//! reagent table.

use crate::error::{MutagenError, ParseError};
use crate::reagent::atom::Atom;
use crate::reagent::table::{Puzzle, Reagent, ReagentTable};
use std::fs;
use std::path::Path;

/// Reserved name of the target entry
pub const DEFAULT_EXITUS_NAME: &str = "Exitus-1";

const COMMENT_MARKER: char = '#';

/// Read and parse a reagent file
pub fn load_puzzle(path: &Path, exitus_name: &str) -> Result<Puzzle, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_puzzle(&text, exitus_name)
}

/// Parse reagent definitions from text
pub fn parse_puzzle(text: &str, exitus_name: &str) -> Result<Puzzle, ParseError> {
    let mut reagents = ReagentTable::new();
    let mut target: Option<Vec<Atom>> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        // Non-empty after trim, so there is at least one token
        let name = tokens.next().unwrap_or_default();
        let atoms = tokens
            .map(|token| {
                Atom::parse(token).ok_or_else(|| ParseError::MalformedLine {
                    line,
                    reason: format!("invalid atom '{}' in '{}'", token, name),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if atoms.is_empty() {
            return Err(ParseError::MalformedLine {
                line,
                reason: format!("'{}' has no atoms", name),
            });
        }

        if name == exitus_name {
            if target.is_some() {
                return Err(ParseError::DuplicateTarget {
                    line,
                    name: name.to_string(),
                });
            }
            if let Some(neg) = atoms.iter().find(|a| a.is_negative()) {
                return Err(ParseError::NegativeTargetAtom {
                    line,
                    atom: neg.to_string(),
                });
            }
            target = Some(atoms);
            continue;
        }

        reagents
            .insert(Reagent::new(name, atoms))
            .map_err(|dup| ParseError::DuplicateReagent {
                line,
                name: dup.name().to_string(),
            })?;
    }

    let target = target.ok_or_else(|| ParseError::MissingTarget {
        name: exitus_name.to_string(),
    })?;

    Ok(Puzzle { reagents, target })
}

/// Check that every target atom is offered positively by some reagent
pub fn validate_target(reagents: &ReagentTable, target: &[Atom]) -> Result<(), MutagenError> {
    for atom in target {
        let offered = reagents.all_atoms().any(|a| a == atom && a.is_positive());
        if !offered {
            return Err(MutagenError::UnreachableTargetAtom {
                atom: atom.to_string(),
            });
        }
    }
    Ok(())
}
