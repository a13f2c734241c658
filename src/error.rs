//! Error types for loading, validating and searching puzzles

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the reagent definitions
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("line {line}: reagent '{name}' is defined more than once")]
    DuplicateReagent { line: usize, name: String },

    #[error("no target entry '{name}' found")]
    MissingTarget { name: String },

    #[error("line {line}: target entry '{name}' is defined more than once")]
    DuplicateTarget { line: usize, name: String },

    #[error("line {line}: target atom '{atom}' is negated; the target must be purely positive")]
    NegativeTargetAtom { line: usize, atom: String },
}

/// Failures inside a single search task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("start reagent '{0}' is not in the reagent table")]
    UnknownStart(String),

    #[error("search cancelled")]
    Cancelled,
}

/// Fatal errors for a whole run
#[derive(Debug, Error)]
pub enum MutagenError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("target atom '{atom}' is not offered by any reagent")]
    UnreachableTargetAtom { atom: String },

    #[error("unknown starting reagent '{0}'")]
    UnknownStart(String),

    #[error("no reagent is a viable starting point")]
    NoViableStart,
}
