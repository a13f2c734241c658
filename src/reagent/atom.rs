//! Signed atom tokens

use std::fmt;
use std::sync::Arc;

/// Marker prefix for negated atoms in the textual form.
pub const NEGATION_MARKER: char = '-';

/// Sign of an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    /// The property is present in the compound
    Positive,
    /// Cancels the positive atom of the same name elsewhere in the combination
    Negative,
}

/// A named property with a sign.
///
/// Identity is the exact `(name, polarity)` pair; names are never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    name: Arc<str>,
    polarity: Polarity,
}

impl Atom {
    pub fn positive(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            polarity: Polarity::Positive,
        }
    }

    pub fn negative(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            polarity: Polarity::Negative,
        }
    }

    /// Parse the textual form, `X` or `-X`.
    ///
    /// Returns `None` for an empty token or a bare marker.
    pub fn parse(token: &str) -> Option<Self> {
        match token.strip_prefix(NEGATION_MARKER) {
            Some("") => None,
            Some(name) => Some(Self::negative(name)),
            None if token.is_empty() => None,
            None => Some(Self::positive(token)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn is_positive(&self) -> bool {
        self.polarity == Polarity::Positive
    }

    pub fn is_negative(&self) -> bool {
        self.polarity == Polarity::Negative
    }

    /// The atom with the same name and the opposite sign
    pub fn counterpart(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            polarity: match self.polarity {
                Polarity::Positive => Polarity::Negative,
                Polarity::Negative => Polarity::Positive,
            },
        }
    }

    pub fn is_counterpart_of(&self, other: &Atom) -> bool {
        self.name == other.name && self.polarity != other.polarity
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.polarity {
            Polarity::Positive => write!(f, "{}", self.name),
            Polarity::Negative => write!(f, "{}{}", NEGATION_MARKER, self.name),
        }
    }
}

/// Parse a whitespace-separated list of atoms, for tests and fixtures.
///
/// Tokens that do not parse are skipped.
pub fn atoms(text: &str) -> Vec<Atom> {
    text.split_whitespace().filter_map(Atom::parse).collect()
}

/// Render a sequence of atoms space-separated
pub fn format_atoms(atoms: &[Atom]) -> String {
    atoms
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
