//! Tree build errors

use crate::core::{FilterError, GradeCode};
use crate::oracle::OracleError;
use std::fmt;

/// Errors raised while building a strategy tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Oracle lookup failed or the oracle doesn't fit the vocabulary
    Oracle(OracleError),
    /// The vocabulary has no solutions
    EmptySolutions,
    /// No guess left to split `remaining` solutions
    EmptyGuessPool { remaining: usize },
    /// The chosen guess leaves every remaining solution in one group
    NoProgress { guess: usize, remaining: usize },
    /// A grade contradicts earlier evidence on this path
    Constraint {
        guess: usize,
        grade: GradeCode,
        source: FilterError,
    },
    /// Opening index outside the vocabulary
    UnknownOpening(usize),
    /// Opening word not in the vocabulary
    UnknownWord(String),
}

impl BuildError {
    /// Whether the error means the oracle or codec can't be trusted
    ///
    /// Fatal errors abort a batch; the others only fail their own root.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Oracle(_)
                | Self::EmptySolutions
                | Self::EmptyGuessPool { .. }
                | Self::NoProgress { .. }
        )
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oracle(e) => write!(f, "Oracle error: {e}"),
            Self::EmptySolutions => write!(f, "No solutions to build a tree for"),
            Self::EmptyGuessPool { remaining } => {
                write!(f, "No guess left to split {remaining} solutions")
            }
            Self::NoProgress { guess, remaining } => write!(
                f,
                "Guess #{guess} leaves all {remaining} solutions together"
            ),
            Self::Constraint {
                guess,
                grade,
                source,
            } => write!(
                f,
                "Grade {} for guess #{guess} contradicts earlier evidence: {source}",
                grade.decode()
            ),
            Self::UnknownOpening(index) => write!(f, "No vocabulary word #{index}"),
            Self::UnknownWord(word) => write!(f, "'{word}' is not in the vocabulary"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Oracle(e) => Some(e),
            Self::Constraint { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<OracleError> for BuildError {
    fn from(e: OracleError) -> Self {
        Self::Oracle(e)
    }
}
