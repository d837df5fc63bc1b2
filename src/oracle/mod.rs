//! Score oracles
//!
//! An oracle answers "which grade does guess `g` produce against solution `s`"
//! for every pair of a [`Vocabulary`]. The tree builder only reads grades
//! through this interface, so it never regrades words once an oracle exists.

mod matrix;
mod on_demand;
mod store;

pub use matrix::ScoreMatrix;
pub use on_demand::OnDemandOracle;
pub use store::ScoreSource;

use crate::core::{GradeCode, Vocabulary};
use std::fmt;
use std::path::PathBuf;

/// Source of grade codes for (solution, guess) index pairs
///
/// Implementations are read-only once built and shared between threads.
pub trait ScoreOracle: Sync {
    /// Grade code produced by guessing `guess` when `solution` is the answer
    ///
    /// # Errors
    /// Returns `OracleError::OutOfRange` when either index is outside the table.
    fn get(&self, solution: usize, guess: usize) -> Result<GradeCode, OracleError>;

    /// Number of solutions (rows)
    fn solution_count(&self) -> usize;

    /// Number of guessable words (columns)
    fn guess_count(&self) -> usize;

    /// Check that this oracle covers exactly the given vocabulary
    ///
    /// # Errors
    /// Returns `OracleError::DimensionMismatch` when the sizes differ.
    fn check_against(&self, vocabulary: &Vocabulary) -> Result<(), OracleError> {
        let expected = (vocabulary.solution_count(), vocabulary.len());
        let found = (self.solution_count(), self.guess_count());
        if expected == found {
            Ok(())
        } else {
            Err(OracleError::DimensionMismatch { expected, found })
        }
    }
}

/// Errors reading or querying an oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Persisted table could not be read
    Unavailable { path: PathBuf, reason: String },
    /// Persisted table is not a valid table of grade codes
    Corrupt { path: PathBuf, reason: String },
    /// Table shape does not match the vocabulary (solutions, guesses)
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Lookup outside the table
    OutOfRange { solution: usize, guess: usize },
}

impl OracleError {
    /// No persisted table could be read at all
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { path, reason } => {
                write!(f, "Score table {} unavailable: {reason}", path.display())
            }
            Self::Corrupt { path, reason } => {
                write!(f, "Score table {} is corrupt: {reason}", path.display())
            }
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "Score table is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::OutOfRange { solution, guess } => {
                write!(f, "No score for solution {solution} and guess {guess}")
            }
        }
    }
}

impl std::error::Error for OracleError {}
