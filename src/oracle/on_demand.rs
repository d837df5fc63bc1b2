//! Oracle that grades pairs as they are requested

use super::{OracleError, ScoreOracle};
use crate::core::{GradeCode, Vocabulary};

/// Grades (solution, guess) pairs lazily through the candidates' memo tables
///
/// Useful for small vocabularies or one-off builds where a full table would
/// cost more than it saves.
#[derive(Debug, Clone, Copy)]
pub struct OnDemandOracle<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> OnDemandOracle<'a> {
    #[must_use]
    pub const fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }
}

impl ScoreOracle for OnDemandOracle<'_> {
    fn get(&self, solution: usize, guess: usize) -> Result<GradeCode, OracleError> {
        let out_of_range = || OracleError::OutOfRange { solution, guess };
        if !self.vocabulary.is_solution(solution) {
            return Err(out_of_range());
        }
        let answer = self.vocabulary.word(solution).ok_or_else(out_of_range)?;
        let guess = self.vocabulary.candidate(guess).ok_or_else(out_of_range)?;
        Ok(guess.grades(answer).code())
    }

    fn solution_count(&self) -> usize {
        self.vocabulary.solution_count()
    }

    fn guess_count(&self) -> usize {
        self.vocabulary.len()
    }
}
