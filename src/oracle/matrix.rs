//! Dense score table

use super::{OracleError, ScoreOracle};
use crate::core::{Grade, GradeCode, Vocabulary};
use rayon::prelude::*;

/// Grade codes for every (solution, guess) pair, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    solutions: usize,
    guesses: usize,
    codes: Vec<GradeCode>,
}

impl ScoreMatrix {
    /// Grade every vocabulary word against every solution
    ///
    /// Cost is `solutions × vocabulary` gradings, spread over threads by row.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{GradeCode, Vocabulary, Word};
    /// use wordle_tree::oracle::{ScoreMatrix, ScoreOracle};
    ///
    /// let words = ["cigar", "rebut"].map(|w| Word::new(w).unwrap()).to_vec();
    /// let vocabulary = Vocabulary::from_solutions(words).unwrap();
    /// let matrix = ScoreMatrix::compute(&vocabulary);
    ///
    /// assert_eq!(matrix.get(1, 1).unwrap(), GradeCode::PERFECT);
    /// ```
    #[must_use]
    pub fn compute(vocabulary: &Vocabulary) -> Self {
        let candidates = vocabulary.candidates();
        let codes = vocabulary
            .solutions()
            .par_iter()
            .flat_map_iter(|solution| {
                candidates
                    .iter()
                    .map(move |guess| Grade::calculate(guess.word(), solution.word()).code())
            })
            .collect();

        Self {
            solutions: vocabulary.solution_count(),
            guesses: vocabulary.len(),
            codes,
        }
    }

    /// Build from one row of codes per solution
    ///
    /// # Errors
    /// Returns `OracleError::DimensionMismatch` if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<GradeCode>>) -> Result<Self, OracleError> {
        let solutions = rows.len();
        let guesses = rows.first().map_or(0, Vec::len);

        if let Some(ragged) = rows.iter().find(|row| row.len() != guesses) {
            return Err(OracleError::DimensionMismatch {
                expected: (solutions, guesses),
                found: (solutions, ragged.len()),
            });
        }

        Ok(Self {
            solutions,
            guesses,
            codes: rows.into_iter().flatten().collect(),
        })
    }

    /// Iterate over the rows, one per solution
    pub fn rows(&self) -> impl Iterator<Item = &[GradeCode]> {
        // chunks_exact(0) panics, and an empty table has no rows anyway
        self.codes.chunks_exact(self.guesses.max(1))
    }
}

impl ScoreOracle for ScoreMatrix {
    #[inline]
    fn get(&self, solution: usize, guess: usize) -> Result<GradeCode, OracleError> {
        if solution >= self.solutions || guess >= self.guesses {
            return Err(OracleError::OutOfRange { solution, guess });
        }
        Ok(self.codes[solution * self.guesses + guess])
    }

    fn solution_count(&self) -> usize {
        self.solutions
    }

    fn guess_count(&self) -> usize {
        self.guesses
    }
}
