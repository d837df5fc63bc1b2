//! Index-stable vocabulary
//!
//! Solutions come first, so a solution index is also its guess index:
//! `vocabulary[i] == solutions[i]` for every `i < solution_count`.

use super::{Candidate, Word};
use rustc_hash::FxHashMap;
use std::fmt;

/// Error building a vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    NoSolutions,
    DuplicateSolution(String),
}

impl fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSolutions => write!(f, "Solution list is empty"),
            Self::DuplicateSolution(word) => write!(f, "Solution '{word}' is listed twice"),
        }
    }
}

impl std::error::Error for VocabularyError {}

/// All guessable words, solutions first
#[derive(Debug, Clone)]
pub struct Vocabulary {
    candidates: Vec<Candidate>,
    solution_count: usize,
    index: FxHashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from the solution list and the extra guessable words
    ///
    /// Extra words already present (as a solution or earlier in the list) are skipped.
    ///
    /// # Errors
    /// Returns `VocabularyError` if there are no solutions or a solution repeats.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Vocabulary, Word};
    ///
    /// let words = |list: &[&str]| list.iter().map(|w| Word::new(*w).unwrap()).collect::<Vec<_>>();
    /// let vocabulary = Vocabulary::new(words(&["cigar", "rebut"]), words(&["aahed", "cigar"])).unwrap();
    ///
    /// assert_eq!(vocabulary.len(), 3);
    /// assert_eq!(vocabulary.solution_count(), 2);
    /// assert_eq!(vocabulary.index_of("aahed"), Some(2));
    /// ```
    pub fn new(solutions: Vec<Word>, guesses: Vec<Word>) -> Result<Self, VocabularyError> {
        if solutions.is_empty() {
            return Err(VocabularyError::NoSolutions);
        }

        let solution_count = solutions.len();
        let mut candidates = Vec::with_capacity(solution_count + guesses.len());
        let mut index = FxHashMap::default();

        for word in solutions {
            if index.contains_key(word.text()) {
                return Err(VocabularyError::DuplicateSolution(word.text().to_string()));
            }
            index.insert(word.text().to_string(), candidates.len());
            candidates.push(Candidate::new(word));
        }

        for word in guesses {
            if index.contains_key(word.text()) {
                continue;
            }
            index.insert(word.text().to_string(), candidates.len());
            candidates.push(Candidate::new(word));
        }

        Ok(Self {
            candidates,
            solution_count,
            index,
        })
    }

    /// Vocabulary where every word is also a solution
    ///
    /// # Errors
    /// Same as [`Vocabulary::new`].
    pub fn from_solutions(solutions: Vec<Word>) -> Result<Self, VocabularyError> {
        Self::new(solutions, Vec::new())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn solution_count(&self) -> usize {
        self.solution_count
    }

    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[inline]
    #[must_use]
    pub fn solutions(&self) -> &[Candidate] {
        &self.candidates[..self.solution_count]
    }

    #[inline]
    #[must_use]
    pub fn candidate(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    #[inline]
    #[must_use]
    pub fn word(&self, index: usize) -> Option<&Word> {
        self.candidates.get(index).map(Candidate::word)
    }

    #[must_use]
    pub fn index_of(&self, text: &str) -> Option<usize> {
        self.index.get(&text.to_lowercase()).copied()
    }

    #[inline]
    #[must_use]
    pub const fn is_solution(&self, index: usize) -> bool {
        index < self.solution_count
    }

    #[must_use]
    pub fn solution_indices(&self) -> Vec<usize> {
        (0..self.solution_count).collect()
    }

    #[must_use]
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.candidates.len()).collect()
    }
}
