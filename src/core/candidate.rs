//! Vocabulary entries used for pruning and on-the-fly grading

use super::word::WORD_LENGTH;
use super::{Filter, Grade, Word};
use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// A vocabulary word with a memo of the grades it produces as a guess
///
/// The memo is shared behind a lock so candidates can be graded from several
/// threads at once.
#[derive(Debug)]
pub struct Candidate {
    word: Word,
    memo: RwLock<FxHashMap<[u8; WORD_LENGTH], Grade>>,
}

impl Candidate {
    #[must_use]
    pub fn new(word: Word) -> Self {
        Self {
            word,
            memo: RwLock::new(FxHashMap::default()),
        }
    }

    #[inline]
    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.word
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        self.word.text()
    }

    /// Check whether this word is still consistent with the filter
    #[inline]
    #[must_use]
    pub fn satisfies(&self, filter: &Filter) -> bool {
        filter.satisfies(&self.word)
    }

    /// Grade produced when this word is guessed against `solution`
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Candidate, Grade, Word};
    ///
    /// let guess = Candidate::new(Word::new("abdec").unwrap());
    /// let solution = Word::new("abcde").unwrap();
    /// assert_eq!(guess.grades(&solution).to_string(), "CCPPP");
    /// assert_eq!(guess.cached_grades(), 1);
    /// ```
    pub fn grades(&self, solution: &Word) -> Grade {
        if let Ok(memo) = self.memo.read()
            && let Some(&grade) = memo.get(solution.chars())
        {
            return grade;
        }

        let grade = Grade::calculate(&self.word, solution);
        if let Ok(mut memo) = self.memo.write() {
            memo.insert(*solution.chars(), grade);
        }
        grade
    }

    /// Number of memoized grades
    #[must_use]
    pub fn cached_grades(&self) -> usize {
        self.memo.read().map_or(0, |memo| memo.len())
    }
}

impl Clone for Candidate {
    fn clone(&self) -> Self {
        let memo = self
            .memo
            .read()
            .map(|memo| memo.clone())
            .unwrap_or_default();
        Self {
            word: self.word.clone(),
            memo: RwLock::new(memo),
        }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for Candidate {}

impl From<Word> for Candidate {
    fn from(word: Word) -> Self {
        Self::new(word)
    }
}
