//! Core domain types for Wordle
//!
//! Words, grades and their codes, letter constraints, and the index-stable
//! vocabulary. Everything here is pure and independent of storage.

mod candidate;
mod filter;
mod grade;
mod vocabulary;
mod word;

pub use candidate::Candidate;
pub use filter::{Filter, FilterError};
pub use grade::{GRADE_COUNT, Grade, GradeCode, GradeParseError, Mark};
pub use vocabulary::{Vocabulary, VocabularyError};
pub use word::{LetterSet, WORD_LENGTH, Word, WordError};
