//! JSON word data
//!
//! ```json
//! { "solutions": ["cigar", ...], "validWords": ["aahed", ...], "popularWords": ["slate", ...] }
//! ```
//!
//! `popularWords` may be omitted.

use super::WordListError;
use super::loader::{load_from_file, words_from_slice};
use crate::core::Vocabulary;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw contents of a word data file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordData {
    pub solutions: Vec<String>,
    pub valid_words: Vec<String>,
    #[serde(default)]
    pub popular_words: Vec<String>,
}

/// Vocabulary plus the popular openings as vocabulary indices
#[derive(Debug, Clone)]
pub struct Dataset {
    pub vocabulary: Vocabulary,
    pub popular: Vec<usize>,
}

impl WordData {
    /// Parse word data from JSON text
    ///
    /// # Errors
    /// Returns `WordListError::Json` if the text isn't word data.
    pub fn from_json(json: &str) -> Result<Self, WordListError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every word and lay out the vocabulary
    ///
    /// # Errors
    /// Returns the first invalid word, a vocabulary error, or a popular word
    /// missing from the vocabulary.
    pub fn into_dataset(self) -> Result<Dataset, WordListError> {
        let solutions = words_from_slice(&self.solutions)?;
        let guesses = words_from_slice(&self.valid_words)?;
        let vocabulary = Vocabulary::new(solutions, guesses)?;

        let popular = self
            .popular_words
            .iter()
            .map(|word| {
                vocabulary
                    .index_of(word)
                    .ok_or_else(|| WordListError::UnknownPopular(word.clone()))
            })
            .collect::<Result<_, _>>()?;

        Ok(Dataset {
            vocabulary,
            popular,
        })
    }
}

impl Dataset {
    /// Load a JSON word data file
    ///
    /// # Errors
    /// Returns an I/O, JSON or validation error.
    ///
    /// # Examples
    /// ```no_run
    /// use wordle_tree::wordlists::Dataset;
    ///
    /// let data = Dataset::from_json_file("data/words.json").unwrap();
    /// println!("{} solutions", data.vocabulary.solution_count());
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        WordData::from_json(&content)?.into_dataset()
    }

    /// Load plain-text lists of solutions and, optionally, other guesses
    ///
    /// Text lists carry no popular openings.
    ///
    /// # Errors
    /// Returns an I/O or validation error.
    pub fn from_text_files<P: AsRef<Path>>(
        solutions: P,
        guesses: Option<P>,
    ) -> Result<Self, WordListError> {
        let solutions = load_from_file(solutions)?;
        let guesses = guesses.map(load_from_file).transpose()?.unwrap_or_default();
        Ok(Self {
            vocabulary: Vocabulary::new(solutions, guesses)?,
            popular: Vec::new(),
        })
    }
}
