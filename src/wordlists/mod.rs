//! Word lists for building strategy trees
//!
//! Words come either from a JSON data file holding the solutions, the other
//! valid guesses and a list of popular openings, or from plain-text lists.

mod data;
pub mod loader;

pub use data::{Dataset, WordData};

use crate::core::{VocabularyError, WordError};
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors loading word lists
#[derive(Debug)]
pub enum WordListError {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
    InvalidWord { word: String, source: WordError },
    Vocabulary(VocabularyError),
    /// Popular opening that isn't in the vocabulary
    UnknownPopular(String),
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "Can't read {}: {source}", path.display()),
            Self::Json(e) => write!(f, "Malformed word data: {e}"),
            Self::InvalidWord { word, source } => write!(f, "Invalid word '{word}': {source}"),
            Self::Vocabulary(e) => write!(f, "{e}"),
            Self::UnknownPopular(word) => {
                write!(f, "Popular word '{word}' is not in the vocabulary")
            }
        }
    }
}

impl std::error::Error for WordListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::InvalidWord { source, .. } => Some(source),
            Self::Vocabulary(e) => Some(e),
            Self::UnknownPopular(_) => None,
        }
    }
}

impl From<serde_json::Error> for WordListError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<VocabularyError> for WordListError {
    fn from(e: VocabularyError) -> Self {
        Self::Vocabulary(e)
    }
}
