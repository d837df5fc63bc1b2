//! Word list loading utilities
//!
//! Plain-text lists hold one word per line; blank lines are ignored.
//! Unlike guesses typed at a prompt, list entries are never skipped: a bad
//! entry fails the whole load and names the offending word.

use super::WordListError;
use crate::core::Word;
use std::fs;
use std::path::Path;

/// Load words from a text file, one per line
///
/// # Errors
///
/// Returns `WordListError::Io` if the file can't be read and
/// `WordListError::InvalidWord` for the first entry that isn't a word.
///
/// # Examples
/// ```no_run
/// use wordle_tree::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/answers.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, WordListError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| WordListError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    words_from_lines(content.lines())
}

/// Convert string slices to words
///
/// # Errors
///
/// Returns `WordListError::InvalidWord` for the first entry that isn't a word.
///
/// # Examples
/// ```
/// use wordle_tree::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["crane", "SLATE"]).unwrap();
/// assert_eq!(words[1].text(), "slate");
/// assert!(words_from_slice(&["toolong"]).is_err());
/// ```
pub fn words_from_slice<S: AsRef<str>>(slice: &[S]) -> Result<Vec<Word>, WordListError> {
    slice.iter().map(|s| parse_word(s.as_ref())).collect()
}

fn words_from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Vec<Word>, WordListError> {
    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_word)
        .collect()
}

fn parse_word(text: &str) -> Result<Word, WordListError> {
    Word::new(text).map_err(|source| WordListError::InvalidWord {
        word: text.to_string(),
        source,
    })
}
