//! Wordle word representation
//!
//! A Word stores a validated 5-letter word together with the set of its
//! distinct letters, so membership tests during pruning are a single bit test.

use std::fmt;

/// Number of letters in every word
pub const WORD_LENGTH: usize = 5;

/// Set of lowercase ASCII letters packed into 26 bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    /// Every letter of the alphabet
    pub const ALL: Self = Self((1 << 26) - 1);

    /// The empty set
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    const fn bit(letter: u8) -> u32 {
        debug_assert!(letter.is_ascii_lowercase());
        1 << (letter - b'a')
    }

    /// Add a letter to the set
    #[inline]
    pub const fn insert(&mut self, letter: u8) {
        self.0 |= Self::bit(letter);
    }

    /// Check whether the set holds a letter
    #[inline]
    #[must_use]
    pub const fn contains(self, letter: u8) -> bool {
        self.0 & Self::bit(letter) != 0
    }

    /// Check whether the two sets share any letter
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Every letter not in this set
    #[inline]
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }

    /// Number of letters in the set
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the letters in alphabetical order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (b'a'..=b'z').filter(move |&letter| self.contains(letter))
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

/// A 5-letter Wordle word with its distinct-letter set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    chars: [u8; WORD_LENGTH],
    letters: LetterSet,
}

/// Why a string was rejected as a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    /// Byte length after lowercasing
    InvalidLength(usize),
    NonAscii,
    /// A byte outside `a..=z`
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(f, "expected {WORD_LENGTH} letters, found {len}"),
            Self::NonAscii => write!(f, "only ASCII letters are allowed"),
            Self::InvalidCharacters => write!(f, "only the letters a-z are allowed"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Validate and lowercase a word list entry
    ///
    /// # Errors
    /// Returns a [`WordError`] for anything but five ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::Word;
    ///
    /// let word = Word::new("Cigar").unwrap();
    /// assert_eq!(word.text(), "cigar");
    /// assert!(word.has_letter(b'g'));
    ///
    /// assert!(Word::new("rebuts").is_err());
    /// assert!(Word::new("r3but").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let mut text = text.into();
        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }
        text.make_ascii_lowercase();

        let chars: [u8; WORD_LENGTH] = text
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::InvalidLength(text.len()))?;
        if chars.iter().any(|ch| !ch.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self {
            letters: chars.iter().copied().collect(),
            text,
            chars,
        })
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercase letters by position
    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; WORD_LENGTH] {
        &self.chars
    }

    /// Letter at `position`
    ///
    /// # Panics
    /// Panics if `position` is not below [`WORD_LENGTH`].
    #[inline]
    #[must_use]
    pub const fn char_at(&self, position: usize) -> u8 {
        self.chars[position]
    }

    /// The distinct letters of the word
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> LetterSet {
        self.letters
    }

    #[inline]
    #[must_use]
    pub const fn has_letter(&self, letter: u8) -> bool {
        self.letters.contains(letter)
    }

    /// Occurrences of each letter, indexed by `letter - b'a'`
    #[inline]
    pub(crate) fn char_counts(&self) -> [u8; 26] {
        let mut counts = [0u8; 26];
        for &letter in &self.chars {
            counts[usize::from(letter - b'a')] += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
