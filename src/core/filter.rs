//! Accumulated letter constraints
//!
//! A [`Filter`] folds (guess, grade) evidence into three kinds of knowledge:
//! letters confirmed at a position, letters confirmed in the word but known to
//! be wrong at some positions, and letters confirmed absent. Words are then
//! tested against it in constant time.

use super::word::{LetterSet, WORD_LENGTH};
use super::{Grade, Mark, Word};
use rustc_hash::FxHashMap;
use std::fmt;

/// Positions 0-4 packed into the low bits of a byte
type Positions = u8;

const fn has_position(positions: Positions, position: usize) -> bool {
    positions & (1 << position) != 0
}

fn positions_to_vec(positions: Positions) -> Vec<usize> {
    (0..WORD_LENGTH)
        .filter(|&p| has_position(positions, p))
        .collect()
}

/// Contradictory evidence applied to a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Letter marked correct but already known absent, or the reverse
    CorrectAndAbsent { letter: char },
    /// Letter marked present but already known absent, or the reverse
    PresentAndAbsent { letter: char },
    /// Letter both confirmed and ruled out at the same position
    CorrectAndPresent { letter: char, position: usize },
    /// Position already confirmed for a different letter
    PositionTaken {
        letter: char,
        position: usize,
        existing: char,
    },
    /// More than five distinct letters would be known to be in the word
    TooManyLetters { letter: char },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorrectAndAbsent { letter } => {
                write!(f, "Letter {letter} can't be correct and absent")
            }
            Self::PresentAndAbsent { letter } => {
                write!(f, "Letter {letter} can't be present and absent")
            }
            Self::CorrectAndPresent { letter, position } => write!(
                f,
                "Letter {letter} can't be correct and present at position {position}"
            ),
            Self::PositionTaken {
                letter,
                position,
                existing,
            } => write!(
                f,
                "Letter {letter} can't be correct at position {position}, already taken by {existing}"
            ),
            Self::TooManyLetters { letter } => {
                write!(f, "Letter {letter} would make more than 5 known letters")
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Constraints accumulated from a sequence of graded guesses
///
/// # Examples
/// ```
/// use wordle_tree::core::{Filter, Word};
///
/// let filter = Filter::new()
///     .derive(&Word::new("caret").unwrap(), "APAPP".parse().unwrap())
///     .unwrap();
///
/// assert!(filter.satisfies(&Word::new("slate").unwrap()));
/// assert!(!filter.satisfies(&Word::new("salet").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    correct: FxHashMap<u8, Positions>,
    present: FxHashMap<u8, Positions>,
    absent: LetterSet,
}

impl Filter {
    /// An empty filter that every word satisfies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.is_empty() && self.present.is_empty() && self.absent.is_empty()
    }

    /// Fold a graded guess into this filter in place
    ///
    /// Evidence already reflected in the filter is accepted silently.
    ///
    /// An Absent mark on a letter that is marked Correct or Present elsewhere in
    /// the same grade only rules the letter out at that position.
    ///
    /// # Errors
    /// Returns `FilterError` when the grade contradicts the recorded constraints.
    /// The filter may be partially updated in that case.
    pub fn add(&mut self, guess: &Word, grade: Grade) -> Result<(), FilterError> {
        let mut marked = LetterSet::new();

        for (position, (&letter, &mark)) in guess.chars().iter().zip(grade.marks()).enumerate() {
            match mark {
                Mark::Correct => self.add_correct(letter, position)?,
                Mark::Present => self.add_present(letter, position)?,
                Mark::Absent => continue,
            }
            marked.insert(letter);
        }

        for (position, (&letter, &mark)) in guess.chars().iter().zip(grade.marks()).enumerate() {
            if mark != Mark::Absent {
                continue;
            }
            if marked.contains(letter) {
                self.add_present(letter, position)?;
            } else {
                self.add_absent(letter)?;
            }
        }

        self.infer_absent();
        Ok(())
    }

    /// New filter with a graded guess folded in, leaving `self` untouched
    ///
    /// # Errors
    /// Returns `FilterError` when the grade contradicts the recorded constraints.
    pub fn derive(&self, guess: &Word, grade: Grade) -> Result<Self, FilterError> {
        let mut next = self.clone();
        next.add(guess, grade)?;
        Ok(next)
    }

    /// Check whether a word is consistent with every recorded constraint
    #[must_use]
    pub fn satisfies(&self, word: &Word) -> bool {
        if word.letters().intersects(self.absent) {
            return false;
        }

        let correct_ok = self.correct.iter().all(|(&letter, &positions)| {
            (0..WORD_LENGTH)
                .filter(|&p| has_position(positions, p))
                .all(|p| word.char_at(p) == letter)
        });
        if !correct_ok {
            return false;
        }

        self.present.iter().all(|(&letter, &positions)| {
            word.has_letter(letter)
                && (0..WORD_LENGTH)
                    .filter(|&p| has_position(positions, p))
                    .all(|p| word.char_at(p) != letter)
        })
    }

    #[must_use]
    pub const fn is_absent(&self, letter: u8) -> bool {
        self.absent.contains(letter)
    }

    /// Letters known to be absent
    #[must_use]
    pub const fn absent(&self) -> LetterSet {
        self.absent
    }

    /// Positions where the letter is confirmed
    #[must_use]
    pub fn correct_positions(&self, letter: u8) -> Vec<usize> {
        self.correct
            .get(&letter)
            .map_or_else(Vec::new, |&p| positions_to_vec(p))
    }

    /// Positions where the letter is known to be wrong
    #[must_use]
    pub fn present_positions(&self, letter: u8) -> Vec<usize> {
        self.present
            .get(&letter)
            .map_or_else(Vec::new, |&p| positions_to_vec(p))
    }

    /// Letters known to be somewhere in the word
    #[must_use]
    pub fn known_letters(&self) -> LetterSet {
        self.correct
            .keys()
            .chain(self.present.keys())
            .copied()
            .collect()
    }

    fn add_correct(&mut self, letter: u8, position: usize) -> Result<(), FilterError> {
        if self.absent.contains(letter) {
            return Err(FilterError::CorrectAndAbsent {
                letter: char::from(letter),
            });
        }
        if self
            .present
            .get(&letter)
            .is_some_and(|&p| has_position(p, position))
        {
            return Err(FilterError::CorrectAndPresent {
                letter: char::from(letter),
                position,
            });
        }
        if self
            .correct
            .get(&letter)
            .is_some_and(|&p| has_position(p, position))
        {
            return Ok(());
        }
        if let Some((&existing, _)) = self
            .correct
            .iter()
            .find(|&(&other, &p)| other != letter && has_position(p, position))
        {
            return Err(FilterError::PositionTaken {
                letter: char::from(letter),
                position,
                existing: char::from(existing),
            });
        }
        self.check_room_for(letter)?;

        *self.correct.entry(letter).or_insert(0) |= 1 << position;
        Ok(())
    }

    fn add_present(&mut self, letter: u8, position: usize) -> Result<(), FilterError> {
        if self.absent.contains(letter) {
            return Err(FilterError::PresentAndAbsent {
                letter: char::from(letter),
            });
        }
        if self
            .correct
            .get(&letter)
            .is_some_and(|&p| has_position(p, position))
        {
            return Err(FilterError::CorrectAndPresent {
                letter: char::from(letter),
                position,
            });
        }
        if self
            .present
            .get(&letter)
            .is_some_and(|&p| has_position(p, position))
        {
            return Ok(());
        }
        self.check_room_for(letter)?;

        *self.present.entry(letter).or_insert(0) |= 1 << position;
        Ok(())
    }

    fn add_absent(&mut self, letter: u8) -> Result<(), FilterError> {
        if self.correct.contains_key(&letter) {
            return Err(FilterError::CorrectAndAbsent {
                letter: char::from(letter),
            });
        }
        if self.present.contains_key(&letter) {
            return Err(FilterError::PresentAndAbsent {
                letter: char::from(letter),
            });
        }
        self.absent.insert(letter);
        Ok(())
    }

    fn check_room_for(&self, letter: u8) -> Result<(), FilterError> {
        let known = self.known_letters();
        if !known.contains(letter) && known.len() as usize >= WORD_LENGTH {
            return Err(FilterError::TooManyLetters {
                letter: char::from(letter),
            });
        }
        Ok(())
    }

    /// Five known letters fill the word, so every other letter is absent
    fn infer_absent(&mut self) {
        let known = self.known_letters();
        if known.len() as usize == WORD_LENGTH {
            self.absent = self.absent.union(known.complement());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn grade(s: &str) -> Grade {
        s.parse().unwrap()
    }

    #[test]
    fn absent_letters_added() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("AAAAA")).unwrap();

        assert!(filter.correct_positions(b'a').is_empty());
        assert!(filter.known_letters().is_empty());
        assert_eq!(filter.absent().len(), 5);
    }

    #[test]
    fn present_and_correct_letters_added() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("CPAAA")).unwrap();

        assert_eq!(filter.correct_positions(b'a'), vec![0]);
        assert_eq!(filter.present_positions(b'b'), vec![1]);
        assert_eq!(filter.absent().len(), 3);
    }

    #[test]
    fn re_adding_same_evidence_is_a_no_op() {
        for (guess, g) in [("abcde", "PPPPP"), ("abcde", "CCCCC"), ("crane", "APACA")] {
            let mut once = Filter::new();
            once.add(&word(guess), grade(g)).unwrap();

            let mut twice = once.clone();
            twice.add(&word(guess), grade(g)).unwrap();

            assert_eq!(once, twice, "{guess} {g}");
        }
    }

    #[test]
    fn too_many_present_letters_rejected() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("PPPPP")).unwrap();
        assert!(filter.add(&word("fghij"), grade("PPPPP")).is_err());
    }

    #[test]
    fn correct_at_confirmed_position_for_other_letter_rejected() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("CCCCC")).unwrap();
        assert!(filter.add(&word("fghij"), grade("CCCCC")).is_err());
    }

    #[test]
    fn position_taken_reported_without_inference() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("CAAAA")).unwrap();
        assert_eq!(
            filter.add(&word("fghij"), grade("CAAAA")),
            Err(FilterError::PositionTaken {
                letter: 'f',
                position: 0,
                existing: 'a'
            })
        );
    }

    #[test]
    fn absent_then_correct_rejected() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("AAAAA")).unwrap();
        assert_eq!(
            filter.add(&word("axxxx"), grade("CAAAA")),
            Err(FilterError::CorrectAndAbsent { letter: 'a' })
        );
    }

    #[test]
    fn present_then_absent_rejected() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("PAAAA")).unwrap();
        assert_eq!(
            filter.add(&word("fgaij"), grade("AAAAA")),
            Err(FilterError::PresentAndAbsent { letter: 'a' })
        );
    }

    #[test]
    fn correct_and_present_same_position_rejected() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("CAAAA")).unwrap();
        assert_eq!(
            filter.add(&word("afghi"), grade("PAAAA")),
            Err(FilterError::CorrectAndPresent {
                letter: 'a',
                position: 0
            })
        );
    }

    #[test]
    fn five_present_letters_make_the_rest_absent() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("PPPPP")).unwrap();
        assert!(filter.is_absent(b'f'));
        assert!(filter.is_absent(b'z'));
        assert!(!filter.is_absent(b'a'));
        assert_eq!(filter.absent().len(), 21);
    }

    #[test]
    fn several_guesses_accumulate() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("PPPAA")).unwrap();
        filter.add(&word("fghij"), grade("CCAAA")).unwrap();

        assert!(filter.is_absent(b'h'));
        assert!(!filter.is_absent(b'a'));
        assert_eq!(filter.present_positions(b'a'), vec![0]);
        assert_eq!(filter.correct_positions(b'f'), vec![0]);
        // a, b, c, f, g fill the word
        assert_eq!(filter.known_letters().len(), 5);
        assert_eq!(filter.absent().len(), 21);
    }

    #[test]
    fn derive_leaves_original_untouched() {
        let mut filter = Filter::new();
        filter.add(&word("abcde"), grade("PPPAA")).unwrap();
        let derived = filter.derive(&word("fghij"), grade("CCAAA")).unwrap();

        assert!(filter.correct_positions(b'f').is_empty());
        assert_eq!(derived.correct_positions(b'f'), vec![0]);
        assert_ne!(filter, derived);
    }

    #[test]
    fn derive_propagates_conflicts() {
        let filter = Filter::new()
            .derive(&word("abcde"), grade("CCCCC"))
            .unwrap();
        assert!(filter.derive(&word("fghij"), grade("CCCCC")).is_err());
    }

    #[test]
    fn duplicate_letter_absent_mark_is_positional() {
        // SPEED against ABIDE marks the first E present and the second absent
        let filter = Filter::new()
            .derive(&word("speed"), grade("AAPAP"))
            .unwrap();

        assert!(!filter.is_absent(b'e'));
        assert_eq!(filter.present_positions(b'e'), vec![2, 3]);
        assert!(filter.satisfies(&word("abide")));
    }

    #[test]
    fn caret_example_keeps_only_slate() {
        let filter = Filter::new()
            .derive(&word("caret"), grade("APAPP"))
            .unwrap();
        let kept: Vec<&str> = ["caret", "crate", "slate", "salet", "cares"]
            .into_iter()
            .filter(|w| filter.satisfies(&word(w)))
            .collect();
        assert_eq!(kept, vec!["slate"]);
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert!(filter.satisfies(&word("zzzzz")));
    }

    #[test]
    fn pruning_never_rejects_the_hidden_solution() {
        let pool: Vec<Word> = [
            "crane", "slate", "speed", "abide", "erase", "robot", "floor", "llama", "label",
            "eerie", "geese", "sassy", "mamma", "naive", "trace", "crate", "caret", "tweet",
            "civic", "kayak", "apple", "allee", "ought", "quiet", "vivid", "fuzzy", "jazzy",
        ]
        .iter()
        .map(|w| word(w))
        .collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let solution = pool.choose(&mut rng).unwrap();
            let mut filter = Filter::new();
            for _ in 0..4 {
                let guess = pool.choose(&mut rng).unwrap();
                let g = Grade::calculate(guess, solution);
                filter
                    .add(guess, g)
                    .unwrap_or_else(|e| panic!("{guess} vs {solution} ({g}): {e}"));
                assert!(filter.satisfies(solution), "{guess} {g} rejected {solution}");
            }
        }
    }
}
