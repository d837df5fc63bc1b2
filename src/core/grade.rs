//! Wordle feedback grading and its numeric encoding
//!
//! A [`Grade`] is the per-position feedback for a guess: Absent, Present or
//! Correct. A [`GradeCode`] numbers the 243 possible grades so that higher codes
//! carry more information:
//!
//! 1. more Correct marks rank higher,
//! 2. then more Present marks,
//! 3. then by the positions of the Correct marks, then of the Present marks
//!    (a mark at position 0 weighs the most).
//!
//! All-Absent is code 0 and all-Correct is code 242.

use super::Word;
use super::word::WORD_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Number of distinct grades (3^5)
pub const GRADE_COUNT: usize = 243;

/// Feedback for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    /// Letter is not in the solution (or all its copies are already accounted for)
    Absent = 0,
    /// Letter is in the solution at another position
    Present = 1,
    /// Letter is at this position in the solution
    Correct = 2,
}

impl Mark {
    const fn symbol(self) -> char {
        match self {
            Self::Absent => 'A',
            Self::Present => 'P',
            Self::Correct => 'C',
        }
    }

    const fn emoji(self) -> char {
        match self {
            Self::Absent => '⬜',
            Self::Present => '🟨',
            Self::Correct => '🟩',
        }
    }

    const fn from_digit(digit: u8) -> Self {
        match digit {
            2 => Self::Correct,
            1 => Self::Present,
            _ => Self::Absent,
        }
    }
}

/// Feedback for a whole guess, one mark per position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grade([Mark; WORD_LENGTH]);

impl Grade {
    /// All greens (exact match)
    pub const PERFECT: Self = Self([Mark::Correct; WORD_LENGTH]);

    /// All grays
    pub const ALL_ABSENT: Self = Self([Mark::Absent; WORD_LENGTH]);

    #[inline]
    #[must_use]
    pub const fn new(marks: [Mark; WORD_LENGTH]) -> Self {
        Self(marks)
    }

    #[inline]
    #[must_use]
    pub const fn marks(&self) -> &[Mark; WORD_LENGTH] {
        &self.0
    }

    /// Mark at a given position (0-4)
    #[inline]
    #[must_use]
    pub const fn mark(self, position: usize) -> Mark {
        self.0[position]
    }

    /// Grade obtained when `guess` is played and `solution` is the hidden word
    ///
    /// Duplicate letters are resolved the way the game does it:
    /// 1. First pass: exact matches become Correct and consume that letter
    /// 2. Second pass: other letters become Present while unconsumed copies remain
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Grade, Word};
    ///
    /// let solution = Word::new("abcde").unwrap();
    /// let guess = Word::new("abdec").unwrap();
    /// assert_eq!(Grade::calculate(&guess, &solution).to_string(), "CCPPP");
    ///
    /// // Only one L in the solution, so only one L is marked
    /// let solution = Word::new("label").unwrap();
    /// let guess = Word::new("llama").unwrap();
    /// assert_eq!(Grade::calculate(&guess, &solution).to_string(), "CPPAA");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, solution: &Word) -> Self {
        let mut marks = [Mark::Absent; WORD_LENGTH];
        let mut available = solution.char_counts();
        let guess_chars = guess.chars();
        let solution_chars = solution.chars();

        // Allow: Index needed to compare guess[i] with solution[i] and set marks[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if guess_chars[i] == solution_chars[i] {
                marks[i] = Mark::Correct;
                available[usize::from(guess_chars[i] - b'a')] -= 1;
            }
        }

        // Allow: Index needed to check marks[i] and read guess[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if marks[i] == Mark::Absent {
                let slot = &mut available[usize::from(guess_chars[i] - b'a')];
                if *slot > 0 {
                    marks[i] = Mark::Present;
                    *slot -= 1;
                }
            }
        }

        Self(marks)
    }

    /// Number of positions carrying the given mark
    #[must_use]
    pub fn count(self, mark: Mark) -> usize {
        self.0.iter().filter(|&&m| m == mark).count()
    }

    #[inline]
    #[must_use]
    pub fn is_perfect(self) -> bool {
        self == Self::PERFECT
    }

    /// Canonical code of this grade
    #[inline]
    #[must_use]
    pub fn code(self) -> GradeCode {
        GradeCode::encode(self)
    }

    /// Convert to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.0.iter().map(|m| m.emoji()).collect()
    }

    /// Base-3 value with position 0 as the least significant digit
    fn raw(self) -> u8 {
        self.0
            .iter()
            .rev()
            .fold(0u8, |acc, &mark| acc * 3 + mark as u8)
    }

    fn from_raw(mut raw: u8) -> Self {
        let mut marks = [Mark::Absent; WORD_LENGTH];
        for mark in &mut marks {
            *mark = Mark::from_digit(raw % 3);
            raw /= 3;
        }
        Self(marks)
    }

    /// Sort key ranking grades from least to most informative
    fn rank_key(self) -> (usize, usize, u8, u8) {
        let mask = |wanted: Mark| {
            self.0
                .iter()
                .enumerate()
                .filter(|&(_, &m)| m == wanted)
                .fold(0u8, |acc, (i, _)| acc | (1 << (WORD_LENGTH - 1 - i)))
        };
        (
            self.count(Mark::Correct),
            self.count(Mark::Present),
            mask(Mark::Correct),
            mask(Mark::Present),
        )
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.0 {
            write!(f, "{}", mark.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing a grade string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeParseError {
    InvalidLength(usize),
    InvalidSymbol(char),
}

impl fmt::Display for GradeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(f, "Grade must have 5 marks, got {len}"),
            Self::InvalidSymbol(ch) => write!(f, "Invalid grade symbol '{ch}'"),
        }
    }
}

impl std::error::Error for GradeParseError {}

impl std::str::FromStr for Grade {
    type Err = GradeParseError;

    /// Parse a grade like "CPAAA", "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'C'/'G'/🟩 for correct
    /// - 'P'/'Y'/🟨 for present
    /// - 'A'/'-'/'_'/⬜ for absent
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != WORD_LENGTH {
            return Err(GradeParseError::InvalidLength(chars.len()));
        }

        let mut marks = [Mark::Absent; WORD_LENGTH];
        for (mark, ch) in marks.iter_mut().zip(chars) {
            *mark = match ch {
                'C' | 'c' | 'G' | 'g' | '🟩' => Mark::Correct,
                'P' | 'p' | 'Y' | 'y' | '🟨' => Mark::Present,
                'A' | 'a' | '-' | '_' | '⬜' => Mark::Absent,
                other => return Err(GradeParseError::InvalidSymbol(other)),
            };
        }
        Ok(Self(marks))
    }
}

/// Lookup tables between grades and codes, built once
struct Codec {
    code_of_raw: [u8; GRADE_COUNT],
    grade_of_code: [Grade; GRADE_COUNT],
}

impl Codec {
    fn build() -> Self {
        let mut grades: Vec<Grade> = (0..GRADE_COUNT as u8).map(Grade::from_raw).collect();
        grades.sort_by_key(|grade| grade.rank_key());

        let mut code_of_raw = [0u8; GRADE_COUNT];
        let mut grade_of_code = [Grade::ALL_ABSENT; GRADE_COUNT];
        for (code, grade) in grades.into_iter().enumerate() {
            code_of_raw[usize::from(grade.raw())] = code as u8;
            grade_of_code[code] = grade;
        }

        Self {
            code_of_raw,
            grade_of_code,
        }
    }
}

static CODEC: LazyLock<Codec> = LazyLock::new(Codec::build);

/// Canonical integer encoding of a [`Grade`] (0-242)
///
/// Ordering follows informativeness, so sorting codes in descending order
/// visits the grades with the most Correct marks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GradeCode(u8);

impl GradeCode {
    /// Code of the all-Correct grade
    pub const PERFECT: Self = Self(242);

    /// Code of the all-Absent grade
    pub const ALL_ABSENT: Self = Self(0);

    /// Encode a grade
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Grade, GradeCode};
    ///
    /// let grade: Grade = "CCCCC".parse().unwrap();
    /// assert_eq!(GradeCode::encode(grade), GradeCode::PERFECT);
    /// assert_eq!(GradeCode::PERFECT.decode(), grade);
    /// ```
    #[inline]
    #[must_use]
    pub fn encode(grade: Grade) -> Self {
        Self(CODEC.code_of_raw[usize::from(grade.raw())])
    }

    /// Decode back to the grade
    #[inline]
    #[must_use]
    pub fn decode(self) -> Grade {
        CODEC.grade_of_code[usize::from(self.0)]
    }

    /// Raw code value (0-242)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == Self::PERFECT.0
    }

    /// Every code in ascending order
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..GRADE_COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for GradeCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if usize::from(value) < GRADE_COUNT {
            Ok(Self(value))
        } else {
            Err(format!("Grade code {value} out of range 0-242"))
        }
    }
}

impl From<GradeCode> for u8 {
    fn from(code: GradeCode) -> Self {
        code.0
    }
}

impl From<Grade> for GradeCode {
    fn from(grade: Grade) -> Self {
        Self::encode(grade)
    }
}

impl From<GradeCode> for Grade {
    fn from(code: GradeCode) -> Self {
        code.decode()
    }
}

impl fmt::Display for GradeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(solution: &str, guess: &str) -> Grade {
        Grade::calculate(&Word::new(guess).unwrap(), &Word::new(solution).unwrap())
    }

    fn parse(s: &str) -> Grade {
        s.parse().unwrap()
    }

    #[test]
    fn grade_exact_match_is_perfect() {
        assert_eq!(grade("ABCDE", "ABCDE"), Grade::PERFECT);
        for word in ["crane", "slate", "audio", "zzzzz", "aaaaa"] {
            assert!(grade(word, word).is_perfect());
        }
    }

    #[test]
    fn grade_from_marks_matches_text() {
        let built = Grade::new([
            Mark::Correct,
            Mark::Present,
            Mark::Absent,
            Mark::Absent,
            Mark::Correct,
        ]);
        assert_eq!(built, parse("CPAAC"));
        assert_eq!(built.mark(1), Mark::Present);
        assert_eq!(Grade::new([Mark::Absent; WORD_LENGTH]), Grade::ALL_ABSENT);
    }

    #[test]
    fn grade_shifted_letters_are_present() {
        assert_eq!(grade("ABCDE", "ABDEC"), parse("CCPPP"));
    }

    #[test]
    fn grade_disjoint_letters_are_absent() {
        assert_eq!(grade("ABCDE", "FGHIJ"), Grade::ALL_ABSENT);
    }

    #[test]
    fn grade_marks_correct_wherever_letters_match() {
        let pairs = [("crane", "slate"), ("robot", "floor"), ("speed", "erase")];
        for (solution, guess) in pairs {
            let g = grade(solution, guess);
            for i in 0..WORD_LENGTH {
                let same = solution.as_bytes()[i] == guess.as_bytes()[i];
                assert_eq!(g.mark(i) == Mark::Correct, same, "{guess} vs {solution} at {i}");
            }
        }
    }

    #[test]
    fn grade_duplicate_guess_letters_limited_by_solution() {
        // SPEED vs ABIDE: one E in the solution, so only the first E is marked
        assert_eq!(grade("abide", "speed"), parse("AAPAP"));
        // Two Es in ERASE, both Es of SPEED are present
        assert_eq!(grade("erase", "speed"), parse("PAPPA"));
    }

    #[test]
    fn grade_correct_consumes_before_present() {
        // ROBOT vs FLOOR: the second O is correct, the first O still finds the other O
        assert_eq!(grade("floor", "robot"), parse("PPACA"));
        // The correct E at position 4 leaves no copy for the first E
        assert_eq!(grade("abcde", "eeeee"), parse("AAAAC"));
    }

    #[test]
    fn parse_accepts_all_notations() {
        let a = parse("CPA--");
        assert_eq!(a, parse("GY-_a"));
        assert_eq!(a, parse("🟩🟨⬜⬜⬜"));
        assert_eq!(a.to_string(), "CPAAA");
        assert_eq!(a.to_emoji(), "🟩🟨⬜⬜⬜");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            "CPAAAC".parse::<Grade>(),
            Err(GradeParseError::InvalidLength(6))
        );
        assert_eq!("CPX--".parse::<Grade>(), Err(GradeParseError::InvalidSymbol('X')));
        assert_eq!("".parse::<Grade>(), Err(GradeParseError::InvalidLength(0)));
    }

    #[test]
    fn codec_round_trip_covers_all_grades() {
        let mut seen = std::collections::HashSet::new();
        for code in GradeCode::all() {
            let grade = code.decode();
            assert_eq!(GradeCode::encode(grade), code);
            assert!(seen.insert(grade));
        }
        assert_eq!(seen.len(), GRADE_COUNT);
    }

    #[test]
    fn codec_extremes() {
        assert_eq!(GradeCode::encode(Grade::PERFECT), GradeCode::PERFECT);
        assert_eq!(GradeCode::encode(Grade::ALL_ABSENT), GradeCode::ALL_ABSENT);
        assert!(GradeCode::PERFECT.is_perfect());
        assert_eq!(GradeCode::PERFECT.value(), 242);
    }

    #[test]
    fn codec_matches_reference_table_positions() {
        let expected = [
            ("AAAAP", 1),
            ("PAAAA", 5),
            ("AAAPP", 6),
            ("PPPPP", 31),
            ("AAAAC", 32),
            ("CAAAA", 36),
            ("AAAPC", 37),
            ("AAACP", 41),
            ("PCCCC", 237),
            ("CCCCP", 241),
        ];
        for (text, value) in expected {
            assert_eq!(parse(text).code().value(), value, "{text}");
        }
    }

    #[test]
    fn codec_orders_by_informativeness() {
        // More correct always outranks more present
        assert!(parse("CAAAA").code() > parse("PPPPP").code());
        assert!(parse("CCAAA").code() > parse("CPPPP").code());
        assert!(parse("APAAA").code() > parse("AAAAA").code());
        for code in GradeCode::all().filter(|c| !c.is_perfect()) {
            assert!(code < GradeCode::PERFECT);
        }
    }

    #[test]
    fn code_try_from_checks_range() {
        assert!(GradeCode::try_from(242).is_ok());
        assert!(GradeCode::try_from(243).is_err());
    }

    #[test]
    fn code_serializes_as_number() {
        let json = serde_json::to_string(&GradeCode::PERFECT).unwrap();
        assert_eq!(json, "242");
        let back: GradeCode = serde_json::from_str("37").unwrap();
        assert_eq!(back.decode(), parse("AAAPC"));
        assert!(serde_json::from_str::<GradeCode>("250").is_err());
    }
}
