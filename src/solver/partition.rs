//! Partitioning possible solutions by the grade a guess produces
//!
//! Given a guess and the solutions still possible, every solution falls into
//! exactly one group keyed by the grade the guess would show against it.

use crate::core::{GRADE_COUNT, GradeCode};
use crate::oracle::{OracleError, ScoreOracle};
use std::collections::BTreeMap;

/// Solutions grouped by grade code, iterated from least to most informative
pub type Partitions = BTreeMap<GradeCode, Vec<usize>>;

/// Group `possible` by the grade `guess` produces against each solution
///
/// Each group keeps the order of `possible`.
///
/// # Errors
/// Returns the oracle's error if any (solution, guess) pair is missing.
///
/// # Examples
/// ```
/// use wordle_tree::core::{GradeCode, Vocabulary, Word};
/// use wordle_tree::oracle::ScoreMatrix;
/// use wordle_tree::solver::partition::group_by_grade;
///
/// let words = ["slate", "zzzzz"].map(|w| Word::new(w).unwrap()).to_vec();
/// let vocabulary = Vocabulary::from_solutions(words).unwrap();
/// let oracle = ScoreMatrix::compute(&vocabulary);
///
/// let groups = group_by_grade(0, &[0, 1], &oracle).unwrap();
/// assert_eq!(groups[&GradeCode::PERFECT], vec![0]);
/// assert_eq!(groups[&GradeCode::ALL_ABSENT], vec![1]);
/// ```
pub fn group_by_grade<O: ScoreOracle + ?Sized>(
    guess: usize,
    possible: &[usize],
    oracle: &O,
) -> Result<Partitions, OracleError> {
    let mut groups = Partitions::new();
    for &solution in possible {
        let code = oracle.get(solution, guess)?;
        groups.entry(code).or_default().push(solution);
    }
    Ok(groups)
}

/// Shape of a partition, enough to rank guesses without keeping the groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionStats {
    /// Number of non-empty groups
    pub groups: usize,
    /// Groups holding exactly one solution
    pub singletons: usize,
    /// Groups holding exactly two solutions
    pub pairs: usize,
    /// Size of the largest group
    pub largest: usize,
}

impl PartitionStats {
    /// Compute partition shape for a guess without allocating the groups
    ///
    /// # Errors
    /// Returns the oracle's error if any (solution, guess) pair is missing.
    pub fn measure<O: ScoreOracle + ?Sized>(
        guess: usize,
        possible: &[usize],
        oracle: &O,
    ) -> Result<Self, OracleError> {
        let mut counts = [0usize; GRADE_COUNT];
        for &solution in possible {
            let code = oracle.get(solution, guess)?;
            counts[usize::from(code.value())] += 1;
        }
        Ok(Self::from_sizes(counts.iter().copied()))
    }

    /// Shape of an already grouped partition
    #[must_use]
    pub fn of(partitions: &Partitions) -> Self {
        Self::from_sizes(partitions.values().map(Vec::len))
    }

    fn from_sizes(sizes: impl Iterator<Item = usize>) -> Self {
        sizes.filter(|&n| n > 0).fold(Self::default(), |mut stats, n| {
            stats.groups += 1;
            match n {
                1 => stats.singletons += 1,
                2 => stats.pairs += 1,
                _ => {}
            }
            stats.largest = stats.largest.max(n);
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Vocabulary, Word};
    use crate::oracle::ScoreMatrix;

    fn setup(words: &[&str]) -> (Vocabulary, ScoreMatrix) {
        let vocabulary =
            Vocabulary::from_solutions(words.iter().map(|w| Word::new(*w).unwrap()).collect())
                .unwrap();
        let matrix = ScoreMatrix::compute(&vocabulary);
        (vocabulary, matrix)
    }

    #[test]
    fn perfect_split() {
        let (_, oracle) = setup(&["slate", "zzzzz"]);
        let stats = PartitionStats::measure(0, &[0, 1], &oracle).unwrap();
        assert_eq!(
            stats,
            PartitionStats {
                groups: 2,
                singletons: 2,
                pairs: 0,
                largest: 1
            }
        );
    }

    #[test]
    fn all_same_grade() {
        let (_, oracle) = setup(&["aaaaa", "bbbbb", "ccccc", "zzzzz"]);
        let stats = PartitionStats::measure(3, &[0, 1, 2], &oracle).unwrap();
        assert_eq!(stats.groups, 1);
        assert_eq!(stats.largest, 3);
        assert_eq!(stats.singletons, 0);
    }

    #[test]
    fn groups_keep_input_order() {
        let (_, oracle) = setup(&["bbbbb", "aaaaa", "ccccc", "zzzzz"]);
        let groups = group_by_grade(3, &[2, 0, 1], &oracle).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&GradeCode::ALL_ABSENT], vec![2, 0, 1]);
    }

    #[test]
    fn measure_agrees_with_grouping() {
        let (_, oracle) = setup(&["crane", "slate", "irate", "crate", "grate", "trace"]);
        let possible = [0, 1, 2, 3, 4, 5];
        for guess in 0..6 {
            let groups = group_by_grade(guess, &possible, &oracle).unwrap();
            assert_eq!(
                PartitionStats::measure(guess, &possible, &oracle).unwrap(),
                PartitionStats::of(&groups)
            );
            let total: usize = groups.values().map(Vec::len).sum();
            assert_eq!(total, possible.len());
        }
    }

    #[test]
    fn empty_possible() {
        let (_, oracle) = setup(&["crane"]);
        assert!(group_by_grade(0, &[], &oracle).unwrap().is_empty());
        assert_eq!(
            PartitionStats::measure(0, &[], &oracle).unwrap(),
            PartitionStats::default()
        );
    }

    #[test]
    fn oracle_errors_propagate() {
        let (_, oracle) = setup(&["crane"]);
        assert!(group_by_grade(0, &[5], &oracle).is_err());
        assert!(PartitionStats::measure(9, &[0], &oracle).is_err());
    }
}
