//! Move-selection heuristics
//!
//! A heuristic picks the next guess for a set of possible solutions and
//! returns the partition that guess induces. The builder doesn't care which
//! heuristic is in effect.

use super::partition::{PartitionStats, Partitions, group_by_grade};
use crate::oracle::{OracleError, ScoreOracle};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Chosen guess and the groups of solutions it separates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub guess: usize,
    pub partitions: Partitions,
}

/// A strategy for choosing the next guess
pub trait Heuristic: Sync {
    /// Choose a guess among `useful` to split `possible`
    ///
    /// Returns `None` when there is nothing to choose from.
    ///
    /// # Errors
    /// Returns the oracle's error if a required grade is missing.
    fn select<O: ScoreOracle + ?Sized>(
        &self,
        possible: &[usize],
        useful: &[usize],
        oracle: &O,
    ) -> Result<Option<Selection>, OracleError>;
}

/// Closed set of heuristics, chosen once per build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeuristicType {
    /// First possible solution, no scan
    Basic,
    /// Most singleton groups, then most pairs
    #[default]
    Fast,
    /// Smallest worst-case group
    Safe,
}

impl HeuristicType {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Fast, Self::Safe];

    /// Name used on the command line and as the output directory prefix
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Fast => "fast",
            Self::Safe => "safe",
        }
    }
}

impl Heuristic for HeuristicType {
    fn select<O: ScoreOracle + ?Sized>(
        &self,
        possible: &[usize],
        useful: &[usize],
        oracle: &O,
    ) -> Result<Option<Selection>, OracleError> {
        match self {
            Self::Basic => BasicHeuristic.select(possible, useful, oracle),
            Self::Fast => FastHeuristic.select(possible, useful, oracle),
            Self::Safe => SafeHeuristic.select(possible, useful, oracle),
        }
    }
}

impl fmt::Display for HeuristicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized heuristic name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl fmt::Display for UnknownHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown heuristic '{}' (expected basic, fast or safe)",
            self.0
        )
    }
}

impl std::error::Error for UnknownHeuristic {}

impl FromStr for HeuristicType {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHeuristic(s.to_string()))
    }
}

/// Guess the first possible solution
///
/// Cheap baseline: no scan of the guess pool.
pub struct BasicHeuristic;

impl Heuristic for BasicHeuristic {
    fn select<O: ScoreOracle + ?Sized>(
        &self,
        possible: &[usize],
        _useful: &[usize],
        oracle: &O,
    ) -> Result<Option<Selection>, OracleError> {
        let Some(&guess) = possible.first() else {
            return Ok(None);
        };
        let partitions = group_by_grade(guess, possible, oracle)?;
        Ok(Some(Selection { guess, partitions }))
    }
}

/// Aggressive: maximize groups that resolve in one or two more moves
///
/// Ranks guesses by (singleton groups, pair groups), then prefers a guess
/// that could itself be the answer, then the lowest index.
pub struct FastHeuristic;

impl Heuristic for FastHeuristic {
    fn select<O: ScoreOracle + ?Sized>(
        &self,
        possible: &[usize],
        useful: &[usize],
        oracle: &O,
    ) -> Result<Option<Selection>, OracleError> {
        select_best(possible, useful, oracle, |stats, can_win, guess| {
            (stats.singletons, stats.pairs, can_win, Reverse(guess))
        })
    }
}

/// Conservative: minimize the largest group (minimax)
///
/// Ties prefer a guess that could itself be the answer, then the lowest index.
pub struct SafeHeuristic;

impl Heuristic for SafeHeuristic {
    fn select<O: ScoreOracle + ?Sized>(
        &self,
        possible: &[usize],
        useful: &[usize],
        oracle: &O,
    ) -> Result<Option<Selection>, OracleError> {
        select_best(possible, useful, oracle, |stats, can_win, guess| {
            Reverse((stats.largest, !can_win, guess))
        })
    }
}

/// Scan `useful` in parallel and keep the guess with the highest rank
///
/// Ranks include the guess index, so the winner doesn't depend on scheduling.
fn select_best<O, K, F>(
    possible: &[usize],
    useful: &[usize],
    oracle: &O,
    rank: F,
) -> Result<Option<Selection>, OracleError>
where
    O: ScoreOracle + ?Sized,
    K: Ord + Send,
    F: Fn(PartitionStats, bool, usize) -> K + Sync,
{
    let can_win: FxHashSet<usize> = possible.iter().copied().collect();

    let ranked = useful
        .par_iter()
        .map(|&guess| {
            let stats = PartitionStats::measure(guess, possible, oracle)?;
            Ok((rank(stats, can_win.contains(&guess), guess), guess))
        })
        .collect::<Result<Vec<_>, OracleError>>()?;

    let Some((_, guess)) = ranked.into_iter().max_by(|a, b| a.0.cmp(&b.0)) else {
        return Ok(None);
    };

    let partitions = group_by_grade(guess, possible, oracle)?;
    Ok(Some(Selection { guess, partitions }))
}
