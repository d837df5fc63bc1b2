//! Strategy tree construction
//!
//! Each call works on the solutions still possible, the words still worth
//! guessing and the evidence gathered so far. Branches never share mutable
//! state: every child gets its own derived filter and pruned guess pool.

use super::error::BuildError;
use super::heuristic::{Heuristic, Selection};
use super::partition::{Partitions, group_by_grade};
use crate::core::{Filter, GradeCode, Vocabulary, Word};
use crate::oracle::{OracleError, ScoreOracle};
use crate::tree::{Branch, TreeNode};
use indicatif::ProgressBar;

/// Builds strategy trees over one vocabulary, oracle and heuristic
pub struct TreeBuilder<'a, O: ScoreOracle + ?Sized, H: Heuristic> {
    vocabulary: &'a Vocabulary,
    oracle: &'a O,
    heuristic: &'a H,
    progress: Option<ProgressBar>,
}

impl<'a, O: ScoreOracle + ?Sized, H: Heuristic> TreeBuilder<'a, O, H> {
    /// Create a builder, checking the oracle covers the vocabulary
    ///
    /// # Errors
    /// Returns `BuildError::EmptySolutions` for a vocabulary without solutions
    /// and `BuildError::Oracle` if the oracle has the wrong dimensions.
    pub fn new(
        vocabulary: &'a Vocabulary,
        oracle: &'a O,
        heuristic: &'a H,
    ) -> Result<Self, BuildError> {
        if vocabulary.solution_count() == 0 {
            return Err(BuildError::EmptySolutions);
        }
        oracle.check_against(vocabulary)?;

        Ok(Self {
            vocabulary,
            oracle,
            heuristic,
            progress: None,
        })
    }

    /// Tick `progress` once per node built
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Build the tree for every solution
    ///
    /// With an opening the first guess is fixed; without one the heuristic
    /// chooses it like any other move. A lone solution is always a `Leaf`.
    ///
    /// # Errors
    /// Returns `BuildError::UnknownOpening` for an opening outside the
    /// vocabulary, and any error raised while building.
    pub fn build(&self, opening: Option<usize>) -> Result<TreeNode, BuildError> {
        let possible = self.vocabulary.solution_indices();
        let useful = self.vocabulary.all_indices();
        let filter = Filter::new();

        match opening {
            None => self.next_move(possible, &useful, &filter),
            Some(guess) => {
                let word = self
                    .vocabulary
                    .word(guess)
                    .ok_or(BuildError::UnknownOpening(guess))?;
                if let [solution] = *possible.as_slice() {
                    self.tick();
                    return Ok(TreeNode::Leaf(solution));
                }
                self.tick();
                let partitions = group_by_grade(guess, &possible, self.oracle)?;
                self.decide(guess, word, partitions, &useful, &filter)
            }
        }
    }

    fn next_move(
        &self,
        possible: Vec<usize>,
        useful: &[usize],
        filter: &Filter,
    ) -> Result<TreeNode, BuildError> {
        self.tick();

        match *possible.as_slice() {
            [] => Err(BuildError::EmptySolutions),
            [solution] => Ok(TreeNode::Leaf(solution)),
            // Guess the first; if it misses, the grade names the second
            [first, second] => {
                let miss = self.oracle.get(second, first)?;
                Ok(TreeNode::Decision {
                    guess: first,
                    children: vec![
                        Branch::new(GradeCode::PERFECT, TreeNode::Leaf(first)),
                        Branch::new(miss, TreeNode::Leaf(second)),
                    ],
                })
            }
            _ => {
                let remaining = possible.len();
                let Some(Selection { guess, partitions }) =
                    self.heuristic.select(&possible, useful, self.oracle)?
                else {
                    return Err(BuildError::EmptyGuessPool { remaining });
                };

                if partitions.values().any(|group| group.len() == remaining) {
                    return Err(BuildError::NoProgress { guess, remaining });
                }

                let word = self.vocabulary.word(guess).ok_or(OracleError::OutOfRange {
                    solution: possible[0],
                    guess,
                })?;
                self.decide(guess, word, partitions, useful, filter)
            }
        }
    }

    /// Build one branch per grade, most informative grade first
    fn decide(
        &self,
        guess: usize,
        word: &Word,
        partitions: Partitions,
        useful: &[usize],
        filter: &Filter,
    ) -> Result<TreeNode, BuildError> {
        let mut children = Vec::with_capacity(partitions.len());

        for (code, group) in partitions.into_iter().rev() {
            let node = if group.len() <= 2 {
                // Unique and pair states never consult the guess pool
                self.next_move(group, &[], filter)?
            } else {
                let next = filter
                    .derive(word, code.decode())
                    .map_err(|source| BuildError::Constraint {
                        guess,
                        grade: code,
                        source,
                    })?;
                let pruned = self.prune(useful, &next);
                self.next_move(group, &pruned, &next)?
            };
            children.push(Branch::new(code, node));
        }

        Ok(TreeNode::Decision { guess, children })
    }

    /// Words of `useful` still consistent with `filter`
    fn prune(&self, useful: &[usize], filter: &Filter) -> Vec<usize> {
        useful
            .iter()
            .copied()
            .filter(|&index| {
                self.vocabulary
                    .candidate(index)
                    .is_some_and(|candidate| candidate.satisfies(filter))
            })
            .collect()
    }

    fn tick(&self) {
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
    }
}

/// Build the tree opening with vocabulary word `opening`
///
/// # Errors
/// Returns any [`BuildError`] raised while validating or building.
///
/// # Examples
/// ```
/// use wordle_tree::core::{Vocabulary, Word};
/// use wordle_tree::oracle::ScoreMatrix;
/// use wordle_tree::solver::{HeuristicType, build_tree};
///
/// let words = ["cigar", "rebut", "sissy", "humph", "awake"]
///     .map(|w| Word::new(w).unwrap())
///     .to_vec();
/// let vocabulary = Vocabulary::from_solutions(words).unwrap();
/// let oracle = ScoreMatrix::compute(&vocabulary);
///
/// let tree = build_tree(0, &vocabulary, &oracle, &HeuristicType::Fast).unwrap();
/// let mut solved = tree.solutions();
/// solved.sort_unstable();
/// assert_eq!(solved, vec![0, 1, 2, 3, 4]);
/// ```
pub fn build_tree<O: ScoreOracle + ?Sized, H: Heuristic>(
    opening: usize,
    vocabulary: &Vocabulary,
    oracle: &O,
    heuristic: &H,
) -> Result<TreeNode, BuildError> {
    TreeBuilder::new(vocabulary, oracle, heuristic)?.build(Some(opening))
}
