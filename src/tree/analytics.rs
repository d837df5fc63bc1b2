//! Tree quality metrics
//!
//! Walks a strategy tree and counts how many solutions are found in exactly
//! `k` guesses. The opening guess is move 1.

use super::node::TreeNode;
use std::fmt;

/// Default move budget of the game
pub const MAX_GUESSES: usize = 6;

/// Solutions covered by a subtree and when each is found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Number of solutions the subtree resolves
    pub size: usize,
    /// `histogram[k]` solutions are found with exactly `k` guesses
    pub histogram: Vec<usize>,
    /// The node's own guess can be the answer
    pub can_win: bool,
}

impl NodeStats {
    fn record(&mut self, moves: usize, count: usize) {
        if self.histogram.len() <= moves {
            self.histogram.resize(moves + 1, 0);
        }
        self.histogram[moves] += count;
    }

    fn merge(&mut self, other: &Self) {
        for (moves, &count) in other.histogram.iter().enumerate() {
            if count > 0 {
                self.record(moves, count);
            }
        }
        self.size += other.size;
    }

    /// Aggregate report for the whole tree
    #[must_use]
    pub fn summary(&self) -> TreeSummary {
        TreeSummary::from_histogram(&self.histogram)
    }
}

/// Compute the move histogram of a tree rooted at the opening guess
///
/// A `PERFECT` branch means the decision's own guess was the answer, found at
/// that decision's move. Any other leaf is the last candidate left and costs
/// one more guess.
///
/// # Examples
/// ```
/// use wordle_tree::core::GradeCode;
/// use wordle_tree::tree::{Branch, TreeNode, analyze};
///
/// let tree = TreeNode::Decision {
///     guess: 0,
///     children: vec![
///         Branch::new(GradeCode::PERFECT, TreeNode::Leaf(0)),
///         Branch::new(GradeCode::ALL_ABSENT, TreeNode::Leaf(1)),
///     ],
/// };
/// let stats = analyze(&tree);
/// assert_eq!(stats.size, 2);
/// assert_eq!(stats.histogram, vec![0, 1, 1]);
/// ```
#[must_use]
pub fn analyze(root: &TreeNode) -> NodeStats {
    match root {
        // Only possible when a single solution exists: guessed directly
        TreeNode::Leaf(_) => {
            let mut stats = NodeStats {
                size: 1,
                can_win: true,
                ..NodeStats::default()
            };
            stats.record(1, 1);
            stats
        }
        TreeNode::Decision { .. } => walk(root, 1),
    }
}

fn walk(node: &TreeNode, moves: usize) -> NodeStats {
    let mut stats = NodeStats::default();

    for branch in node.children() {
        if branch.grade.is_perfect() {
            stats.can_win = true;
            continue;
        }
        match &branch.node {
            TreeNode::Leaf(_) => {
                stats.record(moves + 1, 1);
                stats.size += 1;
            }
            decision @ TreeNode::Decision { .. } => stats.merge(&walk(decision, moves + 1)),
        }
    }

    if stats.can_win {
        stats.record(moves, 1);
        stats.size += 1;
    }
    stats
}

/// Summary figures derived from a move histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSummary {
    pub solutions: usize,
    pub total_guesses: usize,
    pub average: f64,
    pub worst_case: usize,
    /// Solutions found within [`MAX_GUESSES`]
    pub within_budget: usize,
}

impl TreeSummary {
    #[must_use]
    pub fn from_histogram(histogram: &[usize]) -> Self {
        let solutions: usize = histogram.iter().sum();
        let total_guesses: usize = histogram
            .iter()
            .enumerate()
            .map(|(moves, count)| moves * count)
            .sum();
        let worst_case = histogram.iter().rposition(|&count| count > 0).unwrap_or(0);
        let within_budget = histogram.iter().take(MAX_GUESSES + 1).sum();

        let average = if solutions == 0 {
            0.0
        } else {
            total_guesses as f64 / solutions as f64
        };

        Self {
            solutions,
            total_guesses,
            average,
            worst_case,
            within_budget,
        }
    }

    /// Solutions not found within the move budget
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.solutions - self.within_budget
    }
}

impl fmt::Display for TreeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} solutions, {:.4} avg, worst {}, {}/{} within {MAX_GUESSES}",
            self.solutions, self.average, self.worst_case, self.within_budget, self.solutions
        )
    }
}
