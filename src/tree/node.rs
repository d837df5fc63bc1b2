//! Strategy tree nodes

use crate::core::GradeCode;

/// A node of a strategy tree
///
/// Indices refer to the vocabulary: a `Decision` names the word to guess,
/// a `Leaf` names the only solution left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// The solution is known
    Leaf(usize),
    /// Guess `guess`, then follow the branch matching the grade shown
    Decision { guess: usize, children: Vec<Branch> },
}

/// Edge from a decision to the subtree for one grade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub grade: GradeCode,
    pub node: TreeNode,
}

impl Branch {
    #[must_use]
    pub const fn new(grade: GradeCode, node: TreeNode) -> Self {
        Self { grade, node }
    }
}

impl TreeNode {
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Word played at this node: the guess, or the known solution
    #[inline]
    #[must_use]
    pub const fn word(&self) -> usize {
        match self {
            Self::Leaf(solution) => *solution,
            Self::Decision { guess, .. } => *guess,
        }
    }

    /// Child branches, empty for a leaf
    #[must_use]
    pub fn children(&self) -> &[Branch] {
        match self {
            Self::Leaf(_) => &[],
            Self::Decision { children, .. } => children,
        }
    }

    /// Follow the branch for `grade`
    #[must_use]
    pub fn child(&self, grade: GradeCode) -> Option<&Self> {
        self.children()
            .iter()
            .find(|branch| branch.grade == grade)
            .map(|branch| &branch.node)
    }

    /// Every solution index the tree resolves, in traversal order
    ///
    /// A decision reached by its own guess (a `PERFECT` child) contributes its
    /// leaf like any other.
    #[must_use]
    pub fn solutions(&self) -> Vec<usize> {
        let mut found = Vec::new();
        self.collect_solutions(&mut found);
        found
    }

    fn collect_solutions(&self, found: &mut Vec<usize>) {
        match self {
            Self::Leaf(solution) => found.push(*solution),
            Self::Decision { children, .. } => {
                for branch in children {
                    branch.node.collect_solutions(found);
                }
            }
        }
    }

    /// Number of nodes, leaves included
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|branch| branch.node.node_count())
            .sum::<usize>()
    }

    /// Longest path from this node to a leaf, in edges
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|branch| 1 + branch.node.depth())
            .max()
            .unwrap_or(0)
    }
}
