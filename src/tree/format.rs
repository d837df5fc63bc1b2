//! Nested-array persistence format
//!
//! A decision is `[edge, guess, [children...]]` and a leaf is
//! `[edge, solution]`, where `edge` is the grade code of the branch leading
//! to the node. The root has no incoming branch and uses edge `-1`.

use super::node::{Branch, TreeNode};
use crate::core::GradeCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Edge value written for the root node
pub const ROOT_EDGE: i16 = -1;

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Decision(i16, usize, Vec<RawNode>),
    Leaf(i16, usize),
}

/// Errors reading or writing a persisted tree
#[derive(Debug)]
pub enum TreeFormatError {
    Io(io::Error),
    Json(serde_json::Error),
    /// Child edge is not a grade code
    InvalidEdge(i16),
    /// Root edge is not `-1`
    RootEdge(i16),
}

impl fmt::Display for TreeFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "Malformed tree: {e}"),
            Self::InvalidEdge(edge) => write!(f, "Invalid grade code {edge} on a branch"),
            Self::RootEdge(edge) => write!(f, "Root edge must be {ROOT_EDGE}, found {edge}"),
        }
    }
}

impl std::error::Error for TreeFormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidEdge(_) | Self::RootEdge(_) => None,
        }
    }
}

impl From<io::Error> for TreeFormatError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TreeFormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl RawNode {
    fn from_node(edge: i16, node: &TreeNode) -> Self {
        match node {
            TreeNode::Leaf(solution) => Self::Leaf(edge, *solution),
            TreeNode::Decision { guess, children } => Self::Decision(
                edge,
                *guess,
                children
                    .iter()
                    .map(|branch| Self::from_node(i16::from(branch.grade.value()), &branch.node))
                    .collect(),
            ),
        }
    }

    const fn edge(&self) -> i16 {
        match self {
            Self::Decision(edge, ..) | Self::Leaf(edge, _) => *edge,
        }
    }

    fn into_node(self) -> Result<TreeNode, TreeFormatError> {
        match self {
            Self::Leaf(_, solution) => Ok(TreeNode::Leaf(solution)),
            Self::Decision(_, guess, children) => {
                let children = children
                    .into_iter()
                    .map(|child| {
                        let grade = edge_code(child.edge())?;
                        Ok(Branch::new(grade, child.into_node()?))
                    })
                    .collect::<Result<_, TreeFormatError>>()?;
                Ok(TreeNode::Decision { guess, children })
            }
        }
    }
}

fn edge_code(edge: i16) -> Result<GradeCode, TreeFormatError> {
    u8::try_from(edge)
        .ok()
        .and_then(|value| GradeCode::try_from(value).ok())
        .ok_or(TreeFormatError::InvalidEdge(edge))
}

impl TreeNode {
    /// Serialize as a root tree in the nested-array format
    ///
    /// # Errors
    /// Returns `TreeFormatError::Json` if serialization fails.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::GradeCode;
    /// use wordle_tree::tree::{Branch, TreeNode};
    ///
    /// let tree = TreeNode::Decision {
    ///     guess: 0,
    ///     children: vec![
    ///         Branch::new(GradeCode::PERFECT, TreeNode::Leaf(0)),
    ///         Branch::new(GradeCode::ALL_ABSENT, TreeNode::Leaf(1)),
    ///     ],
    /// };
    /// assert_eq!(tree.to_json().unwrap(), "[-1,0,[[242,0],[0,1]]]");
    /// ```
    pub fn to_json(&self) -> Result<String, TreeFormatError> {
        Ok(serde_json::to_string(&RawNode::from_node(ROOT_EDGE, self))?)
    }

    /// Parse a root tree from the nested-array format
    ///
    /// # Errors
    /// Returns `TreeFormatError::Json` for malformed input, and
    /// `InvalidEdge`/`RootEdge` for edges outside the grade codes.
    pub fn from_json(json: &str) -> Result<Self, TreeFormatError> {
        let raw: RawNode = serde_json::from_str(json)?;
        if raw.edge() != ROOT_EDGE {
            return Err(TreeFormatError::RootEdge(raw.edge()));
        }
        raw.into_node()
    }

    /// Write the tree to `path`, creating parent directories
    ///
    /// # Errors
    /// Returns an I/O or serialization error.
    pub fn save(&self, path: &Path) -> Result<(), TreeFormatError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a tree written by [`TreeNode::save`]
    ///
    /// # Errors
    /// Returns an I/O error or a format error.
    pub fn load(path: &Path) -> Result<Self, TreeFormatError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
