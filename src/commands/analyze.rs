//! Saved tree analysis
//!
//! Reads trees written by a batch build and reports how many guesses each
//! solution takes.

use crate::core::Vocabulary;
use crate::tree::{NodeStats, TreeNode, analyze};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Quality report for one saved tree
#[derive(Debug, Clone)]
pub struct TreeReport {
    pub path: PathBuf,
    pub opening: String,
    pub stats: NodeStats,
    /// Every solution of the vocabulary appears exactly once
    pub complete: bool,
}

/// Load a saved tree and measure it against the vocabulary
///
/// # Errors
/// Returns an error if the file can't be read or parsed, or the tree refers
/// to words outside the vocabulary.
pub fn analyze_tree_file(path: &Path, vocabulary: &Vocabulary) -> Result<TreeReport> {
    let tree = TreeNode::load(path).with_context(|| format!("Failed to load {}", path.display()))?;

    let opening = vocabulary
        .word(tree.word())
        .with_context(|| {
            format!(
                "{} opens with word #{}, outside the vocabulary",
                path.display(),
                tree.word()
            )
        })?
        .text()
        .to_string();

    let mut solved = tree.solutions();
    solved.sort_unstable();
    let complete = solved == vocabulary.solution_indices();

    Ok(TreeReport {
        path: path.to_path_buf(),
        opening,
        stats: analyze(&tree),
        complete,
    })
}
