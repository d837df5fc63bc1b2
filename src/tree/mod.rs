//! Strategy trees
//!
//! The tree model, its nested-array persistence format, and quality metrics.

pub mod analytics;
mod format;
mod node;

pub use analytics::{MAX_GUESSES, NodeStats, TreeSummary, analyze};
pub use format::{ROOT_EDGE, TreeFormatError};
pub use node::{Branch, TreeNode};
