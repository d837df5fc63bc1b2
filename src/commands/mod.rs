//! Command implementations

pub mod analyze;
pub mod build;
pub mod scores;

pub use analyze::{TreeReport, analyze_tree_file};
pub use build::{
    BatchReport, BuildConfig, BuiltTree, RootFailure, build_roots, range_roots, resolve_words,
};
pub use scores::{ActiveOracle, OracleReport, compute_scores, prepare_oracle};
