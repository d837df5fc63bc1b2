//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_batch_report, print_oracle_report, print_scores_written, print_stats, print_tree_report,
};
