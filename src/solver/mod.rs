//! Tree construction
//!
//! Heuristics choose guesses, the builder turns their partitions into a
//! complete strategy tree.

mod builder;
mod error;
pub mod heuristic;
pub mod partition;

pub use builder::{TreeBuilder, build_tree};
pub use error::BuildError;
pub use heuristic::{
    BasicHeuristic, FastHeuristic, Heuristic, HeuristicType, SafeHeuristic, Selection,
    UnknownHeuristic,
};
pub use partition::{PartitionStats, Partitions, group_by_grade};
