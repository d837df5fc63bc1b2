//! Wordle Tree
//!
//! Precomputes complete Wordle strategy trees: for a fixed opening word, a
//! tree that names the next guess for every grade sequence until each
//! solution is found.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordle_tree::core::{Vocabulary, Word};
//! use wordle_tree::oracle::ScoreMatrix;
//! use wordle_tree::solver::{HeuristicType, build_tree};
//! use wordle_tree::tree::analyze;
//!
//! let solutions = ["cigar", "rebut", "sissy", "humph"]
//!     .map(|w| Word::new(w).unwrap())
//!     .to_vec();
//! let vocabulary = Vocabulary::from_solutions(solutions).unwrap();
//! let oracle = ScoreMatrix::compute(&vocabulary);
//!
//! let tree = build_tree(0, &vocabulary, &oracle, &HeuristicType::Fast).unwrap();
//! println!("{}", tree.to_json().unwrap());
//! println!("{}", analyze(&tree).summary());
//! ```

// Core domain types
pub mod core;

// Grade lookup tables
pub mod oracle;

// Tree construction
pub mod solver;

// Strategy trees, persistence and analytics
pub mod tree;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
