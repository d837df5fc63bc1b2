//! Batch tree building
//!
//! Builds one tree per opening word. Openings are independent, so they run
//! in parallel against the shared oracle. A root that fails on its own is
//! reported and skipped; an error that puts the oracle in doubt stops the run.

use crate::core::Vocabulary;
use crate::oracle::ScoreOracle;
use crate::solver::{BuildError, HeuristicType, TreeBuilder};
use crate::tree::{NodeStats, TreeNode, analyze};
use anyhow::{Context, Result, anyhow, bail};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Configuration for a batch of tree builds
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub heuristic: HeuristicType,
    /// Write trees to disk, otherwise keep them for printing
    pub save: bool,
    pub output_dir: PathBuf,
    pub scores_path: Option<PathBuf>,
    pub on_demand: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicType::default(),
            save: true,
            output_dir: PathBuf::from("graphs"),
            scores_path: None,
            on_demand: false,
        }
    }
}

impl BuildConfig {
    /// Where the tree for `word` is saved: `<output_dir>/<heuristic>/<word>.json`
    #[must_use]
    pub fn tree_path(&self, word: &str) -> PathBuf {
        self.output_dir
            .join(self.heuristic.name())
            .join(format!("{word}.json"))
    }
}

/// A tree built for one opening
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub opening: usize,
    pub word: String,
    pub tree: TreeNode,
    pub stats: NodeStats,
    /// File the tree was written to, if saved
    pub path: Option<PathBuf>,
    pub elapsed: Duration,
}

/// An opening that couldn't be built
#[derive(Debug, Clone)]
pub struct RootFailure {
    pub word: String,
    pub error: BuildError,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub built: Vec<BuiltTree>,
    pub failed: Vec<RootFailure>,
    pub total_time: Duration,
}

/// Vocabulary indices `start..end`
///
/// # Errors
/// Returns an error if the range is reversed or runs past the vocabulary.
pub fn range_roots(vocabulary: &Vocabulary, start: usize, end: usize) -> Result<Range<usize>> {
    if start > end {
        bail!("Range start {start} is after its end {end}");
    }
    if end > vocabulary.len() {
        bail!(
            "Range end {end} is past the vocabulary ({} words)",
            vocabulary.len()
        );
    }
    Ok(start..end)
}

/// Resolve words to vocabulary indices
///
/// Unknown words become failures so the rest of the batch can still run.
#[must_use]
pub fn resolve_words<S: AsRef<str>>(
    vocabulary: &Vocabulary,
    words: &[S],
) -> (Vec<usize>, Vec<RootFailure>) {
    let mut roots = Vec::with_capacity(words.len());
    let mut failed = Vec::new();

    for word in words {
        let word = word.as_ref();
        match vocabulary.index_of(word) {
            Some(index) => roots.push(index),
            None => failed.push(RootFailure {
                word: word.to_string(),
                error: BuildError::UnknownWord(word.to_lowercase()),
            }),
        }
    }

    (roots, failed)
}

/// Build a tree for every opening in `roots`
///
/// # Errors
/// Returns an error if a fatal [`BuildError`] occurs or a tree can't be saved.
pub fn build_roots<O: ScoreOracle + ?Sized>(
    roots: &[usize],
    vocabulary: &Vocabulary,
    oracle: &O,
    config: &BuildConfig,
) -> Result<BatchReport> {
    let start = Instant::now();
    let builder = TreeBuilder::new(vocabulary, oracle, &config.heuristic)
        .map_err(|e| anyhow!(e))
        .context("Score table doesn't match the word list")?;

    let progress = batch_progress(roots.len());
    // A lone root gets per-node progress instead
    let builder = if roots.len() == 1 {
        builder.with_progress(progress.clone())
    } else {
        builder
    };

    let outcomes = roots
        .par_iter()
        .map(|&opening| {
            let word = vocabulary
                .word(opening)
                .map_or_else(|| format!("#{opening}"), |w| w.text().to_string());
            progress.set_message(word.clone());

            let started = Instant::now();
            let outcome = match builder.build(Some(opening)) {
                Ok(tree) => {
                    let path = if config.save {
                        let path = config.tree_path(&word);
                        tree.save(&path)
                            .with_context(|| format!("Failed to save {}", path.display()))?;
                        Some(path)
                    } else {
                        None
                    };
                    Ok(BuiltTree {
                        opening,
                        stats: analyze(&tree),
                        tree,
                        word,
                        path,
                        elapsed: started.elapsed(),
                    })
                }
                Err(error) if error.is_fatal() => {
                    return Err(anyhow!(error).context(format!("Building tree for '{word}'")));
                }
                Err(error) => Err(RootFailure { word, error }),
            };

            if roots.len() > 1 {
                progress.inc(1);
            }
            Ok(outcome)
        })
        .collect::<Result<Vec<_>>>();

    progress.finish_and_clear();

    let mut report = BatchReport::default();
    for outcome in outcomes? {
        match outcome {
            Ok(built) => report.built.push(built),
            Err(failure) => report.failed.push(failure),
        }
    }
    report.total_time = start.elapsed();
    Ok(report)
}

fn batch_progress(roots: usize) -> ProgressBar {
    let (progress, template) = if roots == 1 {
        (
            ProgressBar::new_spinner(),
            "{spinner:.green} {msg} | {pos} nodes ({elapsed})",
        )
    } else {
        (
            ProgressBar::new(roots as u64),
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
        )
    };
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        progress.set_style(style.progress_chars("█▓▒░"));
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::oracle::{OracleError, ScoreMatrix};
    use std::fs;

    fn vocabulary() -> Vocabulary {
        let words = |list: &[&str]| list.iter().map(|w| Word::new(*w).unwrap()).collect();
        Vocabulary::new(
            words(&["cigar", "rebut", "sissy", "humph", "awake", "blush", "focal"]),
            words(&["slate", "crane"]),
        )
        .unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wordle_tree_{}_{name}", std::process::id()))
    }

    #[test]
    fn tree_path_uses_heuristic_prefix() {
        let config = BuildConfig {
            heuristic: HeuristicType::Safe,
            output_dir: PathBuf::from("out"),
            ..BuildConfig::default()
        };
        assert_eq!(
            config.tree_path("slate"),
            PathBuf::from("out").join("safe").join("slate.json")
        );
    }

    #[test]
    fn range_is_checked() {
        let vocabulary = vocabulary();
        assert_eq!(range_roots(&vocabulary, 2, 5).unwrap(), 2..5);
        assert_eq!(range_roots(&vocabulary, 0, 9).unwrap().len(), 9);
        assert!(range_roots(&vocabulary, 5, 2).is_err());
        assert!(range_roots(&vocabulary, 0, 10).is_err());
    }

    #[test]
    fn unknown_words_fail_alone() {
        let vocabulary = vocabulary();
        let (roots, failed) = resolve_words(&vocabulary, &["SLATE", "zzzzz", "cigar"]);
        assert_eq!(roots, vec![7, 0]);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].error, BuildError::UnknownWord("zzzzz".into()));
        assert!(!failed[0].error.is_fatal());
    }

    #[test]
    fn builds_without_saving() {
        let vocabulary = vocabulary();
        let oracle = ScoreMatrix::compute(&vocabulary);
        let config = BuildConfig {
            save: false,
            ..BuildConfig::default()
        };

        let report = build_roots(&[7, 8, 0], &vocabulary, &oracle, &config).unwrap();

        assert!(report.failed.is_empty());
        let words: Vec<&str> = report.built.iter().map(|b| b.word.as_str()).collect();
        assert_eq!(words, vec!["slate", "crane", "cigar"]);
        for built in &report.built {
            assert!(built.path.is_none());
            assert_eq!(built.stats.size, 7);
            assert_eq!(built.tree.word(), built.opening);
        }
    }

    #[test]
    fn saves_under_heuristic_directory() {
        let vocabulary = vocabulary();
        let oracle = ScoreMatrix::compute(&vocabulary);
        let dir = temp_dir("batch");
        let config = BuildConfig {
            heuristic: HeuristicType::Basic,
            output_dir: dir.clone(),
            ..BuildConfig::default()
        };

        let report = build_roots(&[7], &vocabulary, &oracle, &config).unwrap();
        let path = dir.join("basic").join("slate.json");
        let saved = TreeNode::load(&path).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(report.built[0].path.as_deref(), Some(path.as_path()));
        assert_eq!(saved, report.built[0].tree);
    }

    #[test]
    fn bad_opening_doesnt_stop_batch() {
        let vocabulary = vocabulary();
        let oracle = ScoreMatrix::compute(&vocabulary);
        let config = BuildConfig {
            save: false,
            ..BuildConfig::default()
        };

        let report = build_roots(&[1, 42, 2], &vocabulary, &oracle, &config).unwrap();
        assert_eq!(report.built.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].error, BuildError::UnknownOpening(42));
    }

    #[test]
    fn conflicting_root_is_reported_and_others_build() {
        let words = |list: &[&str]| list.iter().map(|w| Word::new(*w).unwrap()).collect();
        let vocabulary = Vocabulary::new(
            words(&["cigar", "rebut", "sissy", "humph", "focal"]),
            words(&["abcde", "afghi"]),
        )
        .unwrap();
        let code = |text: &str| crate::core::GradeCode::encode(text.parse().unwrap());

        let mut rows: Vec<Vec<_>> = (0..5)
            .map(|solution| {
                (0..7)
                    .map(|guess| {
                        if solution == guess {
                            code("CCCCC")
                        } else {
                            code("AAAAA")
                        }
                    })
                    .collect()
            })
            .collect();
        // abcde confirms a leading `a`, then afghi grades it absent
        for row in &mut rows {
            row[5] = code("CAAAA");
        }
        rows[3][6] = code("CAAAA");
        rows[4][6] = code("CAAAA");
        // humph tells apart what cigar leaves
        rows[2][3] = code("AAAAC");
        rows[4][3] = code("AAACA");
        let oracle = ScoreMatrix::from_rows(rows).unwrap();
        let config = BuildConfig {
            save: false,
            ..BuildConfig::default()
        };

        let report = build_roots(&[5, 0], &vocabulary, &oracle, &config).unwrap();

        assert_eq!(report.built.len(), 1);
        assert_eq!(report.built[0].word, "cigar");
        assert_eq!(report.built[0].stats.size, 5);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].word, "abcde");
        assert!(matches!(
            report.failed[0].error,
            BuildError::Constraint { guess: 6, .. }
        ));
    }

    /// Oracle that loses every grade for one solution
    struct Broken(ScoreMatrix);

    impl ScoreOracle for Broken {
        fn get(
            &self,
            solution: usize,
            guess: usize,
        ) -> std::result::Result<crate::core::GradeCode, OracleError> {
            if solution == 3 {
                Err(OracleError::OutOfRange { solution, guess })
            } else {
                self.0.get(solution, guess)
            }
        }

        fn solution_count(&self) -> usize {
            self.0.solution_count()
        }

        fn guess_count(&self) -> usize {
            self.0.guess_count()
        }
    }

    #[test]
    fn oracle_failure_stops_batch() {
        let vocabulary = vocabulary();
        let oracle = Broken(ScoreMatrix::compute(&vocabulary));
        let config = BuildConfig {
            save: false,
            ..BuildConfig::default()
        };

        assert!(build_roots(&[0, 1], &vocabulary, &oracle, &config).is_err());
    }
}
