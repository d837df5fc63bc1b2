//! Score table preparation
//!
//! Loads the persisted table when it fits the vocabulary, otherwise computes
//! it and writes it back so the next run can skip the work.

use super::BuildConfig;
use crate::core::{GradeCode, Vocabulary};
use crate::oracle::{OnDemandOracle, OracleError, ScoreMatrix, ScoreOracle, ScoreSource};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};

/// Oracle selected at run time
pub enum ActiveOracle<'a> {
    Matrix(ScoreMatrix),
    OnDemand(OnDemandOracle<'a>),
}

impl ScoreOracle for ActiveOracle<'_> {
    #[inline]
    fn get(&self, solution: usize, guess: usize) -> Result<GradeCode, OracleError> {
        match self {
            Self::Matrix(m) => m.get(solution, guess),
            Self::OnDemand(o) => o.get(solution, guess),
        }
    }

    fn solution_count(&self) -> usize {
        match self {
            Self::Matrix(m) => m.solution_count(),
            Self::OnDemand(o) => o.solution_count(),
        }
    }

    fn guess_count(&self) -> usize {
        match self {
            Self::Matrix(m) => m.guess_count(),
            Self::OnDemand(o) => o.guess_count(),
        }
    }
}

/// How the score table was obtained
#[derive(Debug)]
pub struct OracleReport {
    pub source: Option<ScoreSource>,
    /// Table written to this path after computing it
    pub saved: Option<std::path::PathBuf>,
    pub elapsed: Duration,
}

/// Prepare the oracle a build will read from
///
/// With `on_demand` no table is built. Otherwise the table at `scores_path`
/// is loaded, or computed when it can't be used. A computed table is only
/// written when no file exists at `scores_path` yet.
///
/// # Errors
/// Returns an error if a freshly computed table can't be written.
pub fn prepare_oracle<'a>(
    vocabulary: &'a Vocabulary,
    config: &BuildConfig,
) -> Result<(ActiveOracle<'a>, OracleReport)> {
    let start = Instant::now();

    if config.on_demand {
        let report = OracleReport {
            source: None,
            saved: None,
            elapsed: start.elapsed(),
        };
        return Ok((ActiveOracle::OnDemand(OnDemandOracle::new(vocabulary)), report));
    }

    let spinner = spinner(format!(
        "Preparing scores for {} solutions x {} words",
        vocabulary.solution_count(),
        vocabulary.len()
    ));
    let (matrix, source) = ScoreMatrix::load_or_compute(config.scores_path.as_deref(), vocabulary);
    spinner.finish_and_clear();

    // A table that exists but doesn't fit this vocabulary is left alone
    let saved = match (&source, &config.scores_path) {
        (ScoreSource::Computed { reason }, Some(path))
            if reason.as_ref().is_none_or(OracleError::is_missing) && !path.exists() =>
        {
            save_matrix(&matrix, path)?;
            Some(path.clone())
        }
        _ => None,
    };

    let report = OracleReport {
        source: Some(source),
        saved,
        elapsed: start.elapsed(),
    };
    Ok((ActiveOracle::Matrix(matrix), report))
}

/// Compute the score table from scratch and write it to `path`
///
/// # Errors
/// Returns an error if the table can't be written.
pub fn compute_scores(vocabulary: &Vocabulary, path: &Path) -> Result<(ScoreMatrix, Duration)> {
    let start = Instant::now();
    let spinner = spinner(format!(
        "Grading {} words against {} solutions",
        vocabulary.len(),
        vocabulary.solution_count()
    ));
    let matrix = ScoreMatrix::compute(vocabulary);
    spinner.finish_and_clear();

    save_matrix(&matrix, path)?;
    Ok((matrix, start.elapsed()))
}

fn save_matrix(matrix: &ScoreMatrix, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    matrix
        .save(path)
        .with_context(|| format!("Failed to write score table {}", path.display()))
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} {msg} ({elapsed})")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use std::fs;

    fn vocabulary() -> Vocabulary {
        let words = ["cigar", "rebut", "sissy"]
            .map(|w| Word::new(w).unwrap())
            .to_vec();
        Vocabulary::from_solutions(words).unwrap()
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("wordle_tree_{}_{name}", std::process::id()))
            .join("scores.json")
    }

    #[test]
    fn computes_then_reuses_table() {
        let vocabulary = vocabulary();
        let path = temp_path("prepare");
        let config = BuildConfig {
            scores_path: Some(path.clone()),
            ..BuildConfig::default()
        };

        let (first, report) = prepare_oracle(&vocabulary, &config).unwrap();
        assert!(matches!(report.source, Some(ScoreSource::Computed { .. })));
        assert_eq!(report.saved.as_deref(), Some(path.as_path()));

        let (second, report) = prepare_oracle(&vocabulary, &config).unwrap();
        assert_eq!(report.source, Some(ScoreSource::Loaded));
        assert!(report.saved.is_none());
        fs::remove_dir_all(path.parent().unwrap()).ok();

        assert_eq!(first.get(0, 2).unwrap(), second.get(0, 2).unwrap());
    }

    #[test]
    fn mismatched_table_is_left_untouched() {
        let path = temp_path("mismatch");
        let larger = Vocabulary::from_solutions(
            ["cigar", "rebut", "sissy", "humph"]
                .map(|w| Word::new(w).unwrap())
                .to_vec(),
        )
        .unwrap();
        compute_scores(&larger, &path).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let vocabulary = vocabulary();
        let config = BuildConfig {
            scores_path: Some(path.clone()),
            ..BuildConfig::default()
        };
        let (oracle, report) = prepare_oracle(&vocabulary, &config).unwrap();
        let after = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(path.parent().unwrap()).ok();

        assert!(matches!(
            report.source,
            Some(ScoreSource::Computed {
                reason: Some(OracleError::DimensionMismatch { .. })
            })
        ));
        assert!(report.saved.is_none());
        assert_eq!(after, before);
        assert_eq!(oracle.solution_count(), 3);
    }

    #[test]
    fn corrupt_table_is_left_untouched() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not a table").unwrap();

        let vocabulary = vocabulary();
        let config = BuildConfig {
            scores_path: Some(path.clone()),
            ..BuildConfig::default()
        };
        let (_, report) = prepare_oracle(&vocabulary, &config).unwrap();
        let after = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(path.parent().unwrap()).ok();

        assert!(report.saved.is_none());
        assert_eq!(after, "not a table");
    }

    #[test]
    fn on_demand_skips_table() {
        let vocabulary = vocabulary();
        let config = BuildConfig {
            on_demand: true,
            scores_path: Some(temp_path("unused")),
            ..BuildConfig::default()
        };

        let (oracle, report) = prepare_oracle(&vocabulary, &config).unwrap();
        assert!(matches!(oracle, ActiveOracle::OnDemand(_)));
        assert!(report.source.is_none());
        assert!(oracle.get(1, 1).unwrap().is_perfect());
    }

    #[test]
    fn compute_scores_writes_file() {
        let vocabulary = vocabulary();
        let path = temp_path("compute");

        let (matrix, _) = compute_scores(&vocabulary, &path).unwrap();
        let loaded = ScoreMatrix::load(&path, &vocabulary).unwrap();
        fs::remove_dir_all(path.parent().unwrap()).ok();

        assert_eq!(loaded, matrix);
    }
}
