//! Score table persistence
//!
//! The table is stored as a JSON array of rows, `table[solution][guess]`.
//! A missing or unreadable table is a cache miss: the caller recomputes it.

use super::{OracleError, ScoreMatrix};
use crate::core::{GradeCode, Vocabulary};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Where a score table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreSource {
    /// Read from the given file
    Loaded,
    /// Computed because no path was given or loading failed
    Computed { reason: Option<OracleError> },
}

impl ScoreMatrix {
    /// Read a persisted table and check it against the vocabulary
    ///
    /// # Errors
    /// Returns `OracleError::Unavailable` if the file can't be read,
    /// `OracleError::Corrupt` if it isn't a table of grade codes, and
    /// `OracleError::DimensionMismatch` if it doesn't fit the vocabulary.
    pub fn load(path: &Path, vocabulary: &Vocabulary) -> Result<Self, OracleError> {
        let content = fs::read_to_string(path).map_err(|e| OracleError::Unavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let rows: Vec<Vec<GradeCode>> =
            serde_json::from_str(&content).map_err(|e| OracleError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let matrix = Self::from_rows(rows)?;
        super::ScoreOracle::check_against(&matrix, vocabulary)?;
        Ok(matrix)
    }

    /// Write the table as JSON
    ///
    /// # Errors
    /// Returns an I/O error if the file can't be created or written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let rows: Vec<&[GradeCode]> = self.rows().collect();
        serde_json::to_writer(&mut writer, &rows)?;
        writer.flush()
    }

    /// Load the table from `path`, computing it when that fails
    ///
    /// Returns the table and where it came from.
    #[must_use]
    pub fn load_or_compute(path: Option<&Path>, vocabulary: &Vocabulary) -> (Self, ScoreSource) {
        let Some(path) = path else {
            return (
                Self::compute(vocabulary),
                ScoreSource::Computed { reason: None },
            );
        };

        match Self::load(path, vocabulary) {
            Ok(matrix) => (matrix, ScoreSource::Loaded),
            Err(reason) => (
                Self::compute(vocabulary),
                ScoreSource::Computed {
                    reason: Some(reason),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::oracle::ScoreOracle;
    use std::path::PathBuf;

    fn vocabulary(list: &[&str]) -> Vocabulary {
        Vocabulary::from_solutions(list.iter().map(|w| Word::new(*w).unwrap()).collect())
            .unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "wordle_tree_{}_{name}.json",
            std::process::id()
        ))
    }

    #[test]
    fn save_then_load_round_trip() {
        let vocabulary = vocabulary(&["cigar", "rebut", "sissy", "humph"]);
        let matrix = ScoreMatrix::compute(&vocabulary);
        let path = temp_path("round_trip");

        matrix.save(&path).unwrap();
        let loaded = ScoreMatrix::load(&path, &vocabulary).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, matrix);
    }

    #[test]
    fn saved_format_is_nested_arrays() {
        let vocabulary = vocabulary(&["abcde", "fghij"]);
        let path = temp_path("format");

        ScoreMatrix::compute(&vocabulary).save(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(content, "[[242,0],[0,242]]");
    }

    #[test]
    fn missing_file_falls_back_to_compute() {
        let vocabulary = vocabulary(&["cigar", "rebut"]);
        let path = temp_path("missing");

        let (matrix, source) = ScoreMatrix::load_or_compute(Some(&path), &vocabulary);

        assert_eq!(matrix.solution_count(), 2);
        assert!(matches!(
            source,
            ScoreSource::Computed {
                reason: Some(OracleError::Unavailable { .. })
            }
        ));
    }

    #[test]
    fn corrupt_file_falls_back_to_compute() {
        let vocabulary = vocabulary(&["cigar", "rebut"]);
        let path = temp_path("corrupt");
        fs::write(&path, "[[242, 999]]").unwrap();

        let (matrix, source) = ScoreMatrix::load_or_compute(Some(&path), &vocabulary);
        fs::remove_file(&path).ok();

        assert_eq!(matrix, ScoreMatrix::compute(&vocabulary));
        assert!(matches!(
            source,
            ScoreSource::Computed {
                reason: Some(OracleError::Corrupt { .. })
            }
        ));
    }

    #[test]
    fn wrong_shape_falls_back_to_compute() {
        let small = vocabulary(&["cigar"]);
        let large = vocabulary(&["cigar", "rebut"]);
        let path = temp_path("shape");
        ScoreMatrix::compute(&small).save(&path).unwrap();

        let (matrix, source) = ScoreMatrix::load_or_compute(Some(&path), &large);
        fs::remove_file(&path).ok();

        assert_eq!(matrix.guess_count(), 2);
        assert!(matches!(
            source,
            ScoreSource::Computed {
                reason: Some(OracleError::DimensionMismatch { .. })
            }
        ));
    }

    #[test]
    fn only_unreadable_tables_count_as_missing() {
        let path = PathBuf::from("scores.json");
        let unavailable = OracleError::Unavailable {
            path: path.clone(),
            reason: "not found".into(),
        };
        let corrupt = OracleError::Corrupt {
            path,
            reason: "expected value".into(),
        };
        let mismatch = OracleError::DimensionMismatch {
            expected: (2, 2),
            found: (1, 1),
        };

        assert!(unavailable.is_missing());
        assert!(!corrupt.is_missing());
        assert!(!mismatch.is_missing());
        assert!(!OracleError::OutOfRange { solution: 0, guess: 0 }.is_missing());
    }

    #[test]
    fn no_path_computes() {
        let vocabulary = vocabulary(&["cigar"]);
        let (_, source) = ScoreMatrix::load_or_compute(None, &vocabulary);
        assert_eq!(source, ScoreSource::Computed { reason: None });
    }
}
