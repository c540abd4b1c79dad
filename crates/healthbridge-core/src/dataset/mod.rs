//! Historical dataset loading and caching.
//!
//! The dataset is one immutable JSON document, read at most once per store
//! lifetime. Load failures degrade to an empty dataset instead of erroring,
//! so downstream matching always has something to work with.

mod convert;

pub use convert::*;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::HistoricalCase;

/// Dataset errors.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Owner of the cached historical case collection.
///
/// Replaces a module-global cache with an explicit object: the composition
/// root constructs one store and passes it by reference to matching calls.
/// Only successful loads are cached; a failed load is retried on the next
/// call.
pub struct DatasetStore {
    path: PathBuf,
    cache: Option<Vec<HistoricalCase>>,
}

impl DatasetStore {
    /// Create a store reading from the given JSON file. No I/O happens
    /// until the first `load`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: None,
        }
    }

    /// Create a store pre-seeded with records (for testing and for hosts
    /// that already hold the dataset in memory).
    pub fn from_cases(cases: Vec<HistoricalCase>) -> Self {
        Self {
            path: PathBuf::new(),
            cache: Some(cases),
        }
    }

    /// The full ordered case collection.
    ///
    /// Fetches and caches on first call; returns the cached slice
    /// afterwards. On failure returns an empty slice and leaves the cache
    /// unset so the next call retries.
    pub fn load(&mut self) -> &[HistoricalCase] {
        if self.cache.is_none() {
            match self.read_cases() {
                Ok(cases) => {
                    debug!(records = cases.len(), "dataset loaded");
                    self.cache = Some(cases);
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        path = %self.path.display(),
                        "dataset load failed, returning empty dataset"
                    );
                    return &[];
                }
            }
        }
        self.cache.as_deref().unwrap_or_default()
    }

    /// Whether a successful load is cached.
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Drop the cached dataset, forcing the next `load` to re-read.
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    fn read_cases(&self) -> DatasetResult<Vec<HistoricalCase>> {
        let content = fs::read_to_string(&self.path)?;
        parse_cases(&content)
    }
}

/// Parse a JSON array of case records, skipping invalid rows.
///
/// A record that fails typed deserialization or the load-time invariants
/// (empty symptoms, blank disease, confidence above 100) is dropped and
/// counted; one bad row never fails the batch. A document that is not a
/// JSON array is an error.
pub fn parse_cases(json: &str) -> DatasetResult<Vec<HistoricalCase>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;

    let mut cases = Vec::with_capacity(values.len());
    let mut skipped = 0usize;
    for value in values {
        match serde_json::from_value::<HistoricalCase>(value) {
            Ok(case) if case.is_valid() => cases.push(case),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = cases.len(), "dropped malformed case records");
    }

    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use std::io::Write;

    const VALID_JSON: &str = r#"[
        {"patientId": 1, "age": 34, "gender": "Female",
         "symptoms": ["fever", "cough"],
         "predictedDisease": "Flu", "severity": "Mild", "confidenceScore": 70},
        {"patientId": 2, "age": 58, "gender": "Male",
         "symptoms": ["chest pain"],
         "predictedDisease": "Angina", "severity": "Severe", "confidenceScore": 91}
    ]"#;

    #[test]
    fn test_parse_cases_valid() {
        let cases = parse_cases(VALID_JSON).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].predicted_disease, "Flu");
        assert_eq!(cases[1].severity, Severity::Severe);
    }

    #[test]
    fn test_parse_cases_skips_malformed_records() {
        let json = r#"[
            {"patientId": 1, "age": 34, "gender": "F",
             "symptoms": ["fever"],
             "predictedDisease": "Flu", "severity": "Mild", "confidenceScore": 70},
            {"patientId": 2, "age": 40, "gender": "M",
             "symptoms": [],
             "predictedDisease": "Cold", "severity": "Mild", "confidenceScore": 50},
            {"patientId": 3, "age": 29, "gender": "F",
             "symptoms": ["rash"],
             "predictedDisease": "Allergy", "severity": "Critical", "confidenceScore": 60},
            {"patientId": 4, "age": 61, "gender": "M",
             "symptoms": ["fatigue"],
             "predictedDisease": "Anemia", "severity": "Moderate", "confidenceScore": 150},
            {"patientId": "not-a-number", "age": 33, "gender": "F",
             "symptoms": ["nausea"],
             "predictedDisease": "Gastritis", "severity": "Mild", "confidenceScore": 55}
        ]"#;

        let cases = parse_cases(json).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].patient_id, 1);
    }

    #[test]
    fn test_parse_cases_rejects_non_array() {
        assert!(parse_cases(r#"{"patientId": 1}"#).is_err());
        assert!(parse_cases("not json at all").is_err());
    }

    #[test]
    fn test_load_missing_file_returns_empty_and_retries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symptom_dataset.json");

        let mut store = DatasetStore::new(&path);
        assert!(store.load().is_empty());
        assert!(!store.is_cached());

        // Failure was not cached: creating the file makes the next load work.
        fs::write(&path, VALID_JSON).unwrap();
        assert_eq!(store.load().len(), 2);
        assert!(store.is_cached());
    }

    #[test]
    fn test_load_caches_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symptom_dataset.json");
        fs::write(&path, VALID_JSON).unwrap();

        let mut store = DatasetStore::new(&path);
        assert_eq!(store.load().len(), 2);

        // Rewriting the file does not change the cached data...
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"[]").unwrap();
        assert_eq!(store.load().len(), 2);

        // ...until the cache is cleared.
        store.clear_cache();
        assert!(!store.is_cached());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_document_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symptom_dataset.json");
        fs::write(&path, "{ definitely not an array").unwrap();

        let mut store = DatasetStore::new(&path);
        assert!(store.load().is_empty());
        assert!(!store.is_cached());
    }

    #[test]
    fn test_from_cases_is_preloaded() {
        let cases = parse_cases(VALID_JSON).unwrap();
        let mut store = DatasetStore::from_cases(cases);
        assert!(store.is_cached());
        assert_eq!(store.load().len(), 2);
    }
}
