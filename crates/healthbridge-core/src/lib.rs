//! HealthBridge Insight Core
//!
//! Symptom case-matching and insight-aggregation library backing the
//! HealthBridge telehealth application.
//!
//! # Architecture
//!
//! ```text
//! Symptom text ──► Tokenization ──► Scoring ──► Ranking
//!                                                  │
//!                       Historical dataset ────────┤
//!                  (loaded once, cached)           │
//!                                                  ▼
//!                                        Insight Aggregation
//!                                    (disease / severity stats)
//!                                                  │
//!                                                  ▼
//!                                         Formatted Insight
//!                                                  │
//!                              ┌───────────────────┴──────────────────┐
//!                              ▼                                      ▼
//!                         UI display                        Assistant prompt
//!                                                          (external consumer)
//! ```
//!
//! # Core Principle
//!
//! **The pipeline never fails for "no data" conditions.** A missing
//! dataset, an unmatchable query, or zero matches all produce a valid,
//! degraded result the caller can render as-is.
//!
//! # Modules
//!
//! - [`dataset`]: dataset loading, caching, and CSV conversion
//! - [`models`]: domain types (HistoricalCase, MatchCandidate, insights)
//! - [`matcher`]: tokenizer + similarity scoring + ranking
//! - [`insights`]: aggregation and presentation formatting

pub mod dataset;
pub mod insights;
pub mod matcher;
pub mod models;

// Re-export commonly used types
pub use dataset::{parse_cases, ConversionStats, DatasetError, DatasetStore};
pub use insights::{aggregate_insights, format_insights, NO_MATCHES_SUMMARY};
pub use matcher::{Matcher, Tokenizer, DEFAULT_TOP_MATCHES};
pub use models::{
    AggregatedInsight, DiseaseGroup, FormattedInsight, HistoricalCase, MatchCandidate, Severity,
    SeverityDistribution,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HealthBridgeError {
    #[error("Dataset error: {0}")]
    DatasetError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<dataset::DatasetError> for HealthBridgeError {
    fn from(e: dataset::DatasetError) -> Self {
        HealthBridgeError::DatasetError(e.to_string())
    }
}

impl From<serde_json::Error> for HealthBridgeError {
    fn from(e: serde_json::Error) -> Self {
        HealthBridgeError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HealthBridgeError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HealthBridgeError::DatasetError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the insight core backed by a dataset JSON file. The file is read
/// lazily on first use.
#[uniffi::export]
pub fn open_dataset(path: String) -> Arc<HealthBridgeCore> {
    Arc::new(HealthBridgeCore {
        store: Arc::new(Mutex::new(DatasetStore::new(path))),
        matcher: Matcher::new(),
    })
}

/// Build the insight core from an in-memory dataset document (for testing
/// and for hosts that ship the dataset embedded).
#[uniffi::export]
pub fn dataset_from_json(json: String) -> Result<Arc<HealthBridgeCore>, HealthBridgeError> {
    let cases = parse_cases(&json)?;
    Ok(Arc::new(HealthBridgeCore {
        store: Arc::new(Mutex::new(DatasetStore::from_cases(cases))),
        matcher: Matcher::new(),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe pipeline wrapper for FFI.
#[derive(uniffi::Object)]
pub struct HealthBridgeCore {
    store: Arc<Mutex<DatasetStore>>,
    matcher: Matcher,
}

#[uniffi::export]
impl HealthBridgeCore {
    // =========================================================================
    // Dataset Operations
    // =========================================================================

    /// Load (or return the cached) historical dataset.
    pub fn load_dataset(&self) -> Result<Vec<FfiHistoricalCase>, HealthBridgeError> {
        let mut store = self.store.lock()?;
        Ok(store.load().iter().cloned().map(|c| c.into()).collect())
    }

    /// Number of records currently loadable.
    pub fn dataset_size(&self) -> Result<u32, HealthBridgeError> {
        let mut store = self.store.lock()?;
        Ok(store.load().len() as u32)
    }

    /// Drop the cached dataset so the next call re-reads it.
    pub fn clear_cache(&self) -> Result<(), HealthBridgeError> {
        let mut store = self.store.lock()?;
        store.clear_cache();
        Ok(())
    }

    // =========================================================================
    // Matching Operations
    // =========================================================================

    /// Similarity between free-text symptoms and one record's symptom
    /// phrases, 0-100.
    pub fn match_score(
        &self,
        symptoms: String,
        case_symptoms: Vec<String>,
    ) -> Result<u8, HealthBridgeError> {
        Ok(self.matcher.match_score(&symptoms, &case_symptoms))
    }

    /// All matching cases for the query, strongest first.
    pub fn find_similar_cases(
        &self,
        symptoms: String,
    ) -> Result<Vec<FfiMatchCandidate>, HealthBridgeError> {
        let mut store = self.store.lock()?;
        let matches = self.matcher.find_similar_cases(&symptoms, store.load());
        Ok(matches.into_iter().map(|m| m.into()).collect())
    }

    /// The strongest `limit` matching cases for the query.
    pub fn top_similar_cases(
        &self,
        symptoms: String,
        limit: u32,
    ) -> Result<Vec<FfiMatchCandidate>, HealthBridgeError> {
        let mut store = self.store.lock()?;
        let matches = self.matcher.find_similar_cases(&symptoms, store.load());
        let top = self.matcher.top_matches(&matches, limit as usize);
        Ok(top.iter().cloned().map(|m| m.into()).collect())
    }

    // =========================================================================
    // Pipeline Operations
    // =========================================================================

    /// Run the full pipeline: load, match, aggregate, format.
    ///
    /// Always yields a renderable insight; dataset failures degrade to the
    /// no-match shape instead of erroring.
    pub fn analyze_symptoms(
        &self,
        symptoms: String,
    ) -> Result<FfiFormattedInsight, HealthBridgeError> {
        let mut store = self.store.lock()?;
        let matches = self.matcher.find_similar_cases(&symptoms, store.load());
        let insight = aggregate_insights(&matches);
        Ok(format_insights(&insight).into())
    }
}

// =========================================================================
// Stateless Operations (exported to FFI)
// =========================================================================

/// Reduce an already-ranked match list into summary statistics.
#[uniffi::export]
pub fn aggregate_matches(matches: Vec<FfiMatchCandidate>) -> FfiAggregatedInsight {
    let matches: Vec<MatchCandidate> = matches.into_iter().map(|m| m.into()).collect();
    aggregate_insights(&matches).into()
}

/// Render an aggregated insight into the presentation contract.
#[uniffi::export]
pub fn format_insight(insight: FfiAggregatedInsight) -> FfiFormattedInsight {
    let insight: AggregatedInsight = insight.into();
    format_insights(&insight).into()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSeverity {
    Mild,
    Moderate,
    Severe,
}

impl From<Severity> for FfiSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Mild => FfiSeverity::Mild,
            Severity::Moderate => FfiSeverity::Moderate,
            Severity::Severe => FfiSeverity::Severe,
        }
    }
}

impl From<FfiSeverity> for Severity {
    fn from(severity: FfiSeverity) -> Self {
        match severity {
            FfiSeverity::Mild => Severity::Mild,
            FfiSeverity::Moderate => Severity::Moderate,
            FfiSeverity::Severe => Severity::Severe,
        }
    }
}

/// FFI-safe severity counts.
#[derive(Debug, Clone, Copy, uniffi::Record)]
pub struct FfiSeverityCounts {
    pub mild: u32,
    pub moderate: u32,
    pub severe: u32,
}

impl From<SeverityDistribution> for FfiSeverityCounts {
    fn from(dist: SeverityDistribution) -> Self {
        Self {
            mild: dist.mild,
            moderate: dist.moderate,
            severe: dist.severe,
        }
    }
}

impl From<FfiSeverityCounts> for SeverityDistribution {
    fn from(counts: FfiSeverityCounts) -> Self {
        Self {
            mild: counts.mild,
            moderate: counts.moderate,
            severe: counts.severe,
        }
    }
}

/// FFI-safe historical case record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHistoricalCase {
    pub patient_id: u32,
    pub age: u32,
    pub gender: String,
    pub symptoms: Vec<String>,
    pub predicted_disease: String,
    pub severity: FfiSeverity,
    pub confidence_score: u8,
}

impl From<HistoricalCase> for FfiHistoricalCase {
    fn from(case: HistoricalCase) -> Self {
        Self {
            patient_id: case.patient_id,
            age: case.age,
            gender: case.gender,
            symptoms: case.symptoms,
            predicted_disease: case.predicted_disease,
            severity: case.severity.into(),
            confidence_score: case.confidence_score,
        }
    }
}

impl From<FfiHistoricalCase> for HistoricalCase {
    fn from(case: FfiHistoricalCase) -> Self {
        Self {
            patient_id: case.patient_id,
            age: case.age,
            gender: case.gender,
            symptoms: case.symptoms,
            predicted_disease: case.predicted_disease,
            severity: case.severity.into(),
            confidence_score: case.confidence_score,
        }
    }
}

/// FFI-safe scored match.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMatchCandidate {
    pub patient_id: u32,
    pub age: u32,
    pub gender: String,
    pub symptoms: Vec<String>,
    pub predicted_disease: String,
    pub severity: FfiSeverity,
    pub confidence_score: u8,
    pub match_score: u8,
}

impl From<MatchCandidate> for FfiMatchCandidate {
    fn from(candidate: MatchCandidate) -> Self {
        Self {
            patient_id: candidate.patient_id,
            age: candidate.age,
            gender: candidate.gender,
            symptoms: candidate.symptoms,
            predicted_disease: candidate.predicted_disease,
            severity: candidate.severity.into(),
            confidence_score: candidate.confidence_score,
            match_score: candidate.match_score,
        }
    }
}

impl From<FfiMatchCandidate> for MatchCandidate {
    fn from(candidate: FfiMatchCandidate) -> Self {
        Self {
            patient_id: candidate.patient_id,
            age: candidate.age,
            gender: candidate.gender,
            symptoms: candidate.symptoms,
            predicted_disease: candidate.predicted_disease,
            severity: candidate.severity.into(),
            confidence_score: candidate.confidence_score,
            match_score: candidate.match_score,
        }
    }
}

/// FFI-safe per-disease statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiseaseGroup {
    pub name: String,
    pub count: u32,
    pub avg_confidence: u8,
    pub severity_breakdown: FfiSeverityCounts,
}

impl From<DiseaseGroup> for FfiDiseaseGroup {
    fn from(group: DiseaseGroup) -> Self {
        Self {
            name: group.name,
            count: group.count,
            avg_confidence: group.avg_confidence,
            severity_breakdown: group.severity_breakdown.into(),
        }
    }
}

impl From<FfiDiseaseGroup> for DiseaseGroup {
    fn from(group: FfiDiseaseGroup) -> Self {
        Self {
            name: group.name,
            count: group.count,
            avg_confidence: group.avg_confidence,
            severity_breakdown: group.severity_breakdown.into(),
        }
    }
}

/// FFI-safe aggregated insight.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAggregatedInsight {
    pub total_matches: u32,
    pub diseases: Vec<FfiDiseaseGroup>,
    pub avg_confidence: u8,
    pub avg_match_score: u8,
    pub severity_distribution: FfiSeverityCounts,
    pub top_disease: Option<FfiDiseaseGroup>,
}

impl From<AggregatedInsight> for FfiAggregatedInsight {
    fn from(insight: AggregatedInsight) -> Self {
        Self {
            total_matches: insight.total_matches,
            diseases: insight.diseases.into_iter().map(|d| d.into()).collect(),
            avg_confidence: insight.avg_confidence,
            avg_match_score: insight.avg_match_score,
            severity_distribution: insight.severity_distribution.into(),
            top_disease: insight.top_disease.map(|d| d.into()),
        }
    }
}

impl From<FfiAggregatedInsight> for AggregatedInsight {
    fn from(insight: FfiAggregatedInsight) -> Self {
        Self {
            total_matches: insight.total_matches,
            diseases: insight.diseases.into_iter().map(|d| d.into()).collect(),
            avg_confidence: insight.avg_confidence,
            avg_match_score: insight.avg_match_score,
            severity_distribution: insight.severity_distribution.into(),
            top_disease: insight.top_disease.map(|d| d.into()),
        }
    }
}

/// FFI-safe formatted insight.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormattedInsight {
    pub has_matches: bool,
    pub summary: String,
    pub top_disease: Option<String>,
    pub disease_count: Option<u32>,
    pub confidence: Option<u8>,
    pub match_score: Option<u8>,
    pub severity: Option<FfiSeverity>,
    pub all_diseases: Vec<FfiDiseaseGroup>,
}

impl From<FormattedInsight> for FfiFormattedInsight {
    fn from(insight: FormattedInsight) -> Self {
        Self {
            has_matches: insight.has_matches,
            summary: insight.summary,
            top_disease: insight.top_disease,
            disease_count: insight.disease_count,
            confidence: insight.confidence,
            match_score: insight.match_score,
            severity: insight.severity.map(|s| s.into()),
            all_diseases: insight.all_diseases.into_iter().map(|d| d.into()).collect(),
        }
    }
}
