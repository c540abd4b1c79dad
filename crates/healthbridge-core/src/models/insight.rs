//! Derived match and insight models.
//!
//! Everything here is ephemeral: created per query, discarded after
//! formatting, never persisted.

use serde::{Deserialize, Serialize};

use super::case::{HistoricalCase, Severity, SeverityDistribution};

/// A historical case scored against one query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// Patient identifier from the source record
    pub patient_id: u32,
    /// Patient age at record time
    pub age: u32,
    /// Categorical gender label
    pub gender: String,
    /// Recorded symptom phrases
    pub symptoms: Vec<String>,
    /// Disease label predicted for this record
    pub predicted_disease: String,
    /// Severity label
    pub severity: Severity,
    /// Historical model confidence, 0-100
    pub confidence_score: u8,
    /// Similarity of this record's symptoms to the query, 0-100
    pub match_score: u8,
}

impl MatchCandidate {
    /// Build a candidate from a dataset record and its query score.
    pub fn from_case(case: &HistoricalCase, match_score: u8) -> Self {
        Self {
            patient_id: case.patient_id,
            age: case.age,
            gender: case.gender.clone(),
            symptoms: case.symptoms.clone(),
            predicted_disease: case.predicted_disease.clone(),
            severity: case.severity,
            confidence_score: case.confidence_score,
            match_score,
        }
    }
}

/// Per-disease statistics over a set of matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseGroup {
    /// Disease label
    pub name: String,
    /// Number of matching cases with this label
    pub count: u32,
    /// Mean confidence over those cases, rounded
    pub avg_confidence: u8,
    /// Severity counts within this disease group
    pub severity_breakdown: SeverityDistribution,
}

/// Summary statistics over one query's ranked match list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedInsight {
    /// Number of candidates that matched at all
    pub total_matches: u32,
    /// Disease groups, sorted descending by count (stable on ties)
    pub diseases: Vec<DiseaseGroup>,
    /// Mean confidence over all matches, rounded
    pub avg_confidence: u8,
    /// Mean match score over all matches, rounded
    pub avg_match_score: u8,
    /// Severity counts over all matches
    pub severity_distribution: SeverityDistribution,
    /// The most frequent disease group, if any matches exist
    pub top_disease: Option<DiseaseGroup>,
}

impl AggregatedInsight {
    /// The zeroed insight returned for an empty match list.
    pub fn empty() -> Self {
        Self {
            total_matches: 0,
            diseases: Vec::new(),
            avg_confidence: 0,
            avg_match_score: 0,
            severity_distribution: SeverityDistribution::default(),
            top_disease: None,
        }
    }

    /// Whether any case matched the query.
    pub fn has_matches(&self) -> bool {
        self.total_matches > 0
    }
}

/// The stable, presentation-ready output contract.
///
/// Optional fields are populated only when `has_matches` is true and are
/// omitted from JSON otherwise, so consumers see exactly two shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedInsight {
    /// Whether any case matched the query
    pub has_matches: bool,
    /// Human-readable one-line summary
    pub summary: String,
    /// Name of the most frequent disease
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_disease: Option<String>,
    /// Number of matches carrying the top disease
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease_count: Option<u32>,
    /// Mean historical confidence over all matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Mean match quality over all matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    /// Most likely severity across all matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// Full disease breakdown, most frequent first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_diseases: Vec<DiseaseGroup>,
}
