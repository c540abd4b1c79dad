//! Historical case records and severity bookkeeping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity label attached to a historical case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// All severities in their canonical order.
    ///
    /// This order doubles as the tie-break order when two severities have
    /// the same count in a distribution.
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    /// Parse a severity label, case-insensitively.
    pub fn parse(label: &str) -> Option<Severity> {
        match label.trim().to_lowercase().as_str() {
            "mild" => Some(Severity::Mild),
            "moderate" => Some(Severity::Moderate),
            "severe" => Some(Severity::Severe),
            _ => None,
        }
    }

    /// Canonical label for display and serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of cases per severity level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityDistribution {
    /// Number of mild cases
    pub mild: u32,
    /// Number of moderate cases
    pub moderate: u32,
    /// Number of severe cases
    pub severe: u32,
}

impl SeverityDistribution {
    /// Record one case of the given severity.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Mild => self.mild += 1,
            Severity::Moderate => self.moderate += 1,
            Severity::Severe => self.severe += 1,
        }
    }

    /// Count for a single severity level.
    pub fn count(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Mild => self.mild,
            Severity::Moderate => self.moderate,
            Severity::Severe => self.severe,
        }
    }

    /// Total cases recorded across all levels.
    pub fn total(&self) -> u32 {
        self.mild + self.moderate + self.severe
    }

    /// The severity with the highest count.
    ///
    /// Ties resolve in Mild, Moderate, Severe order. An empty distribution
    /// reports Mild; callers only consult this when at least one case was
    /// recorded.
    pub fn most_likely(&self) -> Severity {
        let mut best = Severity::Mild;
        for severity in Severity::ALL {
            if self.count(severity) > self.count(best) {
                best = severity;
            }
        }
        best
    }
}

/// One row of the immutable historical symptom dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalCase {
    /// Patient identifier from the source dataset (not unique across loads)
    pub patient_id: u32,
    /// Patient age at record time
    pub age: u32,
    /// Categorical gender label
    pub gender: String,
    /// Recorded symptom phrases (free text, matched case-insensitively)
    pub symptoms: Vec<String>,
    /// Disease label predicted for this record
    pub predicted_disease: String,
    /// Severity label
    pub severity: Severity,
    /// Historical model confidence, 0-100
    pub confidence_score: u8,
}

impl HistoricalCase {
    /// Check the load-time invariants for a record.
    ///
    /// Records failing this check are skipped at load/conversion time so a
    /// single bad row never poisons the dataset.
    pub fn is_valid(&self) -> bool {
        !self.symptoms.is_empty()
            && !self.predicted_disease.trim().is_empty()
            && self.confidence_score <= 100
    }
}
