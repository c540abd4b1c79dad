//! CSV to JSON dataset conversion.
//!
//! One-shot batch transform producing the JSON document the loader
//! consumes. Rows with malformed numeric fields are excluded here so the
//! loader can rely on well-formed records.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use super::DatasetResult;
use crate::models::{HistoricalCase, Severity, SeverityDistribution};

/// Expected column count: patientId, age, gender, symptoms,
/// predictedDisease, severity, confidenceScore.
const MIN_COLUMNS: usize = 7;

/// Summary statistics for one conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionStats {
    /// Rows successfully converted
    pub total_records: u32,
    /// Rows dropped for malformed or missing fields
    pub skipped_rows: u32,
    /// Case counts per disease, in first-encounter order
    pub disease_counts: Vec<(String, u32)>,
    /// Case counts per severity level
    pub severity_distribution: SeverityDistribution,
    /// (min, max) patient age over converted rows
    pub age_range: Option<(u32, u32)>,
    /// (min, max) confidence score over converted rows
    pub confidence_range: Option<(u8, u8)>,
    /// Conversion timestamp, RFC3339
    pub converted_at: String,
}

impl ConversionStats {
    fn new() -> Self {
        Self {
            total_records: 0,
            skipped_rows: 0,
            disease_counts: Vec::new(),
            severity_distribution: SeverityDistribution::default(),
            age_range: None,
            confidence_range: None,
            converted_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn record(&mut self, case: &HistoricalCase) {
        self.total_records += 1;

        match self
            .disease_counts
            .iter_mut()
            .find(|(name, _)| *name == case.predicted_disease)
        {
            Some((_, count)) => *count += 1,
            None => self.disease_counts.push((case.predicted_disease.clone(), 1)),
        }

        self.severity_distribution.record(case.severity);

        self.age_range = Some(match self.age_range {
            Some((min, max)) => (min.min(case.age), max.max(case.age)),
            None => (case.age, case.age),
        });
        self.confidence_range = Some(match self.confidence_range {
            Some((min, max)) => (
                min.min(case.confidence_score),
                max.max(case.confidence_score),
            ),
            None => (case.confidence_score, case.confidence_score),
        });
    }
}

/// Split one CSV line into fields, honoring double-quoted fields so the
/// comma-joined symptoms column survives intact.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for c in line.chars() {
        match c {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// Parse CSV content into case records plus conversion statistics.
///
/// The first non-empty line is the header and is skipped. Data rows need
/// at least `MIN_COLUMNS` fields with parseable numerics and a known
/// severity label; anything else is skipped and counted.
pub fn parse_csv(content: &str) -> (Vec<HistoricalCase>, ConversionStats) {
    let mut stats = ConversionStats::new();
    let mut dataset = Vec::new();

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let _header = lines.next();

    for line in lines {
        match parse_row(line) {
            Some(case) => {
                stats.record(&case);
                dataset.push(case);
            }
            None => {
                stats.skipped_rows += 1;
                warn!(row = line, "skipping malformed dataset row");
            }
        }
    }

    (dataset, stats)
}

fn parse_row(line: &str) -> Option<HistoricalCase> {
    let values = split_csv_line(line);
    if values.len() < MIN_COLUMNS {
        return None;
    }

    let case = HistoricalCase {
        patient_id: values[0].parse().ok()?,
        age: values[1].parse().ok()?,
        gender: values[2].clone(),
        symptoms: values[3]
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        predicted_disease: values[4].clone(),
        severity: Severity::parse(&values[5])?,
        confidence_score: values[6].parse().ok()?,
    };

    case.is_valid().then_some(case)
}

/// Convert a CSV file into the pretty-printed JSON dataset document.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_path: P,
    json_path: Q,
) -> DatasetResult<ConversionStats> {
    let content = fs::read_to_string(csv_path)?;
    let (dataset, stats) = parse_csv(&content);

    debug!(
        records = stats.total_records,
        skipped = stats.skipped_rows,
        "converted dataset"
    );

    let json = serde_json::to_string_pretty(&dataset)?;
    fs::write(json_path, json)?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Patient_ID,Age,Gender,Symptoms,Predicted_Disease,Severity,Confidence_Score
1,34,Female,\"fever, cough, sore throat\",Flu,Mild,70
2,58,Male,\"chest pain\",Angina,Severe,91
3,41,Female,\"headache, blurred vision\",Migraine,Moderate,84
";

    #[test]
    fn test_split_csv_line_plain() {
        assert_eq!(
            split_csv_line("1,34,Female"),
            vec!["1".to_string(), "34".to_string(), "Female".to_string()]
        );
    }

    #[test]
    fn test_split_csv_line_quoted_commas() {
        let fields = split_csv_line("1,34,Female,\"fever, cough\",Flu");
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[3], "fever, cough");
    }

    #[test]
    fn test_parse_csv_basic() {
        let (dataset, stats) = parse_csv(CSV);

        assert_eq!(dataset.len(), 3);
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.skipped_rows, 0);

        assert_eq!(dataset[0].patient_id, 1);
        assert_eq!(
            dataset[0].symptoms,
            vec!["fever".to_string(), "cough".to_string(), "sore throat".to_string()]
        );
        assert_eq!(dataset[2].severity, Severity::Moderate);
    }

    #[test]
    fn test_parse_csv_stats() {
        let (_, stats) = parse_csv(CSV);

        assert_eq!(stats.age_range, Some((34, 58)));
        assert_eq!(stats.confidence_range, Some((70, 91)));
        assert_eq!(stats.severity_distribution.mild, 1);
        assert_eq!(stats.severity_distribution.severe, 1);
        // First-encounter order
        assert_eq!(stats.disease_counts[0].0, "Flu");
        assert_eq!(stats.disease_counts.len(), 3);
    }

    #[test]
    fn test_parse_csv_skips_bad_rows() {
        let csv = "\
Patient_ID,Age,Gender,Symptoms,Predicted_Disease,Severity,Confidence_Score
1,34,Female,\"fever\",Flu,Mild,70
not-a-number,40,Male,\"cough\",Cold,Mild,50
2,abc,Female,\"rash\",Allergy,Mild,60
3,29,Male,\"nausea\",Gastritis,Unknown,55
4,52,Female,\"fatigue\"
5,61,Male,\"fatigue\",Anemia,Moderate,77
";
        let (dataset, stats) = parse_csv(csv);

        assert_eq!(dataset.len(), 2);
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.skipped_rows, 4);
        assert_eq!(dataset[1].predicted_disease, "Anemia");
    }

    #[test]
    fn test_convert_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("dataset.csv");
        let json_path = dir.path().join("symptom_dataset.json");
        fs::write(&csv_path, CSV).unwrap();

        let stats = convert_file(&csv_path, &json_path).unwrap();
        assert_eq!(stats.total_records, 3);

        // The written document loads back through the regular parser.
        let json = fs::read_to_string(&json_path).unwrap();
        let cases = super::super::parse_cases(&json).unwrap();
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[1].predicted_disease, "Angina");
    }
}
