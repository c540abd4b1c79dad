//! Reduction of a ranked match list into summary statistics.

use crate::models::{AggregatedInsight, DiseaseGroup, MatchCandidate, SeverityDistribution};

/// Per-disease running totals during aggregation.
struct DiseaseAccumulator {
    name: String,
    count: u32,
    confidence_sum: u32,
    severity_breakdown: SeverityDistribution,
}

impl DiseaseAccumulator {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            count: 0,
            confidence_sum: 0,
            severity_breakdown: SeverityDistribution::default(),
        }
    }

    fn finalize(self) -> DiseaseGroup {
        DiseaseGroup {
            count: self.count,
            avg_confidence: rounded_mean(self.confidence_sum, self.count),
            severity_breakdown: self.severity_breakdown,
            name: self.name,
        }
    }
}

/// Integer mean rounded to nearest, 0 for an empty set.
fn rounded_mean(sum: u32, count: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u8
}

/// Reduce matching cases into summary statistics.
///
/// Diseases are grouped in first-encounter order, then sorted descending
/// by count with a stable sort, so ties keep encounter order. Overall
/// averages are unweighted means across all matches, not across disease
/// groups. An empty match list yields the zeroed insight.
pub fn aggregate_insights(matches: &[MatchCandidate]) -> AggregatedInsight {
    if matches.is_empty() {
        return AggregatedInsight::empty();
    }

    let mut groups: Vec<DiseaseAccumulator> = Vec::new();
    let mut severity_distribution = SeverityDistribution::default();
    let mut confidence_sum: u32 = 0;
    let mut match_score_sum: u32 = 0;

    for candidate in matches {
        let idx = match groups
            .iter()
            .position(|g| g.name == candidate.predicted_disease)
        {
            Some(idx) => idx,
            None => {
                groups.push(DiseaseAccumulator::new(&candidate.predicted_disease));
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.count += 1;
        group.confidence_sum += u32::from(candidate.confidence_score);
        group.severity_breakdown.record(candidate.severity);

        severity_distribution.record(candidate.severity);
        confidence_sum += u32::from(candidate.confidence_score);
        match_score_sum += u32::from(candidate.match_score);
    }

    let total = matches.len() as u32;

    let mut diseases: Vec<DiseaseGroup> =
        groups.into_iter().map(DiseaseAccumulator::finalize).collect();
    diseases.sort_by(|a, b| b.count.cmp(&a.count));

    AggregatedInsight {
        total_matches: total,
        avg_confidence: rounded_mean(confidence_sum, total),
        avg_match_score: rounded_mean(match_score_sum, total),
        severity_distribution,
        top_disease: diseases.first().cloned(),
        diseases,
    }
}
