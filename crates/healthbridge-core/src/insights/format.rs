//! Presentation-ready formatting of aggregated insights.

use crate::models::{AggregatedInsight, FormattedInsight};

/// Summary used when no case matched the query.
pub const NO_MATCHES_SUMMARY: &str = "No similar cases found in our database.";

/// Render an aggregated insight into the stable output contract.
///
/// Pure and total: a zero-match insight produces the `has_matches: false`
/// shape with every optional field absent, anything else the fully
/// populated shape.
pub fn format_insights(insight: &AggregatedInsight) -> FormattedInsight {
    let top = match insight.top_disease.as_ref() {
        Some(top) if insight.total_matches > 0 => top,
        _ => return no_matches(),
    };

    let n = insight.total_matches;
    FormattedInsight {
        has_matches: true,
        summary: format!(
            "Found {} similar case{} in our medical database.",
            n,
            if n == 1 { "" } else { "s" }
        ),
        top_disease: Some(top.name.clone()),
        disease_count: Some(top.count),
        confidence: Some(insight.avg_confidence),
        match_score: Some(insight.avg_match_score),
        severity: Some(insight.severity_distribution.most_likely()),
        all_diseases: insight.diseases.clone(),
    }
}

fn no_matches() -> FormattedInsight {
    FormattedInsight {
        has_matches: false,
        summary: NO_MATCHES_SUMMARY.to_string(),
        top_disease: None,
        disease_count: None,
        confidence: None,
        match_score: None,
        severity: None,
        all_diseases: Vec::new(),
    }
}
