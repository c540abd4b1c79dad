//! Token-to-symptom similarity scoring.
//!
//! The metric is bidirectional substring containment between query tokens
//! and recorded symptom phrases: "headache" matches "severe headache" and
//! vice versa. Ranking behavior and the golden tests pin this exact
//! heuristic; do not swap in stemming or edit distance.

/// Score a tokenized query against one record's symptom phrases.
///
/// A token counts as matched when any phrase contains it, or it contains
/// a phrase. The score is the matched fraction of the query, rounded to an
/// integer percentage. Zero tokens score 0; the contract guards the
/// divide-by-zero case explicitly.
pub fn score_tokens(tokens: &[String], case_symptoms: &[String]) -> u8 {
    if tokens.is_empty() {
        return 0;
    }

    let phrases: Vec<String> = case_symptoms.iter().map(|s| s.to_lowercase()).collect();

    let matched = tokens
        .iter()
        .filter(|token| {
            phrases
                .iter()
                .any(|phrase| phrase.contains(token.as_str()) || token.contains(phrase.as_str()))
        })
        .count();

    ((matched as f64 / tokens.len() as f64) * 100.0).round() as u8
}
