//! Case matching against the historical dataset.
//!
//! Pipeline: Tokenization → Scoring → Ranking

mod scorer;
mod tokenizer;

pub use scorer::*;
pub use tokenizer::*;

use crate::models::{HistoricalCase, MatchCandidate};

/// Default cap when callers only want the strongest matches.
pub const DEFAULT_TOP_MATCHES: usize = 10;

/// Matcher that scores and ranks historical cases by textual similarity.
pub struct Matcher {
    tokenizer: Tokenizer,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    /// Create a matcher with the default tokenizer.
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Create a matcher with a customized tokenizer.
    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Get the tokenizer for direct access.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Similarity between query text and one record's symptoms, 0-100.
    pub fn match_score(&self, query: &str, case_symptoms: &[String]) -> u8 {
        let tokens = self.tokenizer.tokenize(query);
        score_tokens(&tokens, case_symptoms)
    }

    /// Score every record against the query and rank the hits.
    ///
    /// Only records with a positive score are returned, sorted descending
    /// by score. The sort is stable, so equally-scored records keep their
    /// dataset order. An unmatchable query or empty dataset yields an
    /// empty list; this never fails.
    pub fn find_similar_cases(
        &self,
        query: &str,
        dataset: &[HistoricalCase],
    ) -> Vec<MatchCandidate> {
        let tokens = self.tokenizer.tokenize(query);
        if tokens.is_empty() || dataset.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<MatchCandidate> = dataset
            .iter()
            .map(|case| MatchCandidate::from_case(case, score_tokens(&tokens, &case.symptoms)))
            .filter(|candidate| candidate.match_score > 0)
            .collect();

        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        matches
    }

    /// The strongest `limit` matches from an already-ranked list.
    pub fn top_matches<'a>(
        &self,
        matches: &'a [MatchCandidate],
        limit: usize,
    ) -> &'a [MatchCandidate] {
        &matches[..matches.len().min(limit)]
    }
}
