//! Symptom text tokenizer.
//!
//! Normalizes free-text input into a comparable token sequence:
//! lowercase, punctuation stripped, short words and stop words dropped.

use std::collections::HashSet;

/// Words carrying no symptom information, dropped during tokenization.
pub const STOP_WORDS: [&str; 6] = ["and", "the", "have", "feel", "feeling", "experiencing"];

/// Tokens must be longer than this to survive.
const MIN_TOKEN_LEN: usize = 2;

/// Tokenizer for free-text symptom input.
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the default stop-word set.
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add a custom stop word.
    pub fn add_stop_word(&mut self, word: &str) {
        self.stop_words.insert(word.to_lowercase());
    }

    /// Normalize and tokenize symptom text into keywords.
    ///
    /// Punctuation becomes whitespace, so "chest-pain" splits into two
    /// tokens. Token order follows the input for determinism even though
    /// downstream scoring is order-insensitive. Empty or whitespace-only
    /// input yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|word| word.len() > MIN_TOKEN_LEN)
            .filter(|word| !self.stop_words.contains(*word))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("Headache, and Blurred Vision!"),
            vec!["headache", "blurred", "vision"]
        );
    }

    #[test]
    fn test_tokenize_drops_stop_words() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("I have fever and feel dizzy"),
            vec!["fever", "dizzy"]
        );
        assert_eq!(
            tokenizer.tokenize("experiencing the feeling"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        let tokenizer = Tokenizer::new();
        // "a", "ic", "of" are too short; "ache" survives
        assert_eq!(tokenizer.tokenize("a ic of ache"), vec!["ache"]);
    }

    #[test]
    fn test_tokenize_punctuation_splits() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("chest-pain; shortness/of/breath"),
            vec!["chest", "pain", "shortness", "breath"]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.tokenize(""), Vec::<String>::new());
        assert_eq!(tokenizer.tokenize("   \t\n "), Vec::<String>::new());
        assert_eq!(tokenizer.tokenize("!!! ... ???"), Vec::<String>::new());
    }

    #[test]
    fn test_tokenize_preserves_order() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("nausea vomiting nausea"),
            vec!["nausea", "vomiting", "nausea"]
        );
    }

    #[test]
    fn test_custom_stop_word() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.add_stop_word("Really");
        assert_eq!(tokenizer.tokenize("really bad cough"), vec!["bad", "cough"]);
    }
}
