//! Text preprocessing: SMS text to model features

use smsfilter_core::Result;
use std::collections::HashMap;

/// English stop words dropped during tokenization
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "don", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "s", "same", "she",
    "should", "so", "some", "such", "t", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Features extracted from one message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Features {
    /// Cleaned term counts
    pub terms: HashMap<String, u32>,

    /// Length of the raw message in characters
    pub message_len: usize,
}

impl Features {
    /// Count of a term, zero if absent
    pub fn term_count(&self, term: &str) -> u32 {
        self.terms.get(term).copied().unwrap_or(0)
    }

    /// Total number of kept tokens
    pub fn token_count(&self) -> u32 {
        self.terms.values().sum()
    }
}

/// Turns raw SMS text into features a model can score
pub trait Preprocessor: Send + Sync {
    /// Prepare a single message
    fn prepare(&self, sms: &str) -> Result<Features>;
}

/// Default preprocessor: lowercase, strip punctuation, drop stop words, count terms
#[derive(Debug, Clone, Default)]
pub struct TextPreprocessor;

impl TextPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Split cleaned text into kept tokens
    pub fn tokenize(text: &str) -> Vec<String> {
        let mut cleaned = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_alphanumeric() {
                cleaned.extend(c.to_lowercase());
            } else {
                cleaned.push(' ');
            }
        }

        cleaned
            .split_whitespace()
            .filter(|word| !is_stop_word(word))
            .map(str::to_string)
            .collect()
    }
}

impl Preprocessor for TextPreprocessor {
    fn prepare(&self, sms: &str) -> Result<Features> {
        let mut terms = HashMap::new();
        for token in Self::tokenize(sms) {
            *terms.entry(token).or_insert(0) += 1;
        }

        Ok(Features {
            terms,
            message_len: sms.chars().count(),
        })
    }
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}
