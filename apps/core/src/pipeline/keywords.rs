//! Keyword extraction and lightweight entity detection.
//!
//! Normalizes an utterance into a deduplicated keyword set (Turkish stop
//! words and short tokens filtered out) and independently detects course
//! codes plus greeting/thanks/question markers. No ML model required -
//! pure tokenization and regex matching.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Stopwords for Turkish
const STOPWORDS_TR: &[&str] = &[
    "ve", "veya", "bir", "bu", "şu", "o", "mi", "mı", "mu", "mü", "ile", "için", "ne", "nedir",
    "nasıl", "hakkında", "gibi", "kadar", "daha", "en", "çok", "az", "var", "yok", "da", "de",
    "ta", "te", "ama", "fakat", "ancak", "yani", "ki", "ise", "diye", "her", "hiç", "şey",
];

// Compile patterns once at startup
static COURSE_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-Za-zÇĞİÖŞÜçğıöşü]{2,4}\s?\d{3}\b").expect("Invalid regex: course code pattern")
});

static QUESTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\?|(\b(ne|nedir|nasıl|kim|nerede|ne zaman|hangi|kaç)\b)")
        .expect("Invalid regex: question markers")
});

static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(merhaba|selam|günaydın|iyi günler|iyi akşamlar|hey)\b")
        .expect("Invalid regex: greeting markers")
});

static THANKS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(teşekkür|teşekkürler|sağol|sağ ol|eyvallah|thanks)\b")
        .expect("Invalid regex: thanks markers")
});

/// Entities detected in a message, independent of keyword extraction.
///
/// Never fails to compute; absence of matches yields empty/false values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntities {
    /// Course-code tokens (e.g. `BIL211`), normalized to uppercase without spaces.
    pub course_codes: Vec<String>,
    pub has_question: bool,
    pub is_greeting: bool,
    pub is_thanks: bool,
}

/// Keyword extractor with stop-word filtering for Turkish.
pub struct KeywordExtractor {
    stopwords: HashSet<&'static str>,
    min_word_length: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS_TR.iter().copied().collect(),
            min_word_length: 3,
        }
    }

    /// Extract the deduplicated keyword set from a message.
    ///
    /// Lowercases, strips punctuation to whitespace, drops stop words and
    /// tokens shorter than three characters. Downstream treats the result
    /// as a set; first-seen order is kept but carries no meaning.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let cleaned = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect::<String>();

        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for word in cleaned.split_whitespace() {
            if word.chars().count() < self.min_word_length {
                continue;
            }
            if self.stopwords.contains(word) {
                continue;
            }
            if seen.insert(word.to_string()) {
                keywords.push(word.to_string());
            }
        }

        keywords
    }

    /// Detect course codes and conversational markers in a message.
    pub fn extract_entities(&self, text: &str) -> MessageEntities {
        let course_codes = COURSE_CODE_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().replace(' ', "").to_uppercase())
            .collect();

        MessageEntities {
            course_codes,
            has_question: QUESTION_PATTERN.is_match(text),
            is_greeting: GREETING_PATTERN.is_match(text),
            is_thanks: THANKS_PATTERN.is_match(text),
        }
    }
}

/// Normalize Turkish characters to their ASCII counterparts for matching.
pub fn normalize_turkish(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ç' => 'c',
            'ğ' => 'g',
            'ı' => 'i',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            'Ç' => 'C',
            'Ğ' => 'G',
            'İ' => 'I',
            'Ö' => 'O',
            'Ş' => 'S',
            'Ü' => 'U',
            other => other,
        })
        .collect()
}

/// Jaccard similarity between the keyword sets of two strings.
///
/// Used by the in-memory store as a cheap text-relevance proxy.
pub fn keyword_similarity(extractor: &KeywordExtractor, a: &str, b: &str) -> f32 {
    let set_a: HashSet<String> = extractor.extract(a).into_iter().collect();
    let set_b: HashSet<String> = extractor.extract(b).into_iter().collect();

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    intersection as f32 / union as f32
}
