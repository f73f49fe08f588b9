// src/core/graph/tokenizer.rs
use regex::Regex;

/// Normalizes raw text into lowercase alphabetic words
pub struct Tokenizer {
    /// Matches every character that is neither an ASCII letter nor whitespace
    strip_regex: Regex,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            strip_regex: Regex::new(r"[^a-zA-Z\s]").expect("Invalid strip regex"),
        }
    }

    /// Split a whole document (possibly multi-line) into words.
    ///
    /// Lines are joined with a single space before stripping so that words at
    /// line boundaries never fuse together.
    pub fn tokenize(&self, raw_text: &str) -> Vec<String> {
        let joined = raw_text.lines().collect::<Vec<_>>().join(" ");
        let stripped = self.strip_regex.replace_all(&joined, "");

        stripped
            .to_lowercase()
            .split_whitespace()
            .map(|word| word.to_string())
            .collect()
    }

    /// Normalize a single query word the same way document words are.
    ///
    /// Returns `None` when nothing alphabetic is left.
    pub fn normalize_word(&self, raw: &str) -> Option<String> {
        let stripped = self.strip_regex.replace_all(raw, "");
        let word: String = stripped
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if word.is_empty() {
            None
        } else {
            Some(word)
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
