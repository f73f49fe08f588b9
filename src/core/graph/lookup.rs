// src/core/graph/lookup.rs
use std::fmt;

use super::{Tokenizer, WordGraph};

/// Why a pair of query words could not be resolved against the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// One or both inputs were empty
    MissingInput,
    /// An input had no alphabetic content
    InvalidWordFormat,
    /// Neither normalized word is in the graph
    BothAbsent(String, String),
    /// Exactly one normalized word is absent
    Absent(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::MissingInput => write!(f, "Lack of words"),
            LookupError::InvalidWordFormat => {
                write!(f, "Invalid input: Input strings must be alphabetic words.")
            }
            LookupError::BothAbsent(first, second) => {
                write!(f, "No \"{}\" and \"{}\" in the graph!", first, second)
            }
            LookupError::Absent(word) => write!(f, "No \"{}\" in the graph!", word),
        }
    }
}

/// Validate and normalize two query words, checking in order: missing input,
/// non-alphabetic input, then graph membership.
pub fn resolve_pair(
    graph: &WordGraph,
    tokenizer: &Tokenizer,
    first: &str,
    second: &str,
) -> Result<(String, String), LookupError> {
    if first.trim().is_empty() || second.trim().is_empty() {
        return Err(LookupError::MissingInput);
    }

    let (first, second) = match (tokenizer.normalize_word(first), tokenizer.normalize_word(second)) {
        (Some(first), Some(second)) => (first, second),
        _ => return Err(LookupError::InvalidWordFormat),
    };

    match (graph.has_word(&first), graph.has_word(&second)) {
        (true, true) => Ok((first, second)),
        (false, false) => Err(LookupError::BothAbsent(first, second)),
        (false, true) => Err(LookupError::Absent(first)),
        (true, false) => Err(LookupError::Absent(second)),
    }
}

/// Single-word variant of [`resolve_pair`]
pub fn resolve_word(
    graph: &WordGraph,
    tokenizer: &Tokenizer,
    raw: &str,
) -> Result<String, LookupError> {
    if raw.trim().is_empty() {
        return Err(LookupError::MissingInput);
    }

    let word = tokenizer
        .normalize_word(raw)
        .ok_or(LookupError::InvalidWordFormat)?;

    if graph.has_word(&word) {
        Ok(word)
    } else {
        Err(LookupError::Absent(word))
    }
}
