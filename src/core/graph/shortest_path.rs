// src/core/graph/shortest_path.rs
use std::collections::HashMap;
use std::fmt;
use serde::{Serialize, Deserialize};
use tracing::debug;

use super::lookup::{resolve_pair, resolve_word, LookupError};
use super::{Tokenizer, WordGraph};

/// A chain of words joined by graph edges, with the sum of their weights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPath {
    pub words: Vec<String>,
    pub weight: u64,
}

impl WordPath {
    /// Number of edges traversed
    pub fn edge_count(&self) -> usize {
        self.words.len().saturating_sub(1)
    }
}

/// Result of a shortest-path query, displayed verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Invalid(LookupError),
    NoPath { source: String, target: String },
    Found(WordPath),
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathOutcome::Invalid(err) => write!(f, "{}", err),
            PathOutcome::NoPath { source, target } => {
                write!(f, "No path from {} to {}!", source, target)
            }
            PathOutcome::Found(path) => write!(
                f,
                "Shortest path: {} with length {}",
                path.words.join(" -> "),
                path.weight
            ),
        }
    }
}

/// Distances and predecessors left behind by one single-source search
struct SearchState<'g> {
    distances: HashMap<&'g str, u64>,
    previous: HashMap<&'g str, &'g str>,
}

/// Dijkstra over the word graph with linear-scan selection.
///
/// The next word to settle is the unsettled word with the smallest finite
/// distance; ties go to the word seen first in the document.
pub struct ShortestPathFinder {
    tokenizer: Tokenizer,
}

impl ShortestPathFinder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Shortest weighted path between two raw query words
    pub fn shortest_path(&self, graph: &WordGraph, word1: &str, word2: &str) -> PathOutcome {
        let (source, target) = match resolve_pair(graph, &self.tokenizer, word1, word2) {
            Ok(pair) => pair,
            Err(err) => return PathOutcome::Invalid(err),
        };

        let state = Self::search(graph, &source, Some(&target));
        Self::outcome_for(&state, source, target)
    }

    /// Shortest path from one word to every other word, in vocabulary order
    pub fn shortest_paths_from(
        &self,
        graph: &WordGraph,
        word: &str,
    ) -> Result<Vec<PathOutcome>, LookupError> {
        let source = resolve_word(graph, &self.tokenizer, word)?;
        let state = Self::search(graph, &source, None);

        Ok(graph
            .all_words()
            .iter()
            .filter(|target| **target != source)
            .map(|target| Self::outcome_for(&state, source.clone(), target.clone()))
            .collect())
    }

    fn search<'g>(graph: &'g WordGraph, source: &str, target: Option<&str>) -> SearchState<'g> {
        let mut remaining: Vec<&'g str> = graph.all_words().iter().map(String::as_str).collect();
        let mut distances: HashMap<&'g str, u64> = HashMap::new();
        let mut previous: HashMap<&'g str, &'g str> = HashMap::new();

        if let Some(&start) = remaining.iter().find(|word| **word == source) {
            distances.insert(start, 0);
        }

        loop {
            let mut closest: Option<(usize, u64)> = None;
            for (i, word) in remaining.iter().enumerate() {
                if let Some(&distance) = distances.get(word) {
                    if closest.map_or(true, |(_, best)| distance < best) {
                        closest = Some((i, distance));
                    }
                }
            }

            // Everything left is unreachable.
            let Some((index, distance)) = closest else {
                break;
            };
            let current = remaining.remove(index);

            if Some(current) == target {
                break;
            }

            for edge in graph.neighbors(current) {
                let alternative = distance + u64::from(edge.weight);
                let to = edge.to.as_str();
                if distances.get(to).map_or(true, |&known| alternative < known) {
                    distances.insert(to, alternative);
                    previous.insert(to, current);
                }
            }
        }

        debug!("Settled {} word(s) from {}", distances.len(), source);
        SearchState { distances, previous }
    }

    fn outcome_for(state: &SearchState<'_>, source: String, target: String) -> PathOutcome {
        if source == target {
            return PathOutcome::Found(WordPath { words: vec![source], weight: 0 });
        }

        let Some(&weight) = state.distances.get(target.as_str()) else {
            return PathOutcome::NoPath { source, target };
        };
        if !state.previous.contains_key(target.as_str()) {
            return PathOutcome::NoPath { source, target };
        }

        let mut words = vec![target.clone()];
        let mut at = target.as_str();
        while let Some(&prev) = state.previous.get(at) {
            words.push(prev.to_string());
            at = prev;
        }
        words.reverse();

        let path = WordPath { words, weight };
        debug!("Path {} -> {}: {} edge(s), weight {}", source, target, path.edge_count(), weight);
        PathOutcome::Found(path)
    }
}

impl Default for ShortestPathFinder {
    fn default() -> Self {
        Self::new()
    }
}
