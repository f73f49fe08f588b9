// src/core/graph/word_graph.rs
use std::collections::HashMap;
use serde::{Serialize, Deserialize};

use super::Tokenizer;

/// Outgoing edge of a word, weighted by how often the pair was observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub to: String,
    pub weight: u32,
}

/// Directed word-adjacency graph built from one document.
///
/// Words keep the order in which they were first seen, and each word's
/// outgoing edges keep the order in which they were first created. Every
/// query that iterates the graph therefore sees the same order on every run.
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    /// Vocabulary in first-seen order
    words: Vec<String>,
    /// Word -> position in `words`
    index: HashMap<String, usize>,
    /// Outgoing edges, parallel to `words`
    outgoing: Vec<Vec<Edge>>,
    /// Number of distinct incoming edges, parallel to `words`
    in_degree: Vec<usize>,
}

impl WordGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from raw document text
    pub fn from_text(text: &str) -> Self {
        let tokenizer = Tokenizer::new();
        Self::from_words(&tokenizer.tokenize(text))
    }

    /// Build the graph from an already tokenized word sequence
    pub fn from_words(words: &[String]) -> Self {
        let mut graph = Self::new();

        for pair in words.windows(2) {
            graph.add_edge(&pair[0], &pair[1]);
        }

        // A lone word has no pair to come from; register it as an isolated vertex.
        if let [only] = words {
            graph.add_word(only);
        }

        graph
    }

    /// Insert the directed pair, or bump its weight if already present.
    ///
    /// An empty `from` is ignored; an empty `to` registers `from` without
    /// creating an edge.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        if from.is_empty() {
            return;
        }

        let from_id = self.add_word(from);
        if to.is_empty() {
            return;
        }
        let to_id = self.add_word(to);

        let edges = &mut self.outgoing[from_id];
        if let Some(edge) = edges.iter_mut().find(|edge| edge.to == to) {
            edge.weight += 1;
        } else {
            edges.push(Edge { to: to.to_string(), weight: 1 });
            self.in_degree[to_id] += 1;
        }
    }

    fn add_word(&mut self, word: &str) -> usize {
        if let Some(&id) = self.index.get(word) {
            return id;
        }

        let id = self.words.len();
        self.words.push(word.to_string());
        self.index.insert(word.to_string(), id);
        self.outgoing.push(Vec::new());
        self.in_degree.push(0);
        id
    }

    /// A word is in the graph when it has an outgoing or an incoming edge
    /// (or is the single word of a one-word document).
    pub fn has_word(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Outgoing edges of `word`; empty when it has none or is unknown
    pub fn neighbors(&self, word: &str) -> &[Edge] {
        self.index
            .get(word)
            .map(|&id| self.outgoing[id].as_slice())
            .unwrap_or(&[])
    }

    /// Weight of the directed pair, if the edge exists
    pub fn weight(&self, from: &str, to: &str) -> Option<u32> {
        self.neighbors(from)
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.weight)
    }

    /// Every word that is a source or destination of some edge, in first-seen order
    pub fn all_words(&self) -> &[String] {
        &self.words
    }

    /// Every distinct directed edge as `(from, to, weight)`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> + '_ {
        self.words.iter().zip(&self.outgoing).flat_map(|(from, edges)| {
            edges
                .iter()
                .map(move |edge| (from.as_str(), edge.to.as_str(), edge.weight))
        })
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get statistics about the word graph
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_words: self.word_count(),
            distinct_edges: self.edge_count(),
            total_weight: self.edges().map(|(_, _, weight)| u64::from(weight)).sum(),
            max_out_degree: self.outgoing.iter().map(Vec::len).max().unwrap_or(0),
            max_in_degree: self.in_degree.iter().copied().max().unwrap_or(0),
            dead_ends: self.outgoing.iter().filter(|edges| edges.is_empty()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_words: usize,
    pub distinct_edges: usize,
    pub total_weight: u64,
    pub max_out_degree: usize,
    pub max_in_degree: usize,
    /// Words without outgoing edges
    pub dead_ends: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_be_or_not_to_be_weights() {
        let graph = WordGraph::from_text("To be or not to be");

        assert_eq!(graph.weight("to", "be"), Some(2));
        assert_eq!(graph.weight("be", "or"), Some(1));
        assert_eq!(graph.weight("or", "not"), Some(1));
        assert_eq!(graph.weight("not", "to"), Some(1));
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.all_words(), ["to", "be", "or", "not"]);
    }

    #[test]
    fn test_weight_sums_match_observed_pairs() {
        let words: Vec<String> = "a b a b a c a a"
            .split(' ')
            .map(String::from)
            .collect();
        let graph = WordGraph::from_words(&words);

        let mut expected: HashMap<(&str, &str), u32> = HashMap::new();
        for pair in words.windows(2) {
            *expected.entry((pair[0].as_str(), pair[1].as_str())).or_default() += 1;
        }

        for ((from, to), count) in expected {
            assert_eq!(graph.weight(from, to), Some(count), "{} -> {}", from, to);
        }
        let total: u32 = graph.neighbors("a").iter().map(|edge| edge.weight).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_self_loop_is_an_edge() {
        let graph = WordGraph::from_text("very very good");
        assert_eq!(graph.weight("very", "very"), Some(1));
        assert_eq!(graph.stats().max_in_degree, 1);
    }

    #[test]
    fn test_neighbors_keep_first_creation_order() {
        let graph = WordGraph::from_text("x c x a x b x a");
        let order: Vec<&str> = graph.neighbors("x").iter().map(|edge| edge.to.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_membership_counts_incoming_only_words() {
        let graph = WordGraph::from_text("alpha beta");
        assert!(graph.has_word("alpha"));
        assert!(graph.has_word("beta"));
        assert!(graph.neighbors("beta").is_empty());
        assert!(!graph.has_word("gamma"));
        assert!(graph.neighbors("gamma").is_empty());
    }

    #[test]
    fn test_single_word_document_is_isolated_vertex() {
        let graph = WordGraph::from_text("Hello!");
        assert_eq!(graph.all_words(), ["hello"]);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors("hello").is_empty());
    }

    #[test]
    fn test_empty_document_is_empty_graph() {
        let graph = WordGraph::from_text("  ?! \n");
        assert!(graph.is_empty());
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn test_empty_destination_registers_source_only() {
        let mut graph = WordGraph::new();
        graph.add_edge("end", "");
        graph.add_edge("", "ignored");

        assert_eq!(graph.all_words(), ["end"]);
        assert!(!graph.has_word(""));
        assert!(!graph.has_word("ignored"));
    }

    #[test]
    fn test_rebuilding_same_document_is_idempotent() {
        let text = "The quick fox.\nThe quick dog, the lazy fox!";
        let first = WordGraph::from_text(text);
        let second = WordGraph::from_text(text);

        let a: Vec<_> = first.edges().collect();
        let b: Vec<_> = second.edges().collect();
        assert_eq!(a, b);
        assert_eq!(first.weight("the", "quick"), Some(2));
    }

    #[test]
    fn test_stats() {
        let graph = WordGraph::from_text("to be or not to be");
        let stats = graph.stats();

        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.distinct_edges, 4);
        assert_eq!(stats.total_weight, 5);
        assert_eq!(stats.max_out_degree, 1);
        assert_eq!(stats.dead_ends, 0);
    }
}
