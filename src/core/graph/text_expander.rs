// src/core/graph/text_expander.rs
use rand::Rng;

use super::{BridgeOutcome, BridgeWordFinder, Tokenizer, WordGraph};

/// Rewrites a sentence by splicing a bridge word into every gap that has one
pub struct TextExpander {
    tokenizer: Tokenizer,
    finder: BridgeWordFinder,
}

impl TextExpander {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            finder: BridgeWordFinder::new(),
        }
    }

    /// Expand `sentence`, choosing uniformly among the bridges of each gap.
    ///
    /// The sentence is tokenized like a document, so the output is lowercase
    /// and free of punctuation.
    pub fn expand<R: Rng>(&self, graph: &WordGraph, sentence: &str, rng: &mut R) -> String {
        let words = self.tokenizer.tokenize(sentence);
        let mut expanded: Vec<String> = Vec::with_capacity(words.len() * 2);

        for pair in words.windows(2) {
            expanded.push(pair[0].clone());

            if let BridgeOutcome::Bridges { bridges, .. } = self.finder.find(graph, &pair[0], &pair[1]) {
                let choice = rng.random_range(0..bridges.len());
                expanded.push(bridges[choice].clone());
            }
        }
        if let Some(last) = words.last() {
            expanded.push(last.clone());
        }

        expanded.join(" ")
    }
}

impl Default for TextExpander {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TEXT: &str = "To explore strange new worlds, to seek out new life and new \
                        civilizations, to boldly go where no one has gone before.";

    #[test]
    fn test_single_bridge_is_inserted() {
        let graph = WordGraph::from_text(TEXT);
        let expander = TextExpander::new();
        let mut rng = StdRng::seed_from_u64(7);

        let output = expander.expand(&graph, "Seek to explore new, worlds", &mut rng);
        assert_eq!(output, "seek to explore strange new worlds");
    }

    #[test]
    fn test_gaps_without_bridges_are_untouched() {
        let graph = WordGraph::from_text(TEXT);
        let expander = TextExpander::new();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(expander.expand(&graph, "unknown words here", &mut rng), "unknown words here");
        assert_eq!(expander.expand(&graph, "alone", &mut rng), "alone");
        assert_eq!(expander.expand(&graph, "  ", &mut rng), "");
    }

    #[test]
    fn test_choice_always_comes_from_bridge_set() {
        let graph = WordGraph::from_text("a x b a y b a z c");
        let expander = TextExpander::new();

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let output = expander.expand(&graph, "a b", &mut rng);
            assert!(
                output == "a x b" || output == "a y b",
                "unexpected expansion {:?}",
                output
            );
        }
    }

    #[test]
    fn test_both_bridges_eventually_chosen() {
        let graph = WordGraph::from_text("a x b a y b");
        let expander = TextExpander::new();
        let mut rng = StdRng::seed_from_u64(99);

        let seen: std::collections::HashSet<String> = (0..64)
            .map(|_| expander.expand(&graph, "a b", &mut rng))
            .collect();
        assert_eq!(seen.len(), 2);
    }
}
