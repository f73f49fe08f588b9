// src/core/graph/bridge_finder.rs
use std::fmt;
use tracing::{debug, warn};

use super::dot::{to_dot_highlighted, Highlight};
use super::lookup::{resolve_pair, LookupError};
use super::{DiagramRenderer, Tokenizer, WordGraph};

/// Result of a bridge-word query, displayed verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeOutcome {
    Invalid(LookupError),
    NoBridge { source: String, target: String },
    Bridges { source: String, target: String, bridges: Vec<String> },
    /// Bridges were found but the highlighted diagram could not be written
    HighlightWriteFailed,
}

#[cfg(test)]
impl BridgeOutcome {
    pub fn bridges(&self) -> &[String] {
        match self {
            BridgeOutcome::Bridges { bridges, .. } => bridges,
            _ => &[],
        }
    }
}

impl fmt::Display for BridgeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeOutcome::Invalid(err) => write!(f, "{}", err),
            BridgeOutcome::NoBridge { source, target } => {
                write!(f, "No bridge words from \"{}\" to \"{}\"!", source, target)
            }
            BridgeOutcome::Bridges { source, target, bridges } => write!(
                f,
                "The bridge words from \"{}\" to \"{}\" are: {}",
                source,
                target,
                bridges.join(", ")
            ),
            BridgeOutcome::HighlightWriteFailed => {
                write!(f, "Failed to write DOT file with highlights!")
            }
        }
    }
}

/// Finds words `m` such that `source -> m -> target` is a 2-hop path
pub struct BridgeWordFinder {
    tokenizer: Tokenizer,
}

impl BridgeWordFinder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Bridge words between two normalized words, in `source`'s edge order
    pub fn bridges_between(graph: &WordGraph, source: &str, target: &str) -> Vec<String> {
        graph
            .neighbors(source)
            .iter()
            .filter(|edge| graph.weight(&edge.to, target).is_some())
            .map(|edge| edge.to.clone())
            .collect()
    }

    /// Validate raw input and look up bridge words without side effects
    pub fn find(&self, graph: &WordGraph, word1: &str, word2: &str) -> BridgeOutcome {
        let (source, target) = match resolve_pair(graph, &self.tokenizer, word1, word2) {
            Ok(pair) => pair,
            Err(err) => return BridgeOutcome::Invalid(err),
        };

        let bridges = Self::bridges_between(graph, &source, &target);
        debug!("{} bridge word(s) from {} to {}", bridges.len(), source, target);

        if bridges.is_empty() {
            BridgeOutcome::NoBridge { source, target }
        } else {
            BridgeOutcome::Bridges { source, target, bridges }
        }
    }

    /// Like [`find`](Self::find), and on success also draws a diagram with the
    /// endpoints and bridges highlighted. If that diagram cannot be written the
    /// outcome becomes [`BridgeOutcome::HighlightWriteFailed`].
    pub fn query(
        &self,
        graph: &WordGraph,
        word1: &str,
        word2: &str,
        renderer: &dyn DiagramRenderer,
        stem: &str,
    ) -> BridgeOutcome {
        let outcome = self.find(graph, word1, word2);

        if let BridgeOutcome::Bridges { source, target, bridges } = &outcome {
            let highlight = Highlight { source, target, bridges };
            let dot = to_dot_highlighted(graph, &highlight);

            if let Err(e) = renderer.render(stem, &dot) {
                warn!("Failed to write highlighted diagram: {}", e);
                return BridgeOutcome::HighlightWriteFailed;
            }
        }

        outcome
    }
}

impl Default for BridgeWordFinder {
    fn default() -> Self {
        Self::new()
    }
}
