// src/core/graph/mod.rs
//! Word-adjacency graph and the queries answered over it.
//!
//! A document is tokenized into lowercase words, every adjacent pair becomes
//! a weighted directed edge, and the graph is then only read: bridge words,
//! bridge-guided text expansion, shortest paths and random walks.

mod tokenizer;
mod word_graph;
mod lookup;
mod bridge_finder;
mod text_expander;
mod shortest_path;
mod random_walker;
mod renderer;
pub mod dot;

pub use tokenizer::Tokenizer;
pub use word_graph::{WordGraph, GraphStats};
pub use bridge_finder::{BridgeWordFinder, BridgeOutcome};
pub use text_expander::TextExpander;
pub use shortest_path::{ShortestPathFinder, PathOutcome};
pub use random_walker::{RandomWalker, CancellationToken, WalkOutcome};
pub use renderer::{DiagramRenderer, DotRenderer, write_artifact};
