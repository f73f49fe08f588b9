mod engine;

// Word graph construction and queries
mod graph;

pub use graph::CancellationToken;

// Export the main engine
pub use engine::{Engine, WalkResult};
