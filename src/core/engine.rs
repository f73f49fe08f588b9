// src/core/engine.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn, debug};

use crate::config::Config;
use super::graph::{
    BridgeOutcome, BridgeWordFinder, CancellationToken, DiagramRenderer, DotRenderer,
    GraphStats, PathOutcome, RandomWalker, ShortestPathFinder, TextExpander, WalkOutcome,
    WordGraph, dot, write_artifact,
};

/// A finished random walk and what happened when persisting it
#[derive(Debug, Clone)]
pub struct WalkResult {
    pub outcome: WalkOutcome,
    pub saved_to: Option<PathBuf>,
    pub save_error: Option<String>,
}

impl fmt::Display for WalkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        if let Some(error) = &self.save_error {
            write!(f, "\nFailed to write random walk result: {}", error)?;
        }
        Ok(())
    }
}

/// Owns the word graph built from one document and answers every query on it
pub struct Engine {
    config: Config,
    graph: WordGraph,
    renderer: Box<dyn DiagramRenderer>,
    bridge_finder: BridgeWordFinder,
    expander: TextExpander,
    path_finder: ShortestPathFinder,
    walker: RandomWalker,
    rng: StdRng,
}

impl Engine {
    /// Load configuration, read the document and build its graph.
    ///
    /// Failing to read the document is the only fatal error.
    pub async fn new(config_path: Option<&Path>, input: &Path, seed: Option<u64>) -> Result<Self> {
        let mut config = Config::load_or_default(config_path)?;
        if seed.is_some() {
            config.random.seed = seed;
        }
        debug!("Loaded configuration: {:?}", config);

        let text = tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read document {}", input.display()))?;

        info!("Building word graph from {}", input.display());
        Ok(Self::from_text(config, &text))
    }

    /// Build an engine directly from document text
    pub fn from_text(config: Config, text: &str) -> Self {
        let renderer = Box::new(DotRenderer::new(&config.output, &config.render));
        Self::with_renderer(config, text, renderer)
    }

    pub fn with_renderer(config: Config, text: &str, renderer: Box<dyn DiagramRenderer>) -> Self {
        let graph = WordGraph::from_text(text);
        if graph.is_empty() {
            warn!("Document contains no words; the graph is empty");
        } else {
            info!("Graph ready: {} words, {} edges", graph.word_count(), graph.edge_count());
        }

        let rng = match config.random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let walker = RandomWalker::new(
            Duration::from_millis(config.walk.step_delay_ms),
            config.walk.max_steps,
        );

        Self {
            config,
            graph,
            renderer,
            bridge_finder: BridgeWordFinder::new(),
            expander: TextExpander::new(),
            path_finder: ShortestPathFinder::new(),
            walker,
            rng,
        }
    }

    #[cfg(test)]
    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    #[cfg(test)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Draw the whole graph; returns a line describing what was produced
    pub fn render_graph(&self, stem: Option<&str>) -> String {
        let stem = match stem.map(str::trim) {
            Some(stem) if !stem.is_empty() => stem,
            _ => self.config.output.graph_stem.as_str(),
        };

        match self.renderer.render(stem, &dot::to_dot(&self.graph)) {
            Ok(diagram) => match diagram.image_path {
                Some(image) => format!("Graph diagram generated: {}", image.display()),
                None => format!(
                    "Graph description written to {} (no image generated)",
                    diagram.dot_path.display()
                ),
            },
            Err(e) => {
                warn!("Failed to write graph description: {}", e);
                format!("Failed to write DOT file: {}", e)
            }
        }
    }

    pub fn bridge_words(&self, word1: &str, word2: &str) -> BridgeOutcome {
        self.bridge_finder.query(
            &self.graph,
            word1,
            word2,
            self.renderer.as_ref(),
            &self.config.output.highlight_stem,
        )
    }

    pub fn expand_text(&mut self, text: &str) -> String {
        self.expander.expand(&self.graph, text, &mut self.rng)
    }

    pub fn shortest_path(&self, word1: &str, word2: &str) -> PathOutcome {
        self.path_finder.shortest_path(&self.graph, word1, word2)
    }

    /// Shortest paths from one word to every other word, one line each
    pub fn shortest_paths_from(&self, word: &str) -> Vec<String> {
        match self.path_finder.shortest_paths_from(&self.graph, word) {
            Ok(outcomes) => outcomes.iter().map(ToString::to_string).collect(),
            Err(err) => vec![err.to_string()],
        }
    }

    #[cfg(test)]
    pub async fn random_walk(&mut self, cancel: &CancellationToken) -> WalkResult {
        self.random_walk_with(cancel, |_| {}).await
    }

    /// Walk the graph, reporting each word to `on_step`, and persist the path
    pub async fn random_walk_with<F>(&mut self, cancel: &CancellationToken, on_step: F) -> WalkResult
    where
        F: FnMut(&str),
    {
        let outcome = self
            .walker
            .walk_with(&self.graph, &mut self.rng, cancel, on_step)
            .await;

        if outcome == WalkOutcome::EmptyGraph {
            return WalkResult { outcome, saved_to: None, save_error: None };
        }

        let path = self.config.walk_file_path();
        match write_artifact(&path, &outcome.to_string()) {
            Ok(()) => {
                info!("Random walk saved to {}", path.display());
                WalkResult { outcome, saved_to: Some(path), save_error: None }
            }
            Err(e) => {
                warn!("Failed to write random walk result: {}", e);
                WalkResult { outcome, saved_to: None, save_error: Some(e.to_string()) }
            }
        }
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }
}
