// src/core/graph/random_walker.rs
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use rand::Rng;
use serde::{Serialize, Deserialize};
use tracing::debug;

use super::WordGraph;

/// Shared stop signal, checked by the walk between steps
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The current word has no outgoing edges
    DeadEnd,
    /// Every outgoing edge of the current word was already taken
    EdgesExhausted,
    /// Stop was requested from outside
    Cancelled,
    /// The configured step limit was reached
    StepLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkReport {
    pub path: Vec<String>,
    pub stop: StopReason,
}

impl WalkReport {
    /// Path joined the way it is persisted
    pub fn path_text(&self) -> String {
        self.path.join(" -> ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    EmptyGraph,
    Walked(WalkReport),
}

impl fmt::Display for WalkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkOutcome::EmptyGraph => write!(f, "Graph is empty"),
            WalkOutcome::Walked(report) => write!(f, "{}", report.path_text()),
        }
    }
}

/// Random traversal that never takes the same directed edge twice
pub struct RandomWalker {
    step_delay: Duration,
    max_steps: Option<usize>,
}

impl RandomWalker {
    pub fn new(step_delay: Duration, max_steps: Option<usize>) -> Self {
        Self { step_delay, max_steps }
    }

    pub async fn walk<R: Rng>(
        &self,
        graph: &WordGraph,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> WalkOutcome {
        self.walk_with(graph, rng, cancel, |_| {}).await
    }

    /// Walk from a uniformly chosen start word, calling `on_step` with every
    /// word as it is reached (the start word included).
    pub async fn walk_with<R, F>(
        &self,
        graph: &WordGraph,
        rng: &mut R,
        cancel: &CancellationToken,
        mut on_step: F,
    ) -> WalkOutcome
    where
        R: Rng,
        F: FnMut(&str),
    {
        let words = graph.all_words();
        if words.is_empty() {
            return WalkOutcome::EmptyGraph;
        }

        let mut current = words[rng.random_range(0..words.len())].as_str();
        let mut path = vec![current.to_string()];
        let mut visited: HashSet<(&str, &str)> = HashSet::new();
        on_step(current);

        let stop = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if self.max_steps.map_or(false, |max| visited.len() >= max) {
                break StopReason::StepLimit;
            }

            let edges = graph.neighbors(current);
            if edges.is_empty() {
                break StopReason::DeadEnd;
            }

            let candidates: Vec<&str> = edges
                .iter()
                .map(|edge| edge.to.as_str())
                .filter(|to| !visited.contains(&(current, *to)))
                .collect();
            if candidates.is_empty() {
                break StopReason::EdgesExhausted;
            }

            let next = candidates[rng.random_range(0..candidates.len())];
            visited.insert((current, next));
            path.push(next.to_string());
            current = next;
            on_step(current);

            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        };

        debug!("Walk stopped after {} step(s): {:?}", visited.len(), stop);
        WalkOutcome::Walked(WalkReport { path, stop })
    }
}

impl Default for RandomWalker {
    fn default() -> Self {
        Self::new(Duration::ZERO, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TEXT: &str = "the cat sat on the mat and the dog sat on the cat \
                        while the cat ran to the dog and the mat";

    fn report(outcome: WalkOutcome) -> WalkReport {
        match outcome {
            WalkOutcome::Walked(report) => report,
            WalkOutcome::EmptyGraph => panic!("expected a walk"),
        }
    }

    #[tokio::test]
    async fn test_empty_graph() {
        let graph = WordGraph::new();
        let walker = RandomWalker::default();
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = walker.walk(&graph, &mut rng, &CancellationToken::new()).await;
        assert_eq!(outcome, WalkOutcome::EmptyGraph);
        assert_eq!(outcome.to_string(), "Graph is empty");
    }

    #[tokio::test]
    async fn test_never_repeats_an_edge() {
        let graph = WordGraph::from_text(TEXT);
        let walker = RandomWalker::default();

        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let walk = report(walker.walk(&graph, &mut rng, &CancellationToken::new()).await);

            let mut seen = HashSet::new();
            for pair in walk.path.windows(2) {
                assert!(graph.weight(&pair[0], &pair[1]).is_some());
                assert!(seen.insert((pair[0].clone(), pair[1].clone())), "seed {} repeated {:?}", seed, pair);
            }
            assert!(walk.path.len() <= graph.edge_count() + 1);
            assert!(matches!(walk.stop, StopReason::DeadEnd | StopReason::EdgesExhausted));
        }
    }

    #[tokio::test]
    async fn test_two_cycle_stops_when_edges_used_up() {
        let graph = WordGraph::from_text("ping pong ping pong");
        let walker = RandomWalker::default();
        let mut rng = StdRng::seed_from_u64(3);

        let walk = report(walker.walk(&graph, &mut rng, &CancellationToken::new()).await);
        assert_eq!(walk.path.len(), 3);
        assert_eq!(walk.path[0], walk.path[2]);
        assert_eq!(walk.stop, StopReason::EdgesExhausted);
    }

    #[tokio::test]
    async fn test_dead_end() {
        let graph = WordGraph::from_text("only");
        let walker = RandomWalker::default();
        let mut rng = StdRng::seed_from_u64(11);

        let walk = report(walker.walk(&graph, &mut rng, &CancellationToken::new()).await);
        assert_eq!(walk.path, ["only"]);
        assert_eq!(walk.stop, StopReason::DeadEnd);
        assert_eq!(walk.path_text(), "only");
    }

    #[tokio::test]
    async fn test_cancel_before_first_step_keeps_start() {
        let graph = WordGraph::from_text(TEXT);
        let walker = RandomWalker::default();
        let mut rng = StdRng::seed_from_u64(5);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let walk = report(walker.walk(&graph, &mut rng, &cancel).await);
        assert_eq!(walk.path.len(), 1);
        assert_eq!(walk.stop, StopReason::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_mid_walk_keeps_partial_path() {
        // A long chain of distinct words never dead-ends before the signal.
        let text: Vec<String> = (0..40).map(|i| format!("w{}", "x".repeat(i + 1))).collect();
        let graph = WordGraph::from_text(&text.join(" "));
        let walker = RandomWalker::default();
        let cancel = CancellationToken::new();

        let mut steps = 0;
        let mut rng = StdRng::seed_from_u64(0);
        let signal = cancel.clone();
        let walk = report(
            walker
                .walk_with(&graph, &mut rng, &cancel, |_| {
                    steps += 1;
                    if steps == 3 {
                        signal.cancel();
                    }
                })
                .await,
        );

        if walk.stop == StopReason::Cancelled {
            assert_eq!(walk.path.len(), 3);
        } else {
            // Started close enough to the end of the chain to fall off first.
            assert_eq!(walk.stop, StopReason::DeadEnd);
            assert!(walk.path.len() <= 3);
        }
    }

    #[tokio::test]
    async fn test_step_limit() {
        let graph = WordGraph::from_text("a b c a b c a b c");
        let walker = RandomWalker::new(Duration::ZERO, Some(2));
        let mut rng = StdRng::seed_from_u64(8);

        let walk = report(walker.walk(&graph, &mut rng, &CancellationToken::new()).await);
        assert_eq!(walk.path.len(), 3);
        assert_eq!(walk.stop, StopReason::StepLimit);
    }

    #[tokio::test]
    async fn test_step_delay_is_applied() {
        let graph = WordGraph::from_text("one two three");
        let walker = RandomWalker::new(Duration::from_millis(5), None);
        let mut rng = StdRng::seed_from_u64(2);

        let started = std::time::Instant::now();
        let walk = report(walker.walk(&graph, &mut rng, &CancellationToken::new()).await);
        let steps = walk.path.len() as u32 - 1;
        assert!(started.elapsed() >= Duration::from_millis(5) * steps);
    }
}
