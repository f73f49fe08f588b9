// src/core/graph/dot.rs
//! Graphviz DOT serialization of a [`WordGraph`].

use std::fmt::Write;

use super::WordGraph;

const ENDPOINT_COLOR: &str = "blue";
const BRIDGE_COLOR: &str = "green";

/// Words to emphasise in a bridge-word diagram
#[derive(Debug, Clone)]
pub struct Highlight<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub bridges: &'a [String],
}

impl Highlight<'_> {
    fn color_of(&self, word: &str) -> Option<&'static str> {
        if word == self.source || word == self.target {
            Some(ENDPOINT_COLOR)
        } else if self.bridges.iter().any(|bridge| bridge == word) {
            Some(BRIDGE_COLOR)
        } else {
            None
        }
    }
}

/// Serialize every distinct edge once, labelled with its weight
pub fn to_dot(graph: &WordGraph) -> String {
    let mut dot = String::from("digraph G {\n");

    // Vertices without edges would otherwise vanish from the picture.
    for word in graph.all_words() {
        if graph.neighbors(word).is_empty() {
            let _ = writeln!(dot, "    \"{}\";", word);
        }
    }
    push_edges(&mut dot, graph);

    dot.push_str("}\n");
    dot
}

/// Serialize the graph with endpoint and bridge words drawn bold and coloured
pub fn to_dot_highlighted(graph: &WordGraph, highlight: &Highlight<'_>) -> String {
    let mut dot = String::from("digraph G {\n");

    for word in graph.all_words() {
        match highlight.color_of(word) {
            Some(color) => {
                let _ = writeln!(
                    dot,
                    "    \"{word}\" [label=<<font color=\"{color}\"><b>{word}</b></font>>];"
                );
            }
            None => {
                let _ = writeln!(dot, "    \"{}\";", word);
            }
        }
    }
    push_edges(&mut dot, graph);

    dot.push_str("}\n");
    dot
}

fn push_edges(dot: &mut String, graph: &WordGraph) {
    for (from, to, weight) in graph.edges() {
        let _ = writeln!(dot, "    \"{}\" -> \"{}\" [label=\"{}\"];", from, to, weight);
    }
}
