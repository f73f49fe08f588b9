// src/core/graph/renderer.rs
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

use crate::config::{OutputConfig, RenderConfig};
use crate::error::{Result, TextGraphError};

/// Files produced for one diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub dot_path: PathBuf,
    /// `None` when rasterizing was disabled or failed
    pub image_path: Option<PathBuf>,
}

/// Turns DOT text into diagram artifacts.
///
/// An `Err` means the DOT file itself could not be written. A failed
/// rasterizer is not an error; it shows up as a missing `image_path`.
pub trait DiagramRenderer {
    fn render(&self, stem: &str, dot: &str) -> Result<RenderedDiagram>;
}

/// Writes `<dir>/<stem>.dot` and runs Graphviz on it
pub struct DotRenderer {
    output_dir: PathBuf,
    binary: String,
    format: String,
    enabled: bool,
}

impl DotRenderer {
    pub fn new(output: &OutputConfig, render: &RenderConfig) -> Self {
        Self {
            output_dir: output.dir.clone(),
            binary: render.binary.clone(),
            format: render.format.clone(),
            enabled: render.enabled,
        }
    }

    fn rasterize(&self, dot_path: &Path, image_path: &Path) -> Result<()> {
        let status = Command::new(&self.binary)
            .arg(format!("-T{}", self.format))
            .arg(dot_path)
            .arg("-o")
            .arg(image_path)
            .status()
            .map_err(|e| TextGraphError::Render(format!("failed to run {}: {}", self.binary, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(TextGraphError::Render(format!("{} exited with {}", self.binary, status)))
        }
    }
}

impl DiagramRenderer for DotRenderer {
    fn render(&self, stem: &str, dot: &str) -> Result<RenderedDiagram> {
        let dot_path = self.output_dir.join(format!("{}.dot", stem));
        write_artifact(&dot_path, dot)?;
        debug!("Wrote graph description to {}", dot_path.display());

        if !self.enabled {
            return Ok(RenderedDiagram { dot_path, image_path: None });
        }

        let image_path = self.output_dir.join(format!("{}.{}", stem, self.format));
        match self.rasterize(&dot_path, &image_path) {
            Ok(()) => {
                info!("Diagram generated: {}", image_path.display());
                Ok(RenderedDiagram { dot_path, image_path: Some(image_path) })
            }
            Err(e) => {
                warn!("Could not rasterize {}: {}", dot_path.display(), e);
                Ok(RenderedDiagram { dot_path, image_path: None })
            }
        }
    }
}

/// Create or overwrite a text artifact, creating its directory if needed
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    fn renderer_in(dir: &Path, binary: &str, enabled: bool) -> DotRenderer {
        let output = OutputConfig {
            dir: dir.to_path_buf(),
            graph_stem: "graph".to_string(),
            highlight_stem: "highlight".to_string(),
            walk_file: "random_walk.txt".to_string(),
        };
        let render = RenderConfig {
            enabled,
            binary: binary.to_string(),
            format: "png".to_string(),
        };
        DotRenderer::new(&output, &render)
    }

    #[test]
    fn test_missing_rasterizer_keeps_dot_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let renderer = renderer_in(temp.path(), "textgraph-no-such-rasterizer", true);

        let diagram = renderer.render("graph", "digraph G {\n}\n").unwrap();

        temp.child("graph.dot").assert(predicate::str::contains("digraph G"));
        temp.child("graph.png").assert(predicate::path::missing());
        assert_eq!(diagram.image_path, None);
        assert_eq!(diagram.dot_path, temp.path().join("graph.dot"));
    }

    #[test]
    fn test_disabled_rasterizer_skips_image() {
        let temp = assert_fs::TempDir::new().unwrap();
        let renderer = renderer_in(temp.path(), "dot", false);

        let diagram = renderer.render("highlight", "digraph G {\n}\n").unwrap();
        assert!(diagram.image_path.is_none());
        temp.child("highlight.dot").assert(predicate::path::exists());
    }

    #[test]
    fn test_previous_contents_overwritten() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("graph.dot").write_str("stale").unwrap();
        let renderer = renderer_in(temp.path(), "dot", false);

        renderer.render("graph", "digraph G {\n}\n").unwrap();
        temp.child("graph.dot").assert("digraph G {\n}\n");
    }

    #[test]
    fn test_unwritable_directory_is_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let blocker = temp.child("blocker");
        blocker.write_str("not a directory").unwrap();
        let renderer = renderer_in(blocker.path(), "dot", false);

        assert!(renderer.render("graph", "digraph G {}").is_err());
    }

    #[test]
    fn test_write_artifact_creates_parent() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join("nested").join("walk.txt");

        write_artifact(&path, "a -> b").unwrap();
        temp.child("nested/walk.txt").assert("a -> b");
    }
}
