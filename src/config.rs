use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TextGraphError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where artifacts are written
    pub output: OutputConfig,

    /// External diagram rasterizer settings
    pub render: RenderConfig,

    /// Random walk behaviour
    pub walk: WalkConfig,

    /// Randomness provider settings
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving diagrams and walk results
    pub dir: PathBuf,

    /// File stem of the full graph diagram
    pub graph_stem: String,

    /// File stem of the bridge-word highlight diagram
    pub highlight_stem: String,

    /// File name of the last random walk
    pub walk_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether to invoke the rasterizer after writing a DOT file
    pub enabled: bool,

    /// Rasterizer executable (Graphviz `dot` by default)
    pub binary: String,

    /// Image format passed as `-T<format>`
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Pause between walk steps, in milliseconds
    pub step_delay_ms: u64,

    /// Upper bound on traversed edges
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Fixed seed; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            graph_stem: "graph".to_string(),
            highlight_stem: "highlight".to_string(),
            walk_file: "random_walk.txt".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            binary: "dot".to_string(),
            format: "png".to_string(),
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 300,
            max_steps: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| TextGraphError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TextGraphError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                let candidates = [
                    "TextGraph.toml",
                    "textgraph.toml",
                    ".textgraph.toml",
                ];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn walk_file_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.walk_file)
    }
}
