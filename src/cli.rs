use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::{CancellationToken, Engine, WalkResult};

#[derive(Parser)]
#[command(name = "textgraph")]
#[command(about = "Turn a text document into a weighted word graph and query it")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Text document to build the graph from
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Seed for bridge choice and random walks
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Menu-driven session (default)
    Interactive,

    /// Query bridge words between two words
    Bridge {
        word1: String,
        word2: String,
    },

    /// Insert bridge words into a new text
    Expand {
        /// Text to expand
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Shortest path between two words, or from one word to all others
    Path {
        word1: String,
        word2: Option<String>,
    },

    /// Random walk over the graph (Ctrl-C stops it)
    Walk,

    /// Write the graph as a DOT file and rasterize it
    Render {
        /// Output file stem
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination file
        #[arg(default_value = "textgraph.toml")]
        path: PathBuf,
    },

    /// Print graph statistics
    Stats {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let command = self.command.unwrap_or(Commands::Interactive);

        if let Commands::InitConfig { path } = &command {
            Config::default().save(path)?;
            println!("Default configuration written to {}", path.display());
            return Ok(());
        }

        // Interactive sessions own stdin for the whole run, including the file prompt.
        let mut lines = None;
        let input = match self.input {
            Some(input) => input,
            None if matches!(command, Commands::Interactive) => {
                let lines = lines.insert(spawn_stdin_lines());
                match prompt(lines, "Enter the path of the text file:").await {
                    Some(path) => PathBuf::from(path.trim()),
                    None => return Ok(()),
                }
            }
            None => anyhow::bail!("--input <FILE> is required for this command"),
        };
        let mut engine = Engine::new(self.config.as_deref(), &input, self.seed).await?;

        match command {
            Commands::Interactive => {
                let lines = lines.unwrap_or_else(spawn_stdin_lines);
                run_interactive(engine, lines).await?;
            }
            Commands::Bridge { word1, word2 } => {
                println!("{}", engine.bridge_words(&word1, &word2));
            }
            Commands::Expand { text } => {
                println!("{}", engine.expand_text(&text.join(" ")));
            }
            Commands::Path { word1, word2 } => match word2 {
                Some(word2) => println!("{}", engine.shortest_path(&word1, &word2)),
                None => {
                    for line in engine.shortest_paths_from(&word1) {
                        println!("{}", line);
                    }
                }
            },
            Commands::Walk => {
                let cancel = CancellationToken::new();
                let signal = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        signal.cancel();
                    }
                });
                let result = engine.random_walk_with(&cancel, |word| debug!("walk: {}", word)).await;
                print_walk(&result);
            }
            Commands::Render { name } => {
                println!("{}", engine.render_graph(name.as_deref()));
            }
            Commands::InitConfig { .. } => {}
            Commands::Stats { json } => {
                let stats = engine.stats();
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("Words:          {}", stats.total_words);
                    println!("Distinct edges: {}", stats.distinct_edges);
                    println!("Total weight:   {}", stats.total_weight);
                    println!("Max out-degree: {}", stats.max_out_degree);
                    println!("Max in-degree:  {}", stats.max_in_degree);
                    println!("Dead ends:      {}", stats.dead_ends);
                }
            }
        }

        Ok(())
    }
}

const MENU: &str = "\
Choose an operation:
1. Query bridge words
2. Generate new text from bridge words
3. Shortest path between two words
4. Random walk
5. Render graph diagram
6. Show graph statistics
0. Exit";

async fn run_interactive(mut engine: Engine, mut lines: mpsc::UnboundedReceiver<String>) -> Result<()> {
    let stem = prompt(&mut lines, "Enter a name for the graph image (blank for default):").await;
    println!("{}", engine.render_graph(stem.as_deref()));

    loop {
        let Some(choice) = prompt(&mut lines, MENU).await else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                let Some((word1, word2)) = prompt_two_words(&mut lines).await else {
                    return Ok(());
                };
                println!("{}", engine.bridge_words(&word1, &word2));
            }
            "2" => {
                let Some(text) = prompt(&mut lines, "Enter a line of new text:").await else {
                    return Ok(());
                };
                println!("{}", engine.expand_text(&text));
            }
            "3" => {
                let Some((word1, word2)) = prompt_two_words(&mut lines).await else {
                    return Ok(());
                };
                if word2.is_empty() && !word1.is_empty() {
                    for line in engine.shortest_paths_from(&word1) {
                        println!("{}", line);
                    }
                } else {
                    println!("{}", engine.shortest_path(&word1, &word2));
                }
            }
            "4" => {
                println!("Random walk (press Enter to stop):");
                let result = walk_until_enter(&mut engine, &mut lines).await;
                print_walk(&result);
            }
            "5" => {
                let stem = prompt(&mut lines, "Enter a name for the graph image (blank for default):").await;
                println!("{}", engine.render_graph(stem.as_deref()));
            }
            "6" => {
                let stats = engine.stats();
                println!(
                    "{} words, {} distinct edges, total weight {}",
                    stats.total_words, stats.distinct_edges, stats.total_weight
                );
            }
            "0" => {
                println!("Bye.");
                return Ok(());
            }
            other => println!("Invalid choice {:?}, please try again.", other),
        }
    }
}

/// Run a walk while any line typed on stdin cancels it
async fn walk_until_enter(
    engine: &mut Engine,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> WalkResult {
    let cancel = CancellationToken::new();
    let walk = engine.random_walk_with(&cancel, |word| println!("{}", word));
    tokio::pin!(walk);

    loop {
        tokio::select! {
            result = &mut walk => return result,
            Some(_) = lines.recv(), if !cancel.is_cancelled() => {
                debug!("Stop requested");
                cancel.cancel();
            }
        }
    }
}

fn print_walk(result: &WalkResult) {
    println!("{}", result);
    if let Some(path) = &result.saved_to {
        println!("Walk saved to {}", path.display());
    }
}

async fn prompt_two_words(lines: &mut mpsc::UnboundedReceiver<String>) -> Option<(String, String)> {
    let line = prompt(lines, "Enter two words:").await?;
    let mut words = line.split_whitespace();
    let word1 = words.next().unwrap_or_default().to_string();
    let word2 = words.next().unwrap_or_default().to_string();
    Some((word1, word2))
}

async fn prompt(lines: &mut mpsc::UnboundedReceiver<String>, message: &str) -> Option<String> {
    println!("{}", message);
    let _ = std::io::stdout().flush();
    lines.recv().await
}

/// Read stdin on a plain thread so a pending read never holds up runtime shutdown
fn spawn_stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }
    });

    rx
}
