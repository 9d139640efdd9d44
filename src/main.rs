use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::audio::{Silent, Speaker, TerminalBell};
use grid_snake::game::{FoodPlacement, GameConfig, GameEngine};
use grid_snake::shell::Shell;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, in your terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between two moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Never place food under the snake
    #[arg(long)]
    avoid_snake: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound cues
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.avoid_snake {
            config.food_placement = FoodPlacement::AvoidSnake;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

/// The terminal belongs to the game, so logs only go to a file
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let engine = GameEngine::new(config).context("Invalid game configuration")?;

    if cli.mute {
        let mut shell = Shell::new(engine, Silent);
        return shell.run().await;
    }

    match Speaker::new() {
        Ok(speaker) => {
            let mut shell = Shell::new(engine, speaker);
            shell.run().await
        }
        Err(err) => {
            warn!(?err, "no audio output device, falling back to terminal bell");
            let mut shell = Shell::new(engine, TerminalBell::stderr());
            shell.run().await
        }
    }
}
