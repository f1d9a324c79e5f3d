use anyhow::{Result, anyhow};
use clap::Parser;
use grid_snake::game::{GameConfig, Session};
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use grid_snake::persistence::JsonFileStore;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, in your terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Only place food on cells the snake does not occupy
    #[arg(long)]
    food_avoids_snake: bool,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Where diagnostic logs are appended
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.food_avoids_snake {
            config.food_avoids_snake = true;
        }

        config.validate().map_err(|msg| anyhow!(msg))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file)?;

    let config = cli.game_config()?;
    info!(?config, surface = ?config.surface_size(), "starting grid snake");

    let session = match cli.seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::new(config),
    };
    let store = JsonFileStore::new(cli.high_score_file);
    info!(path = ?store.path(), "high score file");

    let mut human_mode = HumanMode::new(session, store);
    human_mode.run().await?;

    Ok(())
}
