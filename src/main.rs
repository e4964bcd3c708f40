use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use snek::config::{self, WorldConfig};
use snek::game::SnakeGame;

#[derive(Parser)]
#[command(name = "snek")]
#[command(version, about = "A simple snake game in the terminal")]
struct Cli {
    /// Grid cells per apple
    #[arg(long, default_value_t = config::APPLE_DENSITY, value_parser = clap::value_parser!(u32).range(1..))]
    apple_density: u32,

    /// Starting length of the snake
    #[arg(long, default_value_t = config::INITIAL_SNAKE_LENGTH, value_parser = clap::value_parser!(u32).range(1..))]
    initial_length: u32,

    /// Segments gained per apple
    #[arg(long, default_value_t = config::SNAKE_GROWTH_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    growth_rate: u32,

    /// Seconds between moves
    #[arg(long, default_value_t = config::MOVE_DELAY_SECS)]
    move_delay: f64,

    /// Minimum distance between a new apple and anything else
    #[arg(long, default_value_t = config::APPLE_SPACING)]
    apple_spacing: u32,

    /// Rainbow snake
    #[arg(long)]
    pride: bool,

    /// Start playing straight away instead of showing the menu
    #[arg(long)]
    skip_menu: bool,

    /// Write a log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug messages too
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn world_config(&self) -> Result<WorldConfig> {
        let move_delay = Duration::try_from_secs_f64(self.move_delay)
            .context("--move-delay must be a non-negative number of seconds")?;

        Ok(WorldConfig {
            apple_density: self.apple_density,
            initial_snake_length: self.initial_length,
            snake_growth_rate: self.growth_rate,
            move_delay,
            apple_spacing: self.apple_spacing,
            pride_theme: self.pride,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the game, so logs can only go to a file
    if let Some(path) = &cli.log_file {
        let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    }

    info!("Starting snek");

    let mut game = SnakeGame::new(cli.world_config()?, !cli.skip_menu)?;
    game.run()?;

    println!("High score: {}", game.high_score());
    Ok(())
}
