//! Vanishing - tic-tac-toe where your oldest piece disappears.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use vanishing_core::GlyphCategory;
use vanishing_games::{Cli, Command, PlayArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Categories => {
            list_categories();
            Ok(())
        }
        Command::InitConfig { output } => init_config(output),
    }
}

/// Resolve the setup and play until the player quits
#[instrument(skip_all)]
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = vanishing_games::resolve_config(&args).context("Invalid game setup")?;
    info!(
        p1 = %config.player_one().name(),
        p2 = %config.player_two().name(),
        "Starting game"
    );
    vanishing_games::play(config, args.seed).await
}

fn list_categories() {
    for category in GlyphCategory::iter() {
        println!("{:<8} {}", category.to_string(), category.glyphs().join(" "));
    }
}

/// Write a sample setup file
#[instrument(skip(output), fields(output = %output.display()))]
fn init_config(output: std::path::PathBuf) -> Result<()> {
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }
    vanishing_games::write_config(&vanishing_games::sample_config(), &output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}
