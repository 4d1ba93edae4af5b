//! Command-line interface for vanishing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vanishing_core::GlyphCategory;

/// Vanishing tic-tac-toe - three pieces each, the oldest one disappears
#[derive(Parser, Debug)]
#[command(name = "vanishing")]
#[command(about = "Vanishing tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game
    Play(PlayArgs),

    /// List the glyph categories players can choose from
    Categories,

    /// Write a sample setup file
    InitConfig {
        /// Where to write the file
        #[arg(short, long, default_value = "vanishing.toml")]
        output: PathBuf,
    },
}

/// Options for `vanishing play`. Flags override values from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Setup file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Player 1 name
    #[arg(long)]
    pub p1_name: Option<String>,

    /// Player 2 name
    #[arg(long)]
    pub p2_name: Option<String>,

    /// Player 1 glyph category
    #[arg(long)]
    pub p1_category: Option<GlyphCategory>,

    /// Player 2 glyph category
    #[arg(long)]
    pub p2_category: Option<GlyphCategory>,

    /// Let the computer play as player 2
    #[arg(long)]
    pub vs_computer: bool,

    /// Game length in minutes (untimed if omitted)
    #[arg(short, long)]
    pub minutes: Option<u32>,

    /// Give each player their own clock
    #[arg(long)]
    pub per_player: bool,

    /// Disable the quick-move bonus
    #[arg(long)]
    pub no_bonus: bool,

    /// Seed for glyph draws and computer moves
    #[arg(long)]
    pub seed: Option<u64>,
}
