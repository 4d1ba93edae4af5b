//! Terminal host for vanishing tic-tac-toe.
//!
//! # Architecture
//!
//! - **CLI**: clap definitions for the `vanishing` binary
//! - **Setup**: TOML setup files, flag overrides and validation
//! - **Runner**: the tokio loop that feeds input and deadlines to a
//!   [`GameSession`](vanishing_core::GameSession)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod runner;
mod setup;

// Crate-level exports - Command line
pub use cli::{Cli, Command, PlayArgs};

// Crate-level exports - Setup
pub use setup::{default_config, load_config, resolve_config, sample_config, write_config};

// Crate-level exports - Game loop
pub use runner::{format_clock, handle_input, play, render, Input, Step};
