//! Session setup: setup files, command-line overrides and validation.

use crate::cli::PlayArgs;
use std::path::Path;
use tracing::{debug, info, instrument};
use vanishing_core::{ConfigError, GameConfig, GlyphCategory, PlayerConfig, TimerMode};

/// Configuration used when no setup file is given.
pub fn default_config() -> GameConfig {
    GameConfig::new(
        PlayerConfig::new("Player 1".to_string(), GlyphCategory::Animals),
        PlayerConfig::new("Player 2".to_string(), GlyphCategory::Food),
    )
}

/// A timed two-human example, written by `vanishing init-config`.
pub fn sample_config() -> GameConfig {
    GameConfig::new(
        PlayerConfig::new("Ada".to_string(), GlyphCategory::Animals),
        PlayerConfig::new("Grace".to_string(), GlyphCategory::Nature),
    )
    .with_duration(Some(180))
    .with_timer_mode(TimerMode::PerPlayer)
}

/// Loads a setup file from TOML.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    debug!("Loading setup file");
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::new(format!("Failed to read setup file: {}", e)))?;

    let config: GameConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::new(format!("Failed to parse setup file: {}", e)))?;

    info!(
        p1 = %config.player_one().name(),
        p2 = %config.player_two().name(),
        "Setup file loaded"
    );
    Ok(config)
}

/// Writes `config` to `path` as TOML.
#[instrument(skip(config, path), fields(path = %path.as_ref().display()))]
pub fn write_config(config: &GameConfig, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::new(format!("Failed to serialize setup: {}", e)))?;
    std::fs::write(path.as_ref(), content)
        .map_err(|e| ConfigError::new(format!("Failed to write setup file: {}", e)))?;
    info!("Setup file written");
    Ok(())
}

/// Builds the session configuration for `vanishing play`.
///
/// Starts from the setup file (or [`default_config`]), applies command-line
/// overrides, and validates the result.
#[instrument(skip(args))]
pub fn resolve_config(args: &PlayArgs) -> Result<GameConfig, ConfigError> {
    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };
    let config = apply_overrides(base, args);
    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

fn apply_overrides(base: GameConfig, args: &PlayArgs) -> GameConfig {
    let seat = |player: &PlayerConfig, name: &Option<String>, category: Option<GlyphCategory>| {
        PlayerConfig::new(
            name.clone().unwrap_or_else(|| player.name().clone()),
            category.unwrap_or(*player.category()),
        )
    };
    let player_one = seat(base.player_one(), &args.p1_name, args.p1_category);
    let player_two = seat(base.player_two(), &args.p2_name, args.p2_category);

    let duration = args
        .minutes
        .map(|minutes| minutes.saturating_mul(60))
        .or(*base.duration_seconds());
    let timer_mode = if args.per_player {
        TimerMode::PerPlayer
    } else {
        *base.timer_mode()
    };

    let config = GameConfig::new(player_one, player_two)
        .with_duration(duration)
        .with_timer_mode(timer_mode)
        .with_quick_bonus(*base.quick_bonus() && !args.no_bonus);

    if args.vs_computer || *base.vs_computer() {
        config.against_computer()
    } else {
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanishing_core::COMPUTER_NAME;

    #[test]
    fn test_flags_override_defaults() {
        let args = PlayArgs {
            p1_name: Some("Ada".to_string()),
            p2_category: Some(GlyphCategory::Travel),
            minutes: Some(2),
            per_player: true,
            no_bonus: true,
            ..PlayArgs::default()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.player_one().name(), "Ada");
        assert_eq!(*config.player_two().category(), GlyphCategory::Travel);
        assert_eq!(*config.duration_seconds(), Some(120));
        assert_eq!(*config.timer_mode(), TimerMode::PerPlayer);
        assert!(!*config.quick_bonus());
    }

    #[test]
    fn test_vs_computer_renames_player_two() {
        let args = PlayArgs {
            vs_computer: true,
            p2_name: Some("Grace".to_string()),
            ..PlayArgs::default()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.player_two().name(), COMPUTER_NAME);
        assert!(*config.vs_computer());
    }

    #[test]
    fn test_same_category_for_two_humans_rejected() {
        let args = PlayArgs {
            p1_category: Some(GlyphCategory::Sports),
            p2_category: Some(GlyphCategory::Sports),
            ..PlayArgs::default()
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_zero_minutes_rejected() {
        let args = PlayArgs {
            minutes: Some(0),
            ..PlayArgs::default()
        };
        assert!(resolve_config(&args).is_err());
    }
}
