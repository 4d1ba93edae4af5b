//! Session configuration.
//!
//! A [`GameConfig`] is built once by the setup collaborator (the CLI, a UI),
//! checked with [`GameConfig::validate`], and then handed to a
//! [`GameSession`](crate::GameSession), which treats it as read-only for the
//! session's lifetime.

use super::types::{Glyph, PlayerId};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Family of glyphs a player draws from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GlyphCategory {
    /// Animal faces.
    Animals,
    /// Snacks and treats.
    Food,
    /// Balls and games.
    Sports,
    /// Flowers and plants.
    Nature,
    /// Vehicles and landmarks.
    Travel,
}

impl GlyphCategory {
    /// The nine glyphs of this category.
    pub fn glyphs(self) -> &'static [Glyph] {
        match self {
            Self::Animals => &["🐶", "🐱", "🐵", "🐰", "🦊", "🐼", "🐨", "🦁", "🐯"],
            Self::Food => &["🍕", "🍟", "🍔", "🍩", "🍦", "🍭", "🍫", "🍿", "🥤"],
            Self::Sports => &["⚽️", "🏀", "🏈", "🎾", "🏐", "🏉", "🎱", "🏓", "⛳️"],
            Self::Nature => &["🌸", "🌺", "🌻", "🌹", "🌴", "🌵", "🍄", "🌈", "⭐️"],
            Self::Travel => &["✈️", "🚗", "🚢", "🚁", "🚂", "🚲", "🏖️", "🗽", "🏰"],
        }
    }
}

/// How the game clock is split between players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TimerMode {
    /// One clock, consumed by whoever is moving.
    #[default]
    Shared,
    /// One clock per player, each running only on that player's turn.
    PerPlayer,
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct PlayerConfig {
    /// Display name.
    name: String,
    /// Glyph family this player draws from.
    category: GlyphCategory,
}

impl PlayerConfig {
    /// Glyphs this player can place.
    pub fn glyphs(&self) -> &'static [Glyph] {
        self.category.glyphs()
    }
}

/// Name given to player 2 when the computer plays.
pub const COMPUTER_NAME: &str = "Computer";

/// Full configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// First player (always human).
    player_one: PlayerConfig,

    /// Second player, human or computer.
    player_two: PlayerConfig,

    /// Player 2 is driven by the computer policy.
    #[serde(default)]
    vs_computer: bool,

    /// Game length in seconds; `None` plays until someone wins.
    #[serde(default)]
    duration_seconds: Option<u32>,

    /// How the clock is split when the game is timed.
    #[serde(default)]
    timer_mode: TimerMode,

    /// Award bonus time for quick moves.
    #[serde(default = "default_quick_bonus")]
    quick_bonus: bool,
}

fn default_quick_bonus() -> bool {
    true
}

impl GameConfig {
    /// Creates an untimed two-human configuration with the quick-move bonus on.
    #[instrument(skip(player_one, player_two), fields(p1 = %player_one.name, p2 = %player_two.name))]
    pub fn new(player_one: PlayerConfig, player_two: PlayerConfig) -> Self {
        Self {
            player_one,
            player_two,
            vs_computer: false,
            duration_seconds: None,
            timer_mode: TimerMode::default(),
            quick_bonus: default_quick_bonus(),
        }
    }

    /// Lets the computer play as player 2, renamed to [`COMPUTER_NAME`].
    pub fn against_computer(mut self) -> Self {
        self.vs_computer = true;
        self.player_two.name = COMPUTER_NAME.to_string();
        self
    }

    /// Sets the game length in seconds (`None` for an untimed game).
    pub fn with_duration(mut self, seconds: Option<u32>) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Sets the timer mode.
    pub fn with_timer_mode(mut self, mode: TimerMode) -> Self {
        self.timer_mode = mode;
        self
    }

    /// Enables or disables the quick-move bonus.
    pub fn with_quick_bonus(mut self, enabled: bool) -> Self {
        self.quick_bonus = enabled;
        self
    }

    /// Configuration for `player`.
    pub fn player(&self, player: PlayerId) -> &PlayerConfig {
        match player {
            PlayerId::One => &self.player_one,
            PlayerId::Two => &self.player_two,
        }
    }

    /// True if `player` is driven by the computer policy.
    pub fn is_computer(&self, player: PlayerId) -> bool {
        self.vs_computer && player == PlayerId::Two
    }

    /// Setup-time checks, run by whoever assembles the configuration.
    ///
    /// Two human players must draw from different categories, and a timed
    /// game must last at least one second. The session itself assumes a
    /// validated configuration.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.vs_computer && self.player_one.category == self.player_two.category {
            warn!(category = %self.player_one.category, "Duplicate glyph category");
            return Err(ConfigError::new(format!(
                "Both players cannot choose the same glyph category ({})",
                self.player_one.category
            )));
        }
        if self.duration_seconds == Some(0) {
            warn!("Zero-length game");
            return Err(ConfigError::new("Game duration must be at least one second"));
        }
        for player in PlayerId::BOTH {
            if self.player(player).name.trim().is_empty() {
                return Err(ConfigError::new(format!("{} needs a name", player)));
            }
        }
        debug!("Configuration valid");
        Ok(())
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
