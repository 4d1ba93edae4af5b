//! Clock mode: the clock variant always matches the configuration.

use super::super::{GameClock, GameSession, TimerMode};
use super::Invariant;

/// Invariant: exactly one of {shared, per-player} is active, as configured.
pub struct ClockModeInvariant;

impl<R> Invariant<GameSession<R>> for ClockModeInvariant {
    fn holds(game: &GameSession<R>) -> bool {
        let config = game.config();
        match (*game.timers().clock(), *config.duration_seconds(), *config.timer_mode()) {
            (GameClock::Unbounded, None, _) => true,
            (GameClock::Shared { .. }, Some(_), TimerMode::Shared) => true,
            (GameClock::PerPlayer { .. }, Some(_), TimerMode::PerPlayer) => true,
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Clock mode matches the configured timer mode"
    }
}
