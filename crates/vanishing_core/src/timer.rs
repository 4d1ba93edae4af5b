//! Game clock and quick-move bonus accounting.
//!
//! Timers hold only counters and timestamps. The session's
//! [`Scheduler`](crate::Scheduler) decides when [`Timers::tick`] runs.

use super::config::{GameConfig, TimerMode};
use super::types::PlayerId;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Interval between clock ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// Seconds a player has to earn the quick-move bonus.
pub const QUICK_MOVE_WINDOW_SECS: u32 = 10;

/// Seconds credited for a quick move.
pub const QUICK_MOVE_BONUS_SECS: u32 = 5;

/// Remaining game time, in whole seconds.
///
/// The variant is fixed when the session is configured and never changes
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GameClock {
    /// No time limit.
    Unbounded,
    /// One counter consumed by whoever is moving.
    Shared {
        /// Seconds left.
        remaining: u32,
    },
    /// One counter per player.
    PerPlayer {
        /// Player 1's seconds left.
        player_one: u32,
        /// Player 2's seconds left.
        player_two: u32,
    },
}

impl GameClock {
    /// Builds the starting clock for a configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        match (*config.duration_seconds(), *config.timer_mode()) {
            (None, _) => GameClock::Unbounded,
            (Some(seconds), TimerMode::Shared) => GameClock::Shared { remaining: seconds },
            (Some(seconds), TimerMode::PerPlayer) => GameClock::PerPlayer {
                player_one: seconds,
                player_two: seconds,
            },
        }
    }

    /// The counter consumed while `mover` is thinking.
    pub fn remaining_for(&self, mover: PlayerId) -> Option<u32> {
        match *self {
            GameClock::Unbounded => None,
            GameClock::Shared { remaining } => Some(remaining),
            GameClock::PerPlayer { player_one, player_two } => Some(match mover {
                PlayerId::One => player_one,
                PlayerId::Two => player_two,
            }),
        }
    }

    /// The shared counter, if in shared mode.
    pub fn shared(&self) -> Option<u32> {
        match *self {
            GameClock::Shared { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// A player's own counter, if in per-player mode.
    pub fn player(&self, player: PlayerId) -> Option<u32> {
        match *self {
            GameClock::PerPlayer { .. } => self.remaining_for(player),
            _ => None,
        }
    }

    /// True when the clock has a limit.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, GameClock::Unbounded)
    }

    fn counter_mut(&mut self, mover: PlayerId) -> Option<&mut u32> {
        match self {
            GameClock::Unbounded => None,
            GameClock::Shared { remaining } => Some(remaining),
            GameClock::PerPlayer { player_one, player_two } => Some(match mover {
                PlayerId::One => player_one,
                PlayerId::Two => player_two,
            }),
        }
    }
}

/// Result of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is stopped or unbounded; nothing changed.
    Idle,
    /// One second was consumed.
    Counted {
        /// Seconds left on the counter that ticked.
        remaining: u32,
    },
    /// The counter hit zero; the mover has lost on time.
    Expired {
        /// Player whose time ran out.
        loser: PlayerId,
    },
}

/// Per-turn countdown for the quick-move bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickMoveTimer {
    enabled: bool,
    #[serde(skip)]
    started_at: Option<Duration>,
    remaining: u32,
}

impl QuickMoveTimer {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started_at: None,
            remaining: QUICK_MOVE_WINDOW_SECS,
        }
    }

    /// Seconds left in the bonus window, as displayed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// When the current turn's window opened.
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Whole seconds elapsed since the turn started.
    fn elapsed_secs(&self, now: Duration) -> Option<u64> {
        self.started_at
            .map(|start| now.saturating_sub(start).as_secs())
    }
}

/// Clock plus quick-move window for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timers {
    clock: GameClock,
    running: bool,
    quick: QuickMoveTimer,
}

impl Timers {
    /// Builds timers for a configuration. A bounded clock starts running.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> Self {
        let clock = GameClock::from_config(config);
        Self {
            clock,
            running: clock.is_bounded(),
            quick: QuickMoveTimer::new(*config.quick_bonus()),
        }
    }

    /// The game clock.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// The quick-move window.
    pub fn quick(&self) -> &QuickMoveTimer {
        &self.quick
    }

    /// True while the clock counts down.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when turn starts should open a bonus window.
    pub fn quick_window_active(&self) -> bool {
        self.quick.enabled && self.running
    }

    /// Consumes one second from the mover's counter.
    #[instrument(skip(self))]
    pub fn tick(&mut self, mover: PlayerId) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        let Some(counter) = self.clock.counter_mut(mover) else {
            return TickOutcome::Idle;
        };
        if *counter <= 1 {
            *counter = 0;
            self.stop();
            info!(%mover, "Time expired");
            TickOutcome::Expired { loser: mover }
        } else {
            *counter -= 1;
            TickOutcome::Counted { remaining: *counter }
        }
    }

    /// Opens the quick-move window for a new turn.
    pub fn start_turn(&mut self, now: Duration) {
        if self.quick_window_active() {
            self.quick.started_at = Some(now);
            self.quick.remaining = QUICK_MOVE_WINDOW_SECS;
        } else {
            self.quick.started_at = None;
        }
    }

    /// Refreshes the displayed window countdown; returns seconds left.
    pub fn refresh_turn(&mut self, now: Duration) -> u32 {
        if let Some(elapsed) = self.quick.elapsed_secs(now) {
            let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
            self.quick.remaining = QUICK_MOVE_WINDOW_SECS.saturating_sub(elapsed);
        }
        self.quick.remaining
    }

    /// Whether a move accepted at `now` earns the bonus.
    ///
    /// Measured from the turn's start time, not from the displayed
    /// countdown, so a throttled display cannot cost a player the bonus.
    pub fn quick_bonus_earned(&self, now: Duration) -> bool {
        if !self.quick_window_active() {
            return false;
        }
        self.quick
            .elapsed_secs(now)
            .is_some_and(|elapsed| elapsed <= u64::from(QUICK_MOVE_WINDOW_SECS))
    }

    /// Credits the bonus to the shared clock or to `mover`'s own clock.
    ///
    /// Returns the seconds credited (zero for an unbounded clock).
    #[instrument(skip(self))]
    pub fn credit_bonus(&mut self, mover: PlayerId) -> u32 {
        match self.clock.counter_mut(mover) {
            Some(counter) => {
                *counter = counter.saturating_add(QUICK_MOVE_BONUS_SECS);
                debug!(%mover, remaining = *counter, "Quick-move bonus credited");
                QUICK_MOVE_BONUS_SECS
            }
            None => 0,
        }
    }

    /// Stops the clock and closes the bonus window for good.
    pub fn stop(&mut self) {
        self.running = false;
        self.quick.started_at = None;
    }
}
