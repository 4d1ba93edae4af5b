//! Vanishing tic-tac-toe rules engine.
//!
//! Two players take turns placing glyphs on a 3×3 board, but each player can
//! only keep three pieces: placing a fourth removes that player's oldest one.
//! Three in a row wins. Games can run against a shared or per-player clock,
//! with bonus time for quick moves, and player 2 can be the computer.
//!
//! # Architecture
//!
//! - **Board**: [`Board`], [`Position`] and the pure [rules](evaluate_win)
//! - **Ledger**: [`MoveLedger`], the per-player rolling window of live pieces
//! - **Timers**: [`GameClock`] and [`Timers`], driven by the [`Scheduler`]
//! - **Session**: [`GameSession`], the turn controller hosts talk to
//! - **Contracts**: [`MoveContract`] preconditions and [`SessionInvariants`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use rand::SeedableRng;
//! use vanishing_core::{GameConfig, GameSession, GlyphCategory, PlayerConfig, PlayerId};
//!
//! let config = GameConfig::new(
//!     PlayerConfig::new("Ada".to_string(), GlyphCategory::Animals),
//!     PlayerConfig::new("Grace".to_string(), GlyphCategory::Food),
//! );
//! let rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut game = GameSession::new(config, rng, Duration::ZERO);
//!
//! game.submit_move(4, Duration::from_secs(2)).unwrap();
//! assert_eq!(game.mover(), PlayerId::Two);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod contracts;
mod events;
mod invariants;
mod ledger;
mod phases;
mod policy;
mod position;
mod rules;
mod scheduler;
mod session;
mod timer;
mod types;

// Crate-level exports - Board and positions
pub use position::Position;
pub use types::{Board, Glyph, Occupant, PlayerId, Square};

// Crate-level exports - Rules
pub use rules::{evaluate_win, is_full, WinLine, LINES};

// Crate-level exports - Moves and ledgers
pub use action::{Move, MoveError, MoveOrigin, MoveRequest};
pub use ledger::{Ledgers, MoveLedger};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, GlyphCategory, PlayerConfig, TimerMode, COMPUTER_NAME};

// Crate-level exports - Timers and scheduling
pub use scheduler::{Scheduler, Task, TaskId};
pub use timer::{
    GameClock, QuickMoveTimer, TickOutcome, Timers, QUICK_MOVE_BONUS_SECS, QUICK_MOVE_WINDOW_SECS,
    TICK,
};

// Crate-level exports - Computer opponent
pub use policy::{choose_move, pick, RandomSource};

// Crate-level exports - Session
pub use events::{Cue, SessionEvent};
pub use phases::{Outcome, Status, Termination};
pub use session::{
    GameSession, MoveReport, SessionSnapshot, BONUS_FLAG_TTL, COMPUTER_MOVE_DELAY,
};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    CellIsEmpty, Contract, GameInPlay, HostMayMove, LegalMove, MoveContract, NotVacatingCell,
};
pub use invariants::{
    ClockModeInvariant, Invariant, InvariantSet, InvariantViolation, LedgerMatchesBoardInvariant,
    PieceLimitInvariant, SessionInvariants,
};
