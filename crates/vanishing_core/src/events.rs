//! Events the session emits for its host.

use super::action::Move;
use super::rules::WinLine;
use super::types::{Glyph, PlayerId};
use serde::Serialize;

/// Sound the host should play. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cue {
    /// A piece was placed.
    Move,
    /// The game was won on the board.
    Win,
}

/// Something that happened inside the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SessionEvent {
    /// A move was accepted and applied.
    MoveAccepted(Move),
    /// Quick-move bonus time was credited.
    BonusCredited {
        /// Player who earned it.
        player: PlayerId,
        /// Seconds added.
        seconds: u32,
    },
    /// A new turn began.
    TurnStarted {
        /// Player to move.
        player: PlayerId,
        /// Glyph shown as this player's next piece.
        glyph: Glyph,
    },
    /// A line was completed.
    GameWon(WinLine),
    /// A clock ran out.
    TimeExpired {
        /// Player whose time ran out.
        loser: PlayerId,
    },
    /// The session was reinitialised.
    SessionReset,
}

impl SessionEvent {
    /// Sound associated with this event, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            SessionEvent::MoveAccepted(_) => Some(Cue::Move),
            SessionEvent::GameWon(_) => Some(Cue::Win),
            _ => None,
        }
    }
}
