//! Session phases and outcomes.

use super::rules::WinLine;
use super::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(PlayerId),
    /// Neither player won.
    ///
    /// Part of the outcome model, but no transition produces it: a board
    /// without a line keeps the game in play, and running out of time is a
    /// loss for the mover.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Tie => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins", player),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Termination {
    /// A line was completed.
    Won(WinLine),
    /// The mover's clock reached zero.
    TimeExpired {
        /// Player whose time ran out.
        loser: PlayerId,
    },
}

impl Termination {
    /// Outcome for scoring and display.
    pub fn outcome(&self) -> Outcome {
        match self {
            Termination::Won(line) => Outcome::Winner(line.owner),
            Termination::TimeExpired { loser } => Outcome::Winner(loser.other()),
        }
    }

    /// The completed line, for a board win.
    pub fn winning_line(&self) -> Option<&WinLine> {
        match self {
            Termination::Won(line) => Some(line),
            Termination::TimeExpired { .. } => None,
        }
    }
}

/// Where the turn controller stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    /// Waiting for the given player's move.
    AwaitingMove(PlayerId),
    /// The game is over; nothing but a reset changes the session.
    Terminal(Termination),
}

impl Status {
    /// True once the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Terminal(_))
    }

    /// How the game ended, if it has.
    pub fn termination(&self) -> Option<&Termination> {
        match self {
            Status::Terminal(termination) => Some(termination),
            Status::AwaitingMove(_) => None,
        }
    }

    /// Outcome once terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        self.termination().map(Termination::outcome)
    }
}
