//! Move records and move rejection reasons.
//!
//! A rejected move never changes the session, so every [`MoveError`] is
//! safe to ignore. Hosts typically log it and wait for the next input.

use super::types::{Glyph, PlayerId};
use super::Position;
use serde::Serialize;

/// A placement accepted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    /// The player who moved.
    pub player: PlayerId,
    /// Where the glyph landed.
    pub position: Position,
    /// Glyph drawn for the placement.
    pub glyph: Glyph,
    /// The player's oldest piece, removed to make room for this one.
    pub evicted: Option<Position>,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.player, self.position.label(), self.glyph)?;
        if let Some(evicted) = self.evicted {
            write!(f, ", removed {}", evicted.label())?;
        }
        Ok(())
    }
}

/// Where a move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveOrigin {
    /// Input from the host (a cell selected by a person).
    Host,
    /// A move synthesised by the computer policy.
    Computer,
}

/// A move about to be validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    /// Target cell.
    pub position: Position,
    /// Who asked for it.
    pub origin: MoveOrigin,
}

impl MoveRequest {
    /// A move selected through the host.
    pub fn from_host(position: Position) -> Self {
        Self {
            position,
            origin: MoveOrigin::Host,
        }
    }

    /// A move chosen by the computer policy.
    pub fn from_computer(position: Position) -> Self {
        Self {
            position,
            origin: MoveOrigin::Computer,
        }
    }
}

/// Why a submitted move was ignored.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game has already been won or lost on time.
    #[display("Game is already over")]
    GameOver,

    /// The cell index is not on the board.
    #[display("Cell {} is off the board (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// It is the computer's turn; external input is not accepted.
    #[display("Waiting for the computer to move")]
    AwaitingComputer,

    /// The cell already holds a glyph.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The cell is the one about to be vacated by the mover's oldest piece.
    #[display("Cannot move back into {}, the cell being vacated", _0)]
    VacatingCell(#[error(not(source))] Position),
}
