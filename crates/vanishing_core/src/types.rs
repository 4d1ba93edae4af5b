//! Core domain types: players, glyphs and the board.

use super::action::MoveError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
///
/// `Two` is the computer when the session is configured against it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
pub enum PlayerId {
    /// Player 1 (moves first).
    #[display("Player 1")]
    One,
    /// Player 2.
    #[display("Player 2")]
    Two,
}

impl PlayerId {
    /// Both players, in turn order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Returns the opponent.
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Zero-based slot for per-player arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// A symbol placed in a cell.
pub type Glyph = &'static str;

/// Who holds a cell and with which glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Occupant {
    /// Glyph drawn for this placement.
    pub glyph: Glyph,
    /// Owning player.
    pub owner: PlayerId,
}

impl Occupant {
    /// Creates an occupant.
    pub fn new(glyph: Glyph, owner: PlayerId) -> Self {
        Self { glyph, owner }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Square {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell held by a player.
    Occupied(Occupant),
}

impl Square {
    /// Owner of the cell, if any.
    pub fn owner(&self) -> Option<PlayerId> {
        match self {
            Square::Empty => None,
            Square::Occupied(occupant) => Some(occupant.owner),
        }
    }
}

/// 3x3 board.
///
/// Cells are only cleared by the session as part of a ledger eviction;
/// outside the crate the board is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Places an occupant on an empty cell.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, occupant: Occupant) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        self.squares[pos.to_index()] = Square::Occupied(occupant);
        Ok(())
    }

    /// Empties a cell. Paired with a ledger eviction by the session.
    pub(crate) fn clear(&mut self, pos: Position) {
        self.squares[pos.to_index()] = Square::Empty;
    }

    /// All squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of cells held by `player`.
    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.squares
            .iter()
            .filter(|s| s.owner() == Some(player))
            .count()
    }

    /// Formats the board as text. Empty cells show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => format!(" {} ", pos + 1),
                    Square::Occupied(occupant) => format!(" {} ", occupant.glyph),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n---+---+---\n");
            }
        }
        result
    }
}
