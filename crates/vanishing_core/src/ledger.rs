//! Per-player record of live pieces, oldest first.

use super::action::MoveError;
use super::types::PlayerId;
use super::Position;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Ordered positions of a player's pieces still on the board.
///
/// Holds at most [`MoveLedger::CAPACITY`] entries. The head is always the
/// next piece to be evicted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MoveLedger {
    entries: VecDeque<Position>,
}

impl MoveLedger {
    /// Maximum number of live pieces per player.
    pub const CAPACITY: usize = 3;

    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live pieces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no pieces are live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the next placement evicts the oldest piece.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= Self::CAPACITY
    }

    /// The next piece to be evicted.
    pub fn oldest(&self) -> Option<Position> {
        self.entries.front().copied()
    }

    /// Live positions, oldest first.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().copied()
    }

    /// True if `position` holds one of this ledger's pieces.
    pub fn contains(&self, position: Position) -> bool {
        self.entries.contains(&position)
    }

    /// The cell the next placement would vacate, if the ledger is full.
    pub fn pending_eviction(&self) -> Option<Position> {
        if self.is_full() { self.oldest() } else { None }
    }

    /// Records a placement, returning the evicted position if any.
    ///
    /// When full, a placement on the oldest cell is rejected without any
    /// change: a player may not immediately reoccupy the cell being vacated.
    #[instrument(skip(self), fields(len = self.entries.len()))]
    pub fn record(&mut self, position: Position) -> Result<Option<Position>, MoveError> {
        let evicted = match self.pending_eviction() {
            Some(oldest) if oldest == position => {
                debug!(?position, "Rejected placement on vacating cell");
                return Err(MoveError::VacatingCell(position));
            }
            Some(_) => self.entries.pop_front(),
            None => None,
        };
        self.entries.push_back(position);
        Ok(evicted)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The two players' ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Ledgers {
    player_one: MoveLedger,
    player_two: MoveLedger,
}

impl Ledgers {
    /// Ledger for `player`.
    pub fn get(&self, player: PlayerId) -> &MoveLedger {
        match player {
            PlayerId::One => &self.player_one,
            PlayerId::Two => &self.player_two,
        }
    }

    pub(crate) fn get_mut(&mut self, player: PlayerId) -> &mut MoveLedger {
        match player {
            PlayerId::One => &mut self.player_one,
            PlayerId::Two => &mut self.player_two,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.player_one.clear();
        self.player_two.clear();
    }
}
