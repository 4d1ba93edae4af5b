//! Computer opponent and the random source behind it.

use super::ledger::MoveLedger;
use super::rules::is_full;
use super::{Board, Position};
use tracing::{debug, instrument};

/// Source of uniform choices.
///
/// Glyph draws and computer moves go through this trait so tests can use a
/// seeded or scripted generator.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Picks one element uniformly, `None` for an empty slice.
pub fn pick<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.pick_index(items.len()))
    }
}

/// Chooses a legal move for the computer, uniformly at random.
///
/// Candidates are the empty cells, minus the cell the computer's oldest
/// piece is about to vacate when its ledger is full. Returns `None` for a
/// full board or when no candidate remains.
#[instrument(skip(board, ledger, rng))]
pub fn choose_move<R: RandomSource + ?Sized>(
    board: &Board,
    ledger: &MoveLedger,
    rng: &mut R,
) -> Option<Position> {
    if is_full(board) {
        debug!("Board is full");
        return None;
    }
    let vacating = ledger.pending_eviction();
    let candidates: Vec<Position> = Position::valid_moves(board)
        .into_iter()
        .filter(|pos| Some(*pos) != vacating)
        .collect();

    let choice = pick(rng, &candidates).copied();
    debug!(candidates = candidates.len(), ?choice, "Computer move chosen");
    choice
}
