//! Board fullness.
//!
//! There is no draw outcome. A full board has no legal move, so the computer
//! policy checks it before looking for candidates; a board without a line
//! stays in play either way.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if every cell is occupied.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}
