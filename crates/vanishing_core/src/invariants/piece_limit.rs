//! Piece limit: nobody holds more than three cells.

use super::super::{GameSession, MoveLedger, PlayerId};
use super::Invariant;

/// Invariant: each player holds at most [`MoveLedger::CAPACITY`] cells.
pub struct PieceLimitInvariant;

impl<R> Invariant<GameSession<R>> for PieceLimitInvariant {
    fn holds(game: &GameSession<R>) -> bool {
        PlayerId::BOTH.into_iter().all(|player| {
            game.board().count_owned(player) <= MoveLedger::CAPACITY
                && game.ledger(player).len() <= MoveLedger::CAPACITY
        })
    }

    fn description() -> &'static str {
        "No player holds more than three cells"
    }
}
