//! Ledger/board agreement: every ledger entry is a cell its owner holds.

use super::super::{GameSession, PlayerId};
use super::Invariant;

/// Invariant: each player's ledger lists exactly the cells they hold.
///
/// The count of a player's cells equals their ledger length, and every
/// ledger entry points at one of those cells.
pub struct LedgerMatchesBoardInvariant;

impl<R> Invariant<GameSession<R>> for LedgerMatchesBoardInvariant {
    fn holds(game: &GameSession<R>) -> bool {
        PlayerId::BOTH.into_iter().all(|player| {
            let ledger = game.ledger(player);
            ledger.len() == game.board().count_owned(player)
                && ledger
                    .positions()
                    .all(|pos| game.board().get(pos).owner() == Some(player))
        })
    }

    fn description() -> &'static str {
        "Each ledger matches the cells its player holds"
    }
}
