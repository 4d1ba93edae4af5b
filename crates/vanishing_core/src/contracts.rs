//! Move preconditions and postconditions.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}. Preconditions
//! decide whether a move is accepted at all; the postcondition re-checks the
//! session invariants after it has been applied.

use super::action::{MoveError, MoveOrigin, MoveRequest};
use super::invariants::{InvariantSet, InvariantViolation, SessionInvariants};
use super::session::GameSession;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions on the state the action produced.
    fn post(after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session has not reached a terminal state.
pub struct GameInPlay;

impl GameInPlay {
    /// Rejects moves once the game is won or lost on time.
    pub fn check<R>(game: &GameSession<R>) -> Result<(), MoveError> {
        if game.status().is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: host input is only accepted on a human's turn.
pub struct HostMayMove;

impl HostMayMove {
    /// Rejects host moves while the computer is to move.
    pub fn check<R>(request: &MoveRequest, game: &GameSession<R>) -> Result<(), MoveError> {
        if request.origin == MoveOrigin::Host && game.config().is_computer(game.mover()) {
            Err(MoveError::AwaitingComputer)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects moves onto an occupied cell.
    pub fn check<R>(request: &MoveRequest, game: &GameSession<R>) -> Result<(), MoveError> {
        if game.board().is_empty(request.position) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(request.position))
        }
    }
}

/// Precondition: the target is not the cell the mover is about to vacate.
pub struct NotVacatingCell;

impl NotVacatingCell {
    /// Rejects an immediate return to the mover's oldest cell.
    pub fn check<R>(request: &MoveRequest, game: &GameSession<R>) -> Result<(), MoveError> {
        match game.ledger(game.mover()).pending_eviction() {
            Some(oldest) if oldest == request.position => {
                Err(MoveError::VacatingCell(request.position))
            }
            _ => Ok(()),
        }
    }
}

/// Composite precondition for any move, in rejection priority order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check<R>(request: &MoveRequest, game: &GameSession<R>) -> Result<(), MoveError> {
        GameInPlay::check(game)?;
        HostMayMove::check(request, game)?;
        CellIsEmpty::check(request, game)?;
        NotVacatingCell::check(request, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: [`LegalMove`].
/// Postconditions: every invariant in [`SessionInvariants`].
pub struct MoveContract;

impl<R> Contract<GameSession<R>, MoveRequest> for MoveContract {
    fn pre(game: &GameSession<R>, request: &MoveRequest) -> Result<(), MoveError> {
        LegalMove::check(request, game)
    }

    fn post(after: &GameSession<R>) -> Result<(), Vec<InvariantViolation>> {
        SessionInvariants::check_all(after).inspect_err(|violations| {
            for violation in violations {
                warn!(%violation, "Postcondition failed");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{humans, session};
    use crate::{Position, PlayerId};
    use std::time::Duration;

    #[test]
    fn test_precondition_empty_cell() {
        let game = session(humans());
        let request = MoveRequest::from_host(Position::Center);
        assert!(MoveContract::pre(&game, &request).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let mut game = session(humans());
        game.submit_move(4, Duration::ZERO).unwrap();
        let request = MoveRequest::from_host(Position::Center);
        assert_eq!(
            MoveContract::pre(&game, &request),
            Err(MoveError::CellOccupied(Position::Center))
        );
    }

    #[test]
    fn test_host_blocked_on_computer_turn() {
        let mut game = session(humans().against_computer());
        game.submit_move(4, Duration::ZERO).unwrap();
        assert_eq!(game.mover(), PlayerId::Two);

        let host = MoveRequest::from_host(Position::TopLeft);
        assert_eq!(MoveContract::pre(&game, &host), Err(MoveError::AwaitingComputer));
        let computer = MoveRequest::from_computer(Position::TopLeft);
        assert!(MoveContract::pre(&game, &computer).is_ok());
    }

    #[test]
    fn test_vacating_cell_check_on_empty_oldest() {
        let mut game = session(humans());
        // Player 1 holds 0, 1, 5 and player 2 holds 3, 6, 7; no line is complete.
        for index in [0, 3, 1, 6, 5, 7] {
            game.submit_move(index, Duration::ZERO).unwrap();
        }
        assert_eq!(game.ledger(PlayerId::One).pending_eviction(), Some(Position::TopLeft));
        // Simulate the oldest cell being empty; only the ledger rule remains.
        game.board_mut_for_tests().clear(Position::TopLeft);
        let request = MoveRequest::from_host(Position::TopLeft);
        assert_eq!(
            NotVacatingCell::check(&request, &game),
            Err(MoveError::VacatingCell(Position::TopLeft))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let mut game = session(humans());
        game.submit_move(4, Duration::ZERO).unwrap();
        assert!(<MoveContract as Contract<_, MoveRequest>>::post(&game).is_ok());
    }
}
