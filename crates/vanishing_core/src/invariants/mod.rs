//! Session invariants.
//!
//! Invariants are properties that hold in every reachable session state.
//! The session asserts them after each accepted move in debug builds, and
//! tests can check them independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(checks: &[(bool, &'static str)]) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = checks
        .iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(*description))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ])
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ])
    }
}

pub mod clock_mode;
pub mod ledger_matches_board;
pub mod piece_limit;

pub use clock_mode::ClockModeInvariant;
pub use ledger_matches_board::LedgerMatchesBoardInvariant;
pub use piece_limit::PieceLimitInvariant;

/// Every session invariant as a composable set.
pub type SessionInvariants = (
    LedgerMatchesBoardInvariant,
    PieceLimitInvariant,
    ClockModeInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameSession;
    use crate::test_support::{humans, session};
    use rand::rngs::StdRng;
    use std::time::Duration;

    #[test]
    fn test_invariant_set_holds_for_new_session() {
        let game = session(humans());
        assert!(SessionInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_evictions() {
        let mut game = session(humans());
        for (i, index) in [0, 1, 2, 3, 4, 5, 6, 7].into_iter().enumerate() {
            let now = Duration::from_secs(i as u64);
            // Moves that hit a live cell are rejected; the set must hold either way.
            let _ = game.submit_move(index, now);
            let _ = game.submit_move((index + 4) % 9, now);
            assert!(SessionInvariants::check_all(&game).is_ok());
        }
    }

    #[test]
    fn test_invariant_set_detects_stray_piece() {
        let mut game = session(humans());
        game.board_mut_for_tests()
            .place(crate::Position::Center, crate::Occupant::new("🐶", crate::PlayerId::One))
            .unwrap();

        let violations = SessionInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            <LedgerMatchesBoardInvariant as Invariant<GameSession<StdRng>>>::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = session(humans());
        type TwoInvariants = (LedgerMatchesBoardInvariant, PieceLimitInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
