//! Win detection.

use super::super::{Board, PlayerId, Position, Square};
use serde::Serialize;
use tracing::instrument;

/// The 8 winning triples, scanned in this order: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WinLine {
    /// Player holding all three cells.
    pub owner: PlayerId,
    /// The three cells, in scan order.
    pub cells: [Position; 3],
}

impl WinLine {
    /// True if `pos` is part of the line.
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// Returns the first line whose three cells share an owner.
///
/// Glyphs are ignored; only ownership counts. When a move completes two
/// lines at once, the first in [`LINES`] order is reported.
#[instrument(skip(board))]
pub fn evaluate_win(board: &Board) -> Option<WinLine> {
    LINES.into_iter().find_map(|cells| {
        let [a, b, c] = cells;
        match board.get(a) {
            Square::Occupied(first) => {
                let owner = first.owner;
                (board.get(b).owner() == Some(owner) && board.get(c).owner() == Some(owner))
                    .then_some(WinLine { owner, cells })
            }
            Square::Empty => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Occupant;

    fn board_with(cells: &[(Position, &'static str, PlayerId)]) -> Board {
        let mut board = Board::new();
        for (pos, glyph, owner) in cells {
            board.place(*pos, Occupant::new(*glyph, *owner)).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(evaluate_win(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row_with_mixed_glyphs() {
        let board = board_with(&[
            (Position::TopLeft, "🐶", PlayerId::One),
            (Position::TopCenter, "🐱", PlayerId::One),
            (Position::TopRight, "🦊", PlayerId::One),
        ]);
        let line = evaluate_win(&board).unwrap();
        assert_eq!(line.owner, PlayerId::One);
        assert_eq!(
            line.cells,
            [Position::TopLeft, Position::TopCenter, Position::TopRight]
        );
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[
            (Position::TopRight, "🍕", PlayerId::Two),
            (Position::Center, "🍕", PlayerId::Two),
            (Position::BottomLeft, "🍩", PlayerId::Two),
        ]);
        let line = evaluate_win(&board).unwrap();
        assert_eq!(line.owner, PlayerId::Two);
        assert!(line.contains(Position::Center));
    }

    #[test]
    fn test_mixed_owners_do_not_win() {
        let board = board_with(&[
            (Position::TopLeft, "🐶", PlayerId::One),
            (Position::TopCenter, "🍕", PlayerId::Two),
            (Position::TopRight, "🐶", PlayerId::One),
        ]);
        assert_eq!(evaluate_win(&board), None);
    }

    #[test]
    fn test_double_line_reports_first_in_scan_order() {
        // Top row and left column share the corner; the row is scanned first.
        let board = board_with(&[
            (Position::TopLeft, "🐶", PlayerId::One),
            (Position::TopCenter, "🐶", PlayerId::One),
            (Position::TopRight, "🐶", PlayerId::One),
            (Position::MiddleLeft, "🐶", PlayerId::One),
            (Position::BottomLeft, "🐶", PlayerId::One),
        ]);
        let line = evaluate_win(&board).unwrap();
        assert_eq!(line.cells, LINES[0]);
    }
}
