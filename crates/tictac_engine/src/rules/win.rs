//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark};
use serde::{Deserialize, Serialize};

/// The eight winning combinations in scan order: rows, columns, diagonals.
pub const WIN_COMBINATIONS: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Result of scanning the board for a winner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Winning mark, if any combination is fully owned.
    pub winner: Option<Mark>,
    /// The combination that produced `winner`.
    pub combination: Option<[usize; 3]>,
}

/// Scans every winning combination.
///
/// The scan does not stop at the first match: when more than one
/// combination is owned, the last one in [`WIN_COMBINATIONS`] order is
/// reported.
pub fn evaluate(board: &Board) -> Evaluation {
    WIN_COMBINATIONS
        .iter()
        .fold(Evaluation::default(), |found, &combination| {
            let [a, b, c] = combination;
            match (board.get(a), board.get(b), board.get(c)) {
                (Some(Cell::Occupied(m1)), Some(Cell::Occupied(m2)), Some(Cell::Occupied(m3)))
                    if m1 == m2 && m2 == m3 =>
                {
                    Evaluation {
                        winner: Some(m1),
                        combination: Some(combination),
                    }
                }
                _ => found,
            }
        })
}
