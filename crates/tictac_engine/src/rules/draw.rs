//! Tie detection logic for tic-tac-toe.

use super::super::{Board, Cell};

/// Checks if every cell is occupied.
///
/// This does not look for a winner; a full board that also holds a
/// winning combination still reports `true`, so check for a winner first.
pub fn is_tie(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
