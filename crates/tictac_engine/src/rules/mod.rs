//! Terminal detection for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The coordinator decides when to call
//! them; the board itself never checks for round end.

pub mod draw;
pub mod win;

pub use draw::is_tie;
pub use win::{Evaluation, WIN_COMBINATIONS, evaluate};

use super::{Board, RoundOutcome};

/// Returns the round outcome if the board is terminal.
///
/// A winner takes precedence over a full board.
pub fn outcome(board: &Board) -> Option<RoundOutcome> {
    let evaluation = evaluate(board);
    match (evaluation.winner, evaluation.combination) {
        (Some(mark), Some(combination)) => Some(RoundOutcome::Winner { mark, combination }),
        _ if is_tie(board) => Some(RoundOutcome::Tie),
        _ => None,
    }
}
