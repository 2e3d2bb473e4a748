//! Computer move selection.

use super::{BOARD_CELLS, Board, Mark, Searcher};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How the computer picks its moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// Uniformly random empty cell.
    #[default]
    Casual,
    /// Minimax-optimal move.
    Unbeatable,
}

impl Mode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Casual => Mode::Unbeatable,
            Mode::Unbeatable => Mode::Casual,
        }
    }
}

/// Picks a uniformly random empty cell by rejection sampling.
///
/// Draws an index in `0..9` and redraws while the cell is occupied. Returns
/// `None` without drawing when the board is full.
pub fn random_empty_cell<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    if board.empty_cell_count() == 0 {
        return None;
    }
    loop {
        let index = rng.random_range(0..BOARD_CELLS);
        if board.is_empty(index) {
            return Some(index);
        }
    }
}

/// Chooses the computer's move for `mark` under `mode`.
#[instrument(skip(board, searcher, rng))]
pub fn choose_move<R: Rng>(
    mode: Mode,
    board: &Board,
    mark: Mark,
    searcher: &mut Searcher,
    rng: &mut R,
) -> Option<usize> {
    let index = match mode {
        Mode::Casual => random_empty_cell(board, rng),
        Mode::Unbeatable => searcher.search(board, mark).best_move,
    };
    debug!(?index, "Computer move chosen");
    index
}
