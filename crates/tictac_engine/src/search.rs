//! Exhaustive minimax search.
//!
//! Scores are taken from the point of view of the search mark: a win for
//! it is worth `10 - depth`, a loss `depth - 10`, a tie `0`. Faster wins and
//! slower losses are preferred.
//!
//! Trial placements are made on a scratch copy of the caller's board and
//! undone before the next sibling is tried, so the board passed in is never
//! touched and concurrent searches are independent.
//!
//! # Example
//!
//! ```
//! use tictac_engine::{Board, Mark, Searcher};
//!
//! let board: Board = "XX.OO....".parse().unwrap();
//! let result = Searcher::new(true).search(&board, Mark::X);
//! assert_eq!(result.best_move, Some(2));
//! assert_eq!(result.score, 10);
//! ```

use super::rules::{evaluate, is_tie};
use super::{BOARD_CELLS, Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of an immediate win.
pub const WIN_SCORE: i32 = 10;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best move found, `None` if the board has no empty cell.
    pub best_move: Option<usize>,
    /// Minimax value of `best_move` for the search mark.
    pub score: i32,
    /// Nodes visited, including terminal leaves.
    pub nodes: u64,
}

/// Minimax search engine with optional alpha-beta pruning.
///
/// Pruning only skips branches that cannot change the chosen move, so both
/// settings pick the same cell.
#[derive(Debug, Clone)]
pub struct Searcher {
    pruning: bool,
    nodes: u64,
}

impl Searcher {
    /// Creates a searcher.
    pub fn new(pruning: bool) -> Self {
        Self { pruning, nodes: 0 }
    }

    /// Returns whether alpha-beta pruning is enabled.
    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// Finds the best move for `mark`.
    ///
    /// Empty cells are tried in ascending order and a later cell replaces the
    /// current best only with a strictly greater score, so ties go to the
    /// lowest index.
    #[instrument(skip(self, board), fields(pruning = self.pruning))]
    pub fn search(&mut self, board: &Board, mark: Mark) -> SearchResult {
        self.nodes = 0;
        let mut scratch = *board;
        let mut best_move = None;
        let mut best_score = i32::MIN;

        for index in 0..BOARD_CELLS {
            if !scratch.is_empty(index) {
                continue;
            }
            // With pruning the child only needs to prove it beats the current best.
            let alpha = if self.pruning { best_score } else { i32::MIN };
            let score = scratch.with_trial(index, mark, |b| {
                self.minimax(b, 0, false, mark, alpha, i32::MAX)
            });
            if score > best_score {
                best_score = score;
                best_move = Some(index);
            }
        }

        let result = SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            nodes: self.nodes,
        };
        debug!(
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            "Search complete"
        );
        result
    }

    /// Scores every cell for `mark`; occupied cells are `None`.
    ///
    /// Each root move is searched with a full window so the scores are exact.
    #[instrument(skip(self, board))]
    pub fn score_moves(&mut self, board: &Board, mark: Mark) -> [Option<i32>; BOARD_CELLS] {
        self.nodes = 0;
        let mut scratch = *board;
        let mut scores = [None; BOARD_CELLS];
        for (index, slot) in scores.iter_mut().enumerate() {
            if scratch.is_empty(index) {
                *slot = Some(scratch.with_trial(index, mark, |b| {
                    self.minimax(b, 0, false, mark, i32::MIN, i32::MAX)
                }));
            }
        }
        scores
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mark: Mark,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        match evaluate(board).winner {
            Some(winner) if winner == mark => return WIN_SCORE - depth,
            Some(_) => return depth - WIN_SCORE,
            None if is_tie(board) => return 0,
            None => {}
        }

        let placing = if maximizing { mark } else { mark.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in 0..BOARD_CELLS {
            if !board.is_empty(index) {
                continue;
            }
            let score = board.with_trial(index, placing, |b| {
                self.minimax(b, depth + 1, !maximizing, mark, alpha, beta)
            });

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.pruning && alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Finds the best move for `search_mark`, or `None` on a full board.
pub fn best_move(board: &Board, search_mark: Mark) -> Option<usize> {
    Searcher::default().search(board, search_mark).best_move
}

/// Plain minimax value of `board` for `search_mark`.
///
/// `maximizing` says whose turn it is: `true` when `search_mark` moves next.
pub fn minimax(board: &Board, depth: i32, maximizing: bool, search_mark: Mark) -> i32 {
    let mut scratch = *board;
    Searcher::new(false).minimax(&mut scratch, depth, maximizing, search_mark, i32::MIN, i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::outcome;

    #[test]
    fn test_completes_top_row() {
        let board: Board = "XX.......".parse().unwrap();
        assert_eq!(best_move(&board, Mark::X), Some(2));
    }

    #[test]
    fn test_blocks_opponent() {
        // O must block X on the top row.
        let board: Board = "XX..O....".parse().unwrap();
        assert_eq!(best_move(&board, Mark::O), Some(2));
    }

    #[test]
    fn test_prefers_win_over_block() {
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(best_move(&board, Mark::O), Some(5));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        let result = Searcher::default().search(&board, Mark::X);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board: Board = "X...O....".parse().unwrap();
        let before = board;
        let _ = Searcher::new(false).search(&board, Mark::X);
        assert_eq!(board, before);
    }

    #[test]
    fn test_minimax_terminal_scores() {
        let won: Board = "XXXOO....".parse().unwrap();
        assert_eq!(minimax(&won, 3, true, Mark::X), 7);
        assert_eq!(minimax(&won, 3, true, Mark::O), -7);
        let tie: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(minimax(&tie, 5, false, Mark::X), 0);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(minimax(&Board::new(), 0, true, Mark::X), 0);
    }

    #[test]
    fn test_score_moves_marks_winning_cell() {
        let board: Board = "XX.OO....".parse().unwrap();
        let scores = Searcher::default().score_moves(&board, Mark::X);
        assert_eq!(scores[0], None);
        assert_eq!(scores[2], Some(WIN_SCORE));
        assert!(scores[8].is_some_and(|s| s < 0));
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let board = Board::new();
        let plain = Searcher::new(false).search(&board, Mark::X);
        let pruned = Searcher::new(true).search(&board, Mark::X);
        assert_eq!(plain.best_move, pruned.best_move);
        assert_eq!(plain.score, pruned.score);
        assert!(pruned.nodes < plain.nodes);
    }

    #[test]
    fn test_self_play_ties() {
        let mut board = Board::new();
        let mut mark = Mark::X;
        while outcome(&board).is_none() {
            let index = best_move(&board, mark).expect("board has empty cells");
            assert!(board.place(index, mark));
            mark = mark.opponent();
        }
        assert_eq!(outcome(&board), Some(crate::RoundOutcome::Tie));
    }
}
