//! Board placement and terminal detection.

use tictac_engine::{
    BOARD_CELLS, Board, Cell, Mark, RoundOutcome, WIN_COMBINATIONS, evaluate, is_tie, rules,
};

#[test]
fn test_place_is_idempotent_on_filled_cell() {
    let mut once = Board::new();
    once.place(3, Mark::X);

    let mut many = Board::new();
    for _ in 0..5 {
        many.place(3, Mark::X);
        many.place(3, Mark::O);
    }
    assert_eq!(once, many);
}

#[test]
fn test_reset_then_single_place() {
    let mut board: Board = "XOXOXO...".parse().unwrap();
    board.reset();
    assert!(board.place(4, Mark::O));
    assert_eq!(board.get(4), Some(Cell::Occupied(Mark::O)));
    assert_eq!(board.empty_cell_count(), 8);
}

/// Builds the board for `code` read as nine base-3 digits (0 empty, 1 X, 2 O).
fn board_from_code(mut code: u32) -> Board {
    let mut board = Board::new();
    for index in 0..BOARD_CELLS {
        match code % 3 {
            1 => {
                board.place(index, Mark::X);
            }
            2 => {
                board.place(index, Mark::O);
            }
            _ => {}
        }
        code /= 3;
    }
    board
}

#[test]
fn test_full_board_without_line_is_tie() {
    for text in ["XOXXOOOXX", "XOXOOXXXO", "OXOXXOXOX"] {
        let board: Board = text.parse().unwrap();
        assert!(is_tie(&board), "{}", text);
        assert_eq!(evaluate(&board).winner, None, "{}", text);
    }
}

#[test]
fn test_every_cell_assignment_classified() {
    let mut ties = 0;
    for code in 0..3u32.pow(BOARD_CELLS as u32) {
        let board = board_from_code(code);
        let full = board.empty_cell_count() == 0;
        let winner = evaluate(&board).winner;

        assert_eq!(is_tie(&board), full, "{}", board);
        if full && winner.is_none() {
            ties += 1;
            assert_eq!(rules::outcome(&board), Some(RoundOutcome::Tie), "{}", board);
        }
        if !full && winner.is_none() {
            assert_eq!(rules::outcome(&board), None, "{}", board);
        }
    }
    assert_eq!(ties, 32);
}

#[test]
fn test_single_line_reports_exact_combination() {
    for combination in WIN_COMBINATIONS {
        let mut board = Board::new();
        for index in combination {
            board.place(index, Mark::O);
        }
        // Scatter X marks that do not form a line.
        let mut placed = 0;
        for index in board.empty_indices().collect::<Vec<_>>() {
            if placed == 2 {
                break;
            }
            board.place(index, Mark::X);
            placed += 1;
        }
        let evaluation = evaluate(&board);
        assert_eq!(evaluation.winner, Some(Mark::O));
        assert_eq!(evaluation.combination, Some(combination));
    }
}
