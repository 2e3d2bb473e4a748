//! Computer-versus-computer rounds without delays.

use crate::Scoreboard;
use rand::Rng;
use tictac_engine::{Board, Mark, Mode, RoundOutcome, Searcher, choose_move, rules};
use tracing::{debug, info, instrument};

/// Plays one round, X moving first, each mark using its own mode.
pub fn play_round<R: Rng>(
    x_mode: Mode,
    o_mode: Mode,
    searcher: &mut Searcher,
    rng: &mut R,
) -> RoundOutcome {
    let mut board = Board::new();
    let mut mark = Mark::X;
    loop {
        if let Some(outcome) = rules::outcome(&board) {
            debug!(%outcome, "Self-play round finished");
            return outcome;
        }
        let mode = match mark {
            Mark::X => x_mode,
            Mark::O => o_mode,
        };
        match choose_move(mode, &board, mark, searcher, rng) {
            Some(index) => {
                board.place(index, mark);
            }
            // Unreachable: a non-terminal board always has an empty cell.
            None => return RoundOutcome::Tie,
        }
        mark = mark.opponent();
    }
}

/// Plays `rounds` rounds and tallies the results.
#[instrument(skip(searcher, rng))]
pub fn run<R: Rng>(
    rounds: u32,
    x_mode: Mode,
    o_mode: Mode,
    searcher: &mut Searcher,
    rng: &mut R,
) -> Scoreboard {
    let mut scoreboard = Scoreboard::default();
    for _ in 0..rounds {
        scoreboard.record(&play_round(x_mode, o_mode, searcher, rng));
    }
    info!(%scoreboard, "Self-play complete");
    scoreboard
}
