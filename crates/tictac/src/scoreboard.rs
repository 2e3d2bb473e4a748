//! Win tally across rounds.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tictac_engine::{Mark, RoundOutcome};

/// Wins per mark, plus ties.
///
/// Tallies follow the mark, not the role: after a swap the human's next win
/// counts for whichever mark they then hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Rounds won by X.
    x_wins: u32,
    /// Rounds won by O.
    o_wins: u32,
    /// Rounds that ended full with no winner.
    ties: u32,
}

impl Scoreboard {
    /// Records a finished round.
    pub fn record(&mut self, outcome: &RoundOutcome) {
        match outcome.winner() {
            Some(Mark::X) => self.x_wins += 1,
            Some(Mark::O) => self.o_wins += 1,
            None => self.ties += 1,
        }
    }

    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Total rounds recorded.
    pub fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.ties
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} - O {} (ties {})", self.x_wins, self.o_wins, self.ties)
    }
}
