//! Terminal result of a round.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// A mark owns a full winning combination.
    Winner {
        /// The winning mark.
        mark: Mark,
        /// Board indices of the winning combination.
        combination: [usize; 3],
    },
    /// The board filled up without a winner.
    Tie,
}

impl RoundOutcome {
    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundOutcome::Winner { mark, .. } => Some(*mark),
            RoundOutcome::Tie => None,
        }
    }

    /// Returns the winning combination if there is one.
    pub fn combination(&self) -> Option<[usize; 3]> {
        match self {
            RoundOutcome::Winner { combination, .. } => Some(*combination),
            RoundOutcome::Tie => None,
        }
    }

    /// Returns true if the round was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, RoundOutcome::Tie)
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Winner { mark, .. } => write!(f, "{} wins!", mark),
            RoundOutcome::Tie => write!(f, "It's a tie!"),
        }
    }
}
