//! Tic-tac-toe engine for a human playing against the computer.
//!
//! # Architecture
//!
//! - **Board**: the 9-cell grid and its one-mark-per-cell rule
//! - **Rules**: winner and tie detection
//! - **Search**: exhaustive minimax, optionally alpha-beta pruned
//! - **Policy**: casual (random) or unbeatable (search) computer moves
//! - **Coordinator**: turn order, mark bindings and round lifecycle
//!
//! # Example
//!
//! ```
//! use tictac_engine::{Coordinator, Mode, RoundPhase};
//!
//! let mut game = Coordinator::seeded(Mode::Unbeatable, 1);
//! let reply = game.submit_human_move(4).expect("computer answers");
//! assert!(game.commit_computer_move(reply));
//! assert_eq!(game.phase(), RoundPhase::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coordinator;
mod outcome;
mod policy;
mod position;
pub mod rules;
mod search;
mod types;

pub use coordinator::{Coordinator, NoopObserver, PendingMove, RoundObserver};
pub use outcome::RoundOutcome;
pub use policy::{Mode, choose_move, random_empty_cell};
pub use position::Position;
pub use rules::{Evaluation, WIN_COMBINATIONS, evaluate, is_tie};
pub use search::{SearchResult, Searcher, WIN_SCORE, best_move, minimax};
pub use types::{BOARD_CELLS, Board, BoardParseError, Cell, Mark, Role, RoundPhase};
