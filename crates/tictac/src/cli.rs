//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use tictac_engine::{Board, Mark, Mode};

/// Tic-tac-toe against a casual or unbeatable computer
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe against a casual or unbeatable computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Path to the game config
        #[arg(short, long, default_value = "tictac.toml")]
        config: std::path::PathBuf,

        /// Computer mode (casual or unbeatable), overrides the config
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Let the computer open the first round
        #[arg(long)]
        computer_first: bool,
    },

    /// Print the best move for a mark
    BestMove {
        /// Board as nine cells, e.g. "XX.O....."
        #[arg(short, long)]
        board: Board,

        /// Mark to search for
        #[arg(long, default_value = "X")]
        mark: Mark,

        /// Search without alpha-beta pruning
        #[arg(long)]
        no_pruning: bool,
    },

    /// Print the minimax score of every empty cell
    Analyze {
        /// Board as nine cells, e.g. "XX.O....."
        #[arg(short, long)]
        board: Board,

        /// Mark to score for
        #[arg(long, default_value = "X")]
        mark: Mark,
    },

    /// Play computer-versus-computer rounds and print the tally
    SelfPlay {
        /// Number of rounds
        #[arg(short, long, default_value = "100")]
        rounds: u32,

        /// Mode for the X player
        #[arg(long, default_value = "unbeatable")]
        x: Mode,

        /// Mode for the O player
        #[arg(long, default_value = "casual")]
        o: Mode,

        /// Seed for casual moves
        #[arg(long)]
        seed: Option<u64>,
    },
}
