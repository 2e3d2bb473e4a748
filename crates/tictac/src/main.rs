//! tictac - play tic-tac-toe against the computer.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tictac::{ChannelObserver, GameConfig, GameSession};
use tictac_engine::{Board, Mark, Mode, Position, Searcher};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,tictac=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            computer_first,
        } => run_play(config, mode, computer_first).await,
        Command::BestMove {
            board,
            mark,
            no_pruning,
        } => run_best_move(board, mark, !no_pruning),
        Command::Analyze { board, mark } => run_analyze(board, mark),
        Command::SelfPlay { rounds, x, o, seed } => run_self_play(rounds, x, o, seed),
    }
}

/// Run the interactive terminal game
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(config_path: PathBuf, mode: Option<Mode>, computer_first: bool) -> Result<()> {
    let mut config = GameConfig::load_or_default(&config_path)?;
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }

    let (observer, events) = ChannelObserver::channel();
    let session = GameSession::new(
        config.coordinator().with_observer(observer),
        config.move_delay(),
    );
    info!(mode = %config.mode(), "Starting game");

    if computer_first {
        session.computer_starts_first().await;
    }
    tictac::terminal::run(session, events).await
}

/// Print the best move for a position
fn run_best_move(board: Board, mark: Mark, pruning: bool) -> Result<()> {
    let result = Searcher::new(pruning).search(&board, mark);
    match result.best_move {
        Some(index) => {
            let label = Position::from_index(index).map(|p| p.label()).unwrap_or("?");
            println!(
                "{} plays {} ({}), score {}, {} nodes",
                mark, index, label, result.score, result.nodes
            );
        }
        None => println!("No empty cell for {}", mark),
    }
    Ok(())
}

/// Print per-cell scores for a position
fn run_analyze(board: Board, mark: Mark) -> Result<()> {
    let scores = Searcher::new(false).score_moves(&board, mark);
    println!("{}\n", board);
    for (index, score) in scores.iter().enumerate() {
        if let (Some(score), Some(pos)) = (score, Position::from_index(index)) {
            println!("{:>2} {:<14} {:>3}", index, pos.label(), score);
        }
    }
    Ok(())
}

/// Play computer-versus-computer rounds
fn run_self_play(rounds: u32, x: Mode, o: Mode, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let score = tictac::selfplay::run(rounds, x, o, &mut Searcher::default(), &mut rng);
    println!("X ({}) vs O ({}) over {} rounds: {}", x, o, rounds, score);
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
