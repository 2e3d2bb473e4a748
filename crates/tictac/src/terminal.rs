//! Line-based terminal front end.
//!
//! Reads commands from stdin and prints the board whenever the session
//! reports a change. A finished round waits for any line before the next
//! round starts.

use crate::{GameEvent, GameSession, Scoreboard};
use anyhow::Result;
use std::str::FromStr;
use tictac_engine::{Position, RoundOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  0-8 or a position name   place your mark (e.g. 4, center, top-left)
  first                    let the computer open the round
  mode                     switch casual/unbeatable (resets the round)
  reset                    start a new round
  help                     show this text
  quit                     leave";

/// A command typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place the human mark at this index.
    Move(usize),
    /// Let the computer open the round.
    ComputerFirst,
    /// Start a new round.
    Reset,
    /// Switch between casual and unbeatable.
    ToggleMode,
    /// Print the command list.
    Help,
    /// Leave the game.
    Quit,
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = s.trim().to_lowercase();
        match command.as_str() {
            "first" | "o" => Ok(Input::ComputerFirst),
            "reset" | "r" => Ok(Input::Reset),
            "mode" | "m" => Ok(Input::ToggleMode),
            "help" | "h" | "?" => Ok(Input::Help),
            "quit" | "q" | "exit" => Ok(Input::Quit),
            other => Position::from_label_or_number(other)
                .map(|pos| Input::Move(pos.to_index()))
                .ok_or_else(|| format!("Unknown command: {}", s.trim())),
        }
    }
}

/// Runs the interactive game until the player quits or stdin closes.
pub async fn run(
    session: GameSession,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut scoreboard = Scoreboard::default();
    let mut awaiting_ack = false;

    println!(
        "You are {}. Computer is in {} mode.\n{}\n",
        session.human_mark().await,
        session.mode().await,
        HELP
    );
    println!("{}\n", session.board().await);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    return Ok(());
                };
                let mut input = line.parse::<Input>();
                if awaiting_ack {
                    input = Ok(acknowledge(input));
                    if input != Ok(Input::Help) {
                        awaiting_ack = false;
                    }
                }
                match input {
                    Ok(Input::Quit) => return Ok(()),
                    Ok(Input::Help) => println!("{}", HELP),
                    Ok(Input::Reset) => {
                        session.reset().await;
                        println!("You are {}.", session.human_mark().await);
                    }
                    Ok(Input::ToggleMode) => {
                        session.toggle_mode().await;
                    }
                    Ok(Input::ComputerFirst) => {
                        if !session.computer_starts_first().await {
                            debug!("Computer cannot start mid-round");
                        }
                    }
                    Ok(Input::Move(index)) => {
                        if !session.submit_human_move(index).await {
                            debug!(index, "Move ignored");
                        }
                    }
                    Err(message) => println!("{}", message),
                }
            }
            Some(event) = events.recv() => {
                match event {
                    GameEvent::BoardChanged(board) => println!("{}\n", board),
                    GameEvent::RoundEnded(outcome) => {
                        scoreboard.record(&outcome);
                        println!("{}", banner(&outcome));
                        println!("Score: {}", scoreboard);
                        println!("Press Enter for the next round.");
                        awaiting_ack = true;
                    }
                    GameEvent::ModeToggled(mode) => println!("Computer is now {}.", mode),
                }
            }
        }
    }
}

/// Maps a line typed after a round ended to the command it triggers.
///
/// Quitting, switching mode and asking for help keep their meaning; any other
/// line starts the next round.
pub fn acknowledge(input: Result<Input, String>) -> Input {
    match input {
        Ok(command @ (Input::Quit | Input::ToggleMode | Input::Help)) => command,
        _ => Input::Reset,
    }
}

/// Text shown when a round ends.
pub fn banner(outcome: &RoundOutcome) -> String {
    match outcome.combination() {
        Some([a, b, c]) => format!("{} ({}, {}, {})", outcome, a, b, c),
        None => outcome.to_string(),
    }
}
