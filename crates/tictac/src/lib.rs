//! Human-vs-computer tic-tac-toe.
//!
//! Wraps the [`tictac_engine`] coordinator in an async session that delays
//! the computer's reply, forwards round events to a view, and reads its
//! settings from TOML.
//!
//! # Example
//!
//! ```no_run
//! use tictac::{ChannelObserver, GameConfig, GameSession};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("tictac.toml")?;
//! let (observer, events) = ChannelObserver::channel();
//! let session = GameSession::new(
//!     config.coordinator().with_observer(observer),
//!     config.move_delay(),
//! );
//! session.submit_human_move(4).await;
//! tictac::terminal::run(session, events).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod events;
mod scoreboard;
pub mod selfplay;
mod session;
pub mod terminal;

pub use config::{ConfigError, GameConfig};
pub use events::{ChannelObserver, GameEvent};
pub use scoreboard::Scoreboard;
pub use session::GameSession;
