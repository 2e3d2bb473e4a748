//! Async game session with a delayed computer reply.
//!
//! The coordinator chooses the computer's move as soon as the human has
//! played, but the mark only lands after a fixed delay. Each delay is a
//! spawned task holding the move ticket. Resetting the round aborts that task
//! and bumps the round id, so a commit that slips through is rejected as
//! stale by the coordinator.

use std::sync::Arc;
use std::time::Duration;
use tictac_engine::{Board, Coordinator, Mark, Mode, PendingMove, RoundPhase};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Shared state behind the session lock.
#[derive(Debug)]
struct SessionState {
    coordinator: Coordinator,
    commit: Option<(PendingMove, JoinHandle<()>)>,
}

impl SessionState {
    fn cancel_commit(&mut self) {
        if let Some((ticket, handle)) = self.commit.take() {
            debug!(?ticket, "Cancelling delayed computer move");
            handle.abort();
        }
    }
}

/// One human's game against the computer.
///
/// Cloning yields another handle to the same session.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: Arc<Mutex<SessionState>>,
    delay: Duration,
}

impl GameSession {
    /// Wraps `coordinator`, delaying computer moves by `delay`.
    #[instrument(skip(coordinator))]
    pub fn new(coordinator: Coordinator, delay: Duration) -> Self {
        info!("Creating game session");
        Self {
            state: Arc::new(Mutex::new(SessionState {
                coordinator,
                commit: None,
            })),
            delay,
        }
    }

    /// Returns the commit delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Plays the human's mark at `index`.
    ///
    /// Returns whether the input was accepted. Dropped input (occupied cell,
    /// computer still thinking, round over) returns `false`.
    #[instrument(skip(self))]
    pub async fn submit_human_move(&self, index: usize) -> bool {
        let mut state = self.state.lock().await;
        let before = *state.coordinator.board();
        let ticket = state.coordinator.submit_human_move(index);
        let accepted = *state.coordinator.board() != before;
        if let Some(ticket) = ticket {
            self.schedule_commit(&mut state, ticket);
        }
        accepted
    }

    /// Lets the computer open the round. Returns whether it was allowed.
    #[instrument(skip(self))]
    pub async fn computer_starts_first(&self) -> bool {
        let mut state = self.state.lock().await;
        match state.coordinator.computer_starts_first() {
            Some(ticket) => {
                self.schedule_commit(&mut state, ticket);
                true
            }
            None => false,
        }
    }

    /// Cancels any delayed move and starts a fresh round.
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.cancel_commit();
        state.coordinator.reset();
    }

    /// Flips the computer's mode, which also resets the round.
    #[instrument(skip(self))]
    pub async fn toggle_mode(&self) -> Mode {
        let mut state = self.state.lock().await;
        state.cancel_commit();
        state.coordinator.toggle_mode()
    }

    /// Returns a copy of the board.
    pub async fn board(&self) -> Board {
        *self.state.lock().await.coordinator.board()
    }

    /// Returns the round phase.
    pub async fn phase(&self) -> RoundPhase {
        self.state.lock().await.coordinator.phase()
    }

    /// Returns the current mode.
    pub async fn mode(&self) -> Mode {
        self.state.lock().await.coordinator.mode()
    }

    /// Returns the mark the human holds.
    pub async fn human_mark(&self) -> Mark {
        self.state.lock().await.coordinator.human_mark()
    }

    /// Returns whether a computer move is waiting to land.
    pub async fn is_computer_pending(&self) -> bool {
        self.state.lock().await.coordinator.pending().is_some()
    }

    fn schedule_commit(&self, state: &mut SessionState, ticket: PendingMove) {
        state.cancel_commit();

        let shared = Arc::clone(&self.state);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.lock().await;
            let placed = state.coordinator.commit_computer_move(ticket);
            debug!(?ticket, placed, "Delayed computer move fired");
            if state.commit.as_ref().is_some_and(|(pending, _)| *pending == ticket) {
                state.commit = None;
            }
        });
        debug!(?ticket, delay_ms = delay.as_millis(), "Computer move scheduled");
        state.commit = Some((ticket, handle));
    }
}
