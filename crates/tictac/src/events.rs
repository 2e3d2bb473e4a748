//! Events sent from the session to the view.

use tictac_engine::{Board, Mode, RoundObserver, RoundOutcome};
use tokio::sync::mpsc;
use tracing::warn;

/// Messages sent from the coordinator to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed or the board was cleared.
    BoardChanged(Board),
    /// The round finished.
    RoundEnded(RoundOutcome),
    /// The computer switched between casual and unbeatable.
    ModeToggled(Mode),
}

/// Forwards coordinator notifications into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end for the view.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self { event_tx }, event_rx)
    }

    fn send(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("Event receiver dropped");
        }
    }
}

impl RoundObserver for ChannelObserver {
    fn on_board_changed(&mut self, board: &Board) {
        self.send(GameEvent::BoardChanged(*board));
    }

    fn on_round_ended(&mut self, outcome: &RoundOutcome) {
        self.send(GameEvent::RoundEnded(*outcome));
    }

    fn on_mode_toggled(&mut self, mode: Mode) {
        self.send(GameEvent::ModeToggled(mode));
    }
}
