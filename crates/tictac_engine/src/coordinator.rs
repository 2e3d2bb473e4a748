//! Round coordination between the human and the computer.
//!
//! [`Coordinator`] owns everything a round needs: the board, which mark
//! each role holds, the round phase, the move mode and any computer move
//! that has been chosen but not yet placed. It never sleeps. When the
//! computer has to answer it hands out a [`PendingMove`] ticket, and the
//! caller decides when to redeem it with
//! [`Coordinator::commit_computer_move`].
//!
//! Invalid input is dropped without changing state: occupied cells, moves
//! while the computer is thinking, moves after the round has ended, and
//! `computer_starts_first` once a round is under way.

use super::policy::{Mode, choose_move};
use super::rules;
use super::{Board, Mark, Role, RoundOutcome, RoundPhase, Searcher};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// Receives notifications from a [`Coordinator`].
///
/// Every method has an empty default, so a view only implements what it
/// renders.
pub trait RoundObserver: Send {
    /// Called after a mark is placed and after a reset.
    fn on_board_changed(&mut self, _board: &Board) {}

    /// Called once when a round ends.
    fn on_round_ended(&mut self, _outcome: &RoundOutcome) {}

    /// Called after the mode flips.
    fn on_mode_toggled(&mut self, _mode: Mode) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RoundObserver for NoopObserver {}

/// A computer move that has been chosen but not yet placed.
///
/// The ticket is bound to the round that issued it; once that round is
/// reset the ticket is stale and committing it does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct PendingMove {
    round: u64,
    index: usize,
    mark: Mark,
}

impl PendingMove {
    /// Round the move was chosen in.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Cell the computer will take.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Mark the computer will place.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// Game session for one human against the computer.
pub struct Coordinator {
    board: Board,
    human: Mark,
    phase: RoundPhase,
    to_move: Role,
    mode: Mode,
    round: u64,
    pending: Option<PendingMove>,
    searcher: Searcher,
    rng: StdRng,
    observer: Box<dyn RoundObserver>,
}

impl Coordinator {
    /// Creates a session with the human holding `X` and an empty board.
    pub fn new(mode: Mode, searcher: Searcher, rng: StdRng) -> Self {
        Self {
            board: Board::new(),
            human: Mark::X,
            phase: RoundPhase::NotStarted,
            to_move: Role::Human,
            mode,
            round: 0,
            pending: None,
            searcher,
            rng,
            observer: Box::new(NoopObserver),
        }
    }

    /// Creates a session whose casual moves are reproducible.
    pub fn seeded(mode: Mode, seed: u64) -> Self {
        Self::new(mode, Searcher::default(), StdRng::seed_from_u64(seed))
    }

    /// Replaces the observer.
    pub fn with_observer(mut self, observer: impl RoundObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the round phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns who is expected to move next.
    pub fn to_move(&self) -> Role {
        self.to_move
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the round identifier, bumped on every reset.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Returns the computer move awaiting commit, if any.
    pub fn pending(&self) -> Option<PendingMove> {
        self.pending
    }

    /// Returns the mark the human holds.
    pub fn human_mark(&self) -> Mark {
        self.human
    }

    /// Returns the mark the computer holds.
    pub fn computer_mark(&self) -> Mark {
        self.human.opponent()
    }

    /// Returns the mark bound to `role`.
    pub fn mark_of(&self, role: Role) -> Mark {
        match role {
            Role::Human => self.human_mark(),
            Role::Computer => self.computer_mark(),
        }
    }

    /// Places the human's mark at `index`.
    ///
    /// Returns the computer's reply to commit later, or `None` when the
    /// input was dropped or the move ended the round.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn submit_human_move(&mut self, index: usize) -> Option<PendingMove> {
        if self.pending.is_some() {
            debug!("Computer move pending, ignoring input");
            return None;
        }
        if self.phase == RoundPhase::Ended {
            debug!("Round has ended, ignoring input");
            return None;
        }
        if !self.board.place(index, self.human) {
            debug!("Cell unavailable, ignoring input");
            return None;
        }

        self.phase = RoundPhase::InProgress;
        self.to_move = Role::Computer;
        self.observer.on_board_changed(&self.board);

        if self.check_for_round_end() {
            return None;
        }
        self.arm_computer_move()
    }

    /// Lets the computer open the round with `X`.
    ///
    /// Only allowed before the first mark of a round; otherwise ignored.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn computer_starts_first(&mut self) -> Option<PendingMove> {
        if self.phase != RoundPhase::NotStarted {
            debug!(phase = %self.phase, "Round already started, ignoring request");
            return None;
        }

        self.human = Mark::O;
        self.phase = RoundPhase::InProgress;
        self.to_move = Role::Computer;
        info!("Computer opens the round");
        self.arm_computer_move()
    }

    /// Places a pending computer move.
    ///
    /// The ticket must be the one currently pending in the current round;
    /// anything else is stale and discarded. Returns whether the mark was
    /// placed.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn commit_computer_move(&mut self, ticket: PendingMove) -> bool {
        if self.pending != Some(ticket) || ticket.round != self.round {
            debug!(?ticket, "Discarding stale computer move");
            return false;
        }

        self.pending = None;
        self.to_move = Role::Human;
        if !self.board.place(ticket.index, ticket.mark) {
            debug!(?ticket, "Cell taken before commit, discarding computer move");
            return false;
        }

        self.observer.on_board_changed(&self.board);
        self.check_for_round_end();
        true
    }

    /// Ends the round if the board is terminal. Returns whether it ended.
    pub fn check_for_round_end(&mut self) -> bool {
        if self.phase == RoundPhase::Ended {
            return true;
        }
        match rules::outcome(&self.board) {
            Some(outcome) => {
                self.phase = RoundPhase::Ended;
                self.declare_winner(outcome);
                true
            }
            None => false,
        }
    }

    /// Starts a fresh round: clears the board, discards any pending move
    /// and hands the first move to the human.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn reset(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!(?ticket, "Discarding pending computer move");
        }
        self.board.reset();
        self.phase = RoundPhase::NotStarted;
        self.to_move = Role::Human;
        self.round += 1;
        info!(round = self.round, "Round reset");
        self.observer.on_board_changed(&self.board);
    }

    /// Flips between casual and unbeatable play and resets the round.
    #[instrument(skip(self))]
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.reset();
        info!(mode = %self.mode, "Mode toggled");
        self.observer.on_mode_toggled(self.mode);
        self.mode
    }

    fn declare_winner(&mut self, outcome: RoundOutcome) {
        // The human goes into the next round holding X.
        if self.human == Mark::O {
            self.human = Mark::X;
        }
        info!(%outcome, "Round ended");
        self.observer.on_round_ended(&outcome);
    }

    fn arm_computer_move(&mut self) -> Option<PendingMove> {
        let mark = self.computer_mark();
        let index = choose_move(self.mode, &self.board, mark, &mut self.searcher, &mut self.rng)?;
        let ticket = PendingMove::new(self.round, index, mark);
        self.pending = Some(ticket);
        debug!(?ticket, mode = %self.mode, "Computer move armed");
        Some(ticket)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(Mode::default(), Searcher::default(), StdRng::from_os_rng())
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("board", &self.board)
            .field("human", &self.human)
            .field("phase", &self.phase)
            .field("to_move", &self.to_move)
            .field("mode", &self.mode)
            .field("round", &self.round)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Board(Board),
        Ended(RoundOutcome),
        Mode(Mode),
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Seen>>>);

    impl Recorder {
        fn take(&self) -> Vec<Seen> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl RoundObserver for Recorder {
        fn on_board_changed(&mut self, board: &Board) {
            self.0.lock().unwrap().push(Seen::Board(*board));
        }

        fn on_round_ended(&mut self, outcome: &RoundOutcome) {
            self.0.lock().unwrap().push(Seen::Ended(*outcome));
        }

        fn on_mode_toggled(&mut self, mode: Mode) {
            self.0.lock().unwrap().push(Seen::Mode(mode));
        }
    }

    fn unbeatable() -> (Coordinator, Recorder) {
        let recorder = Recorder::default();
        let game = Coordinator::seeded(Mode::Unbeatable, 11).with_observer(recorder.clone());
        (game, recorder)
    }

    #[test]
    fn test_human_move_arms_computer_reply() {
        let (mut game, recorder) = unbeatable();
        let ticket = game.submit_human_move(0).expect("computer should reply");

        assert_eq!(game.phase(), RoundPhase::InProgress);
        assert_eq!(game.to_move(), Role::Computer);
        assert_eq!(ticket.mark(), Mark::O);
        assert_eq!(ticket.round(), 0);
        // The reply is not on the board until committed.
        assert!(game.board().is_empty(ticket.index()));
        assert_eq!(recorder.take().len(), 1);

        assert!(game.commit_computer_move(ticket));
        assert_eq!(game.to_move(), Role::Human);
        assert_eq!(game.pending(), None);
        assert_eq!(game.board().empty_cell_count(), 7);
    }

    #[test]
    fn test_input_dropped_while_computer_pending() {
        let (mut game, _) = unbeatable();
        let ticket = game.submit_human_move(0).unwrap();
        let before = *game.board();

        assert_eq!(game.submit_human_move(8), None);
        assert_eq!(*game.board(), before);
        assert_eq!(game.pending(), Some(ticket));
    }

    #[test]
    fn test_occupied_cell_dropped() {
        let (mut game, recorder) = unbeatable();
        let ticket = game.submit_human_move(4).unwrap();
        game.commit_computer_move(ticket);
        recorder.take();

        assert_eq!(game.submit_human_move(4), None);
        assert_eq!(game.submit_human_move(ticket.index()), None);
        assert_eq!(game.submit_human_move(42), None);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_reset_makes_ticket_stale() {
        let (mut game, _) = unbeatable();
        let ticket = game.submit_human_move(0).unwrap();
        game.reset();

        assert_eq!(game.round(), 1);
        assert_eq!(game.pending(), None);
        assert!(!game.commit_computer_move(ticket));
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.phase(), RoundPhase::NotStarted);
    }

    #[test]
    fn test_ticket_from_previous_round_rejected_after_new_move() {
        let (mut game, _) = unbeatable();
        let old = game.submit_human_move(0).unwrap();
        game.reset();
        let fresh = game.submit_human_move(0).unwrap();

        // Same cell and mark, different round.
        assert_eq!(old.index(), fresh.index());
        assert!(!game.commit_computer_move(old));
        assert!(game.commit_computer_move(fresh));
    }

    #[test]
    fn test_computer_starts_first() {
        let (mut game, _) = unbeatable();
        let ticket = game.computer_starts_first().unwrap();

        assert_eq!(game.human_mark(), Mark::O);
        assert_eq!(game.computer_mark(), Mark::X);
        assert_eq!(ticket.mark(), Mark::X);
        assert_eq!(game.phase(), RoundPhase::InProgress);
        // Every opening is a draw, so the first empty cell is chosen.
        assert_eq!(ticket.index(), 0);

        assert!(game.commit_computer_move(ticket));
        assert_eq!(game.computer_starts_first(), None);
    }

    #[test]
    fn test_computer_starts_first_ignored_mid_round() {
        let (mut game, _) = unbeatable();
        let ticket = game.submit_human_move(4).unwrap();
        game.commit_computer_move(ticket);

        assert_eq!(game.computer_starts_first(), None);
        assert_eq!(game.human_mark(), Mark::X);
    }

    #[test]
    fn test_human_win_ends_round() {
        let (mut game, recorder) = unbeatable();
        game.board = "XX.OO....".parse().unwrap();
        game.phase = RoundPhase::InProgress;

        assert_eq!(game.submit_human_move(2), None);
        assert_eq!(game.phase(), RoundPhase::Ended);
        assert_eq!(game.pending(), None);
        assert_eq!(
            recorder.take().last(),
            Some(&Seen::Ended(RoundOutcome::Winner {
                mark: Mark::X,
                combination: [0, 1, 2],
            }))
        );

        // Nothing more is accepted until reset.
        assert_eq!(game.submit_human_move(8), None);
        assert_eq!(game.computer_starts_first(), None);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_unbeatable_punishes_scripted_human() {
        let (mut game, recorder) = unbeatable();
        // Human always takes the lowest free cell: 0, 1, 3. The computer
        // answers 4, 2 and then completes the anti-diagonal.
        while game.phase() != RoundPhase::Ended {
            let cell = game.board().empty_indices().next().unwrap();
            if let Some(ticket) = game.submit_human_move(cell) {
                game.commit_computer_move(ticket);
            }
        }
        let ended = recorder.take().into_iter().find_map(|s| match s {
            Seen::Ended(o) => Some(o),
            _ => None,
        });
        assert_eq!(
            ended,
            Some(RoundOutcome::Winner {
                mark: Mark::O,
                combination: [2, 4, 6],
            })
        );
        // The human held X all round, so no swap.
        assert_eq!(game.human_mark(), Mark::X);
    }

    #[test]
    fn test_declare_winner_normalizes_human_to_x() {
        let (mut game, recorder) = unbeatable();
        let ticket = game.computer_starts_first().unwrap();
        game.commit_computer_move(ticket);
        assert_eq!(game.human_mark(), Mark::O);

        while game.phase() != RoundPhase::Ended {
            let cell = game.board().empty_indices().next().unwrap();
            if let Some(ticket) = game.submit_human_move(cell) {
                game.commit_computer_move(ticket);
            }
        }

        assert_eq!(game.human_mark(), Mark::X);
        assert_eq!(game.computer_mark(), Mark::O);
        assert!(recorder.take().iter().any(|s| matches!(s, Seen::Ended(_))));
    }

    #[test]
    fn test_toggle_mode_resets_and_notifies() {
        let (mut game, recorder) = unbeatable();
        let ticket = game.submit_human_move(0).unwrap();
        recorder.take();

        assert_eq!(game.toggle_mode(), Mode::Casual);
        assert_eq!(game.mode(), Mode::Casual);
        assert_eq!(*game.board(), Board::new());
        assert!(!game.commit_computer_move(ticket));
        assert_eq!(
            recorder.take(),
            vec![Seen::Board(Board::new()), Seen::Mode(Mode::Casual)]
        );
    }

    #[test]
    fn test_reset_keeps_mark_binding() {
        let (mut game, _) = unbeatable();
        game.computer_starts_first();
        game.reset();
        assert_eq!(game.human_mark(), Mark::O);
        assert_eq!(game.to_move(), Role::Human);
    }
}
