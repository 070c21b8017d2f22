//! Game controller: routes player input through the session and records
//! finished games.
//!
//! The controller owns the [`GameSession`], the [`RecordStore`] and the move
//! policy. The computer's reply is not played inline: when it becomes the
//! computer's turn the controller issues an [`OpponentTicket`], and the driver
//! redeems it after a short pause with [`GameController::play_opponent_move`].
//! Starting a new game or changing mode or mark voids the outstanding ticket,
//! so a late reply can never land on a fresh board.

use couch_core::{Mark, MovePolicy};
use tracing::{debug, error, info, instrument, warn};

use crate::records::{HistoryEntry, RecordStore, Score};
use crate::session::{GameSession, Placement};
use crate::settings::{Mode, Settings};
use crate::storage::Storage;

/// Claim on the computer's next move.
///
/// At most one ticket is outstanding; any reset invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpponentTicket {
    generation: u64,
}

/// Drives one player's games: session, records, settings and opponent.
#[derive(Debug)]
pub struct GameController<S: Storage, P: MovePolicy> {
    session: GameSession,
    records: RecordStore<S>,
    settings_storage: S,
    policy: P,
    pending: Option<OpponentTicket>,
    generation: u64,
}

impl<S: Storage, P: MovePolicy> GameController<S, P> {
    /// Creates a controller, restoring saved settings and records.
    ///
    /// If the saved mark hands the opening move to the computer, a ticket is
    /// issued right away.
    #[instrument(skip(storage, policy))]
    pub fn new(storage: S, policy: P) -> Self {
        let settings = Settings::load(&storage);
        Self::with_settings(storage, policy, settings)
    }

    /// Creates a controller with explicit settings, saving them as the
    /// last-used ones.
    #[instrument(skip(storage, policy))]
    pub fn with_settings(storage: S, policy: P, settings: Settings) -> Self {
        info!(
            mode = %settings.mode,
            human_mark = %settings.human_mark,
            "Creating GameController"
        );
        let mut controller = Self {
            session: GameSession::new(settings),
            records: RecordStore::load(storage.clone()),
            settings_storage: storage,
            policy,
            pending: None,
            generation: 0,
        };
        controller.save_settings();
        controller.schedule_opponent();
        controller
    }

    /// The current session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Score so far.
    pub fn score(&self) -> Score {
        self.records.score()
    }

    /// History, newest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> + '_ {
        self.records.history()
    }

    /// The record store.
    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    /// Status line for display.
    pub fn status_text(&self) -> String {
        self.session.status_text()
    }

    /// Outstanding ticket for the computer's move, if any.
    pub fn pending_opponent_move(&self) -> Option<OpponentTicket> {
        self.pending
    }

    /// Applies the local player's move at `index` (0-8).
    ///
    /// Illegal moves are ignored. Returns whether the move was accepted.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize) -> bool {
        match self.session.apply_move(index) {
            Ok(placement) => {
                self.after_placement(placement);
                true
            }
            Err(e) => {
                debug!(error = %e, "Move ignored");
                false
            }
        }
    }

    /// Plays the computer's move for `ticket`.
    ///
    /// A ticket voided by a reset, or already redeemed, does nothing.
    /// Returns whether a move was made.
    #[instrument(skip(self))]
    pub fn play_opponent_move(&mut self, ticket: OpponentTicket) -> bool {
        if self.pending != Some(ticket) {
            debug!(
                ticket = ticket.generation,
                current = ?self.pending.map(|t| t.generation),
                "Stale opponent ticket ignored"
            );
            return false;
        }
        self.pending = None;

        if !self.session.opponent_to_move() {
            warn!("Opponent ticket redeemed but the computer is not due to move");
            return false;
        }

        let own = self.session.opponent_mark();
        let rival = self.session.human_mark();
        let position = match self.policy.choose(self.session.board(), own, rival) {
            Ok(position) => position,
            Err(e) => {
                error!(
                    error = %e,
                    board = ?self.session.board(),
                    "Move policy failed on an ongoing game"
                );
                return false;
            }
        };

        match self.session.apply_opponent_move(position) {
            Ok(placement) => {
                self.after_placement(placement);
                true
            }
            Err(e) => {
                error!(error = %e, %position, "Move policy picked an illegal square");
                false
            }
        }
    }

    /// Redeems the outstanding ticket immediately, if there is one.
    pub fn run_pending_opponent_move(&mut self) -> bool {
        match self.pending {
            Some(ticket) => self.play_opponent_move(ticket),
            None => false,
        }
    }

    /// Starts a new game with the same mode and mark.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.cancel_opponent();
        self.session.reset();
        info!("New game");
        self.schedule_opponent();
    }

    /// Switches play mode; starts a new game.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.cancel_opponent();
        self.session.set_mode(mode);
        self.save_settings();
        info!(%mode, "Mode changed");
        self.schedule_opponent();
    }

    /// Changes which mark the local player uses; starts a new game.
    #[instrument(skip(self))]
    pub fn set_human_mark(&mut self, mark: Mark) {
        self.cancel_opponent();
        self.session.set_human_mark(mark);
        self.save_settings();
        info!(%mark, "Human mark changed");
        self.schedule_opponent();
    }

    /// Wipes score and history.
    #[instrument(skip(self))]
    pub fn clear_records(&mut self) {
        self.records.clear();
    }

    fn after_placement(&mut self, placement: Placement) {
        if let Some(game) = placement.completed {
            self.records.record_completed_game(&game);
        }
        self.schedule_opponent();
    }

    fn schedule_opponent(&mut self) {
        if self.pending.is_none() && self.session.opponent_to_move() {
            self.generation += 1;
            let ticket = OpponentTicket {
                generation: self.generation,
            };
            debug!(ticket = ticket.generation, "Opponent move scheduled");
            self.pending = Some(ticket);
        }
    }

    fn cancel_opponent(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!(ticket = ticket.generation, "Opponent move cancelled");
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.session.settings().save(&self.settings_storage) {
            warn!(error = %e, "Could not save settings");
        }
    }
}
