use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::field::Board;
use super::types::{Mark, Outcome, Phase, Statistics};
use super::view::BoardView;
use crate::ai;
use crate::i18n::I18n;
use crate::storage::{self, KeyValueStore, STATISTICS_KEY};

/// One player's session: the current board plus cumulative statistics.
///
/// The human always plays X and moves first; the computer answers with O
/// inside the same [`place_mark`](Self::place_mark) call. Outcome, phase and
/// turn are derived from the board on demand.
#[derive(Debug)]
pub struct GameSession<S, R = StdRng> {
    board: Board,
    statistics: Statistics,
    statistics_key: String,
    store: S,
    rng: R,
}

impl<S: KeyValueStore, R: Rng> GameSession<S, R> {
    /// Start a session, loading statistics stored under [`STATISTICS_KEY`].
    pub fn new(store: S, rng: R) -> Self {
        Self::with_key(store, rng, STATISTICS_KEY)
    }

    /// Start a session whose statistics live under `key`. Keys rejected by
    /// [`storage::is_valid_statistics_key`] are replaced by [`STATISTICS_KEY`].
    pub fn with_key(store: S, rng: R, key: impl Into<String>) -> Self {
        let mut statistics_key = key.into();
        if !storage::is_valid_statistics_key(&statistics_key) {
            warn!(key = %statistics_key, "unusable statistics key, using {}", STATISTICS_KEY);
            statistics_key = STATISTICS_KEY.to_string();
        }
        let statistics = storage::load_statistics(&store, &statistics_key);
        info!(
            key = %statistics_key,
            wins = statistics.wins,
            losses = statistics.losses,
            draws = statistics.draws,
            "session started"
        );
        Self {
            board: Board::new(),
            statistics,
            statistics_key,
            store,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn phase(&self) -> Phase {
        match self.board.outcome() {
            Outcome::InProgress => {
                if self.board.count(Mark::X) > self.board.count(Mark::O) {
                    Phase::AwaitingOpponentMove
                } else {
                    Phase::AwaitingHumanMove
                }
            }
            outcome => Phase::GameOver(outcome),
        }
    }

    /// Mark to be placed next, or `None` once the game is over.
    pub fn turn(&self) -> Option<Mark> {
        match self.phase() {
            Phase::AwaitingHumanMove => Some(Mark::X),
            Phase::AwaitingOpponentMove => Some(Mark::O),
            Phase::GameOver(_) => None,
        }
    }

    /// Human clicks cell `index`.
    ///
    /// Occupied cells, out-of-range indices and clicks after the game ended
    /// are ignored and reported as [`MoveResult::Invalid`]. Otherwise X is
    /// placed and, unless that ends the game, the computer replies at once.
    #[instrument(skip(self))]
    pub fn place_mark(&mut self, index: usize) -> MoveResult {
        if self.phase() != Phase::AwaitingHumanMove {
            debug!(phase = ?self.phase(), "move ignored");
            return MoveResult::Invalid;
        }
        if let Err(e) = self.board.place(index, Mark::X) {
            debug!(error = %e, "move ignored");
            return MoveResult::Invalid;
        }
        if self.settle() {
            return MoveResult::GameOver;
        }
        self.opponent_turn()
    }

    /// Clear the board for a new game. Statistics are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        debug!("board reset");
    }

    /// Render-ready snapshot of the session.
    pub fn view(&self, i18n: &I18n) -> BoardView {
        BoardView::build(
            &self.board,
            self.turn().unwrap_or(Mark::X),
            self.statistics,
            i18n,
        )
    }

    fn opponent_turn(&mut self) -> MoveResult {
        if self.board.is_full() {
            warn!("opponent turn on a full board, skipping");
            return MoveResult::Continue;
        }
        let index = match ai::select_move(&self.board, &mut self.rng) {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "opponent could not move");
                return MoveResult::Continue;
            }
        };
        if let Err(e) = self.board.place(index, Mark::O) {
            warn!(error = %e, index, "opponent picked an unusable cell");
            return MoveResult::Continue;
        }
        debug!(index, "opponent moved");
        if self.settle() {
            MoveResult::GameOver
        } else {
            MoveResult::Continue
        }
    }

    /// Finish the game if the board is terminal. Returns `true` if it was.
    fn settle(&mut self) -> bool {
        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            self.finish(outcome);
            true
        } else {
            false
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.statistics.record(outcome);
        info!(?outcome, "game over");
        // The in-memory record stays authoritative even if persisting fails.
        if let Err(e) =
            storage::save_statistics(&mut self.store, &self.statistics_key, &self.statistics)
        {
            warn!(error = %e, "could not persist statistics");
        }
    }
}

/// Result of a human move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Move was rejected; nothing changed.
    Invalid,
    /// Both marks placed, the human is to move again.
    Continue,
    /// The game ended with this event.
    GameOver,
}
