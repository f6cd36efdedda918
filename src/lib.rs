//! Tic-tac-toe against a random computer opponent, with persisted
//! win/loss/draw statistics.
//!
//! [`GameSession`] owns the board and statistics. Storage and randomness are
//! injected so that front ends and tests can supply their own. The GTK front
//! end lives behind the `gui` feature.

pub mod ai;
pub mod error;
pub mod game;
pub mod i18n;
pub mod storage;
#[cfg(feature = "gui")]
pub mod ui;

pub use error::{GameError, StorageError};
pub use game::field::{Board, WIN_LINES};
pub use game::logic::{GameSession, MoveResult};
pub use game::types::{Cell, Mark, Outcome, Phase, Statistics};
pub use game::view::{BoardView, CellView};
pub use i18n::I18n;
pub use storage::{FileStore, KeyValueStore, MemoryStore, Settings, STATISTICS_KEY};
