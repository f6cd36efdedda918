use std::cell::RefCell;
use std::rc::Rc;

use crate::game::logic::GameSession;
use crate::storage::FileStore;

pub mod app;
pub mod board;

/// Session shared between GTK callbacks on the main thread.
pub type SharedSession = Rc<RefCell<GameSession<FileStore>>>;
