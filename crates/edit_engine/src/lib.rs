//! Edit Engine - Reversible command catalog and undo/redo history
//!
//! Every mutation of a [`deck_model::Deck`] that should be undoable goes
//! through a [`Command`], executed and recorded by a [`History`]. Commands
//! store minimal before/after deltas addressed by stable ids, so the
//! history can replay them forward and backward exactly, in any order the
//! undo/redo contract allows.

mod command;
mod element_commands;
mod error;
mod history;
mod page_commands;

pub use command::*;
pub use element_commands::*;
pub use error::*;
pub use history::*;
pub use page_commands::*;
