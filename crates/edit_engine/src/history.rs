//! Bounded undo/redo history

use crate::{Batch, Command, Result};
use deck_model::Deck;
use tracing::debug;

/// Default number of retained undo entries
pub const MAX_HISTORY: usize = 100;

type StatusCallback = Box<dyn FnMut(&str)>;

/// Owns the undo and redo stacks and drives command execution.
///
/// One instance per editor session, injected where needed; there is no
/// global. A command is either fully applied and recorded or not applied
/// at all: forward failure leaves the stacks untouched, and an inverse
/// failure pushes the command back on top of the undo stack so it is
/// never lost.
pub struct History {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_entries: usize,
    status: Option<StatusCallback>,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
            status: None,
        }
    }

    /// Register the status callback. Last registration wins; there is no
    /// multi-subscriber fan-out.
    pub fn set_status_callback(&mut self, callback: impl FnMut(&str) + 'static) {
        self.status = Some(Box::new(callback));
    }

    fn notify(&mut self, message: &str) {
        if let Some(callback) = &mut self.status {
            callback(message);
        }
    }

    /// Run a command's forward action and record it.
    ///
    /// On success the redo stack is cleared and the oldest entries are
    /// evicted past the cap (their inverses are never invoked; they
    /// simply become non-undoable).
    pub fn execute(&mut self, deck: &mut Deck, command: Box<dyn Command>) -> Result<()> {
        if let Err(err) = command.apply(deck) {
            debug!(command = command.display_name(), %err, "execute failed");
            self.notify(&format!("{} failed: {err}", command.display_name()));
            return Err(err);
        }
        debug!(command = command.display_name(), "executed");

        self.redo_stack.clear();
        let message = command.display_name().to_string();
        self.undo_stack.push(command);
        while self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }
        self.notify(&message);
        Ok(())
    }

    /// Wrap several commands into one undo step. A single command behaves
    /// exactly like [`History::execute`].
    pub fn execute_batch(
        &mut self,
        deck: &mut Deck,
        description: impl Into<String>,
        mut commands: Vec<Box<dyn Command>>,
    ) -> Result<()> {
        match commands.len() {
            0 => Ok(()),
            1 => self.execute(deck, commands.remove(0)),
            _ => self.execute(deck, Box::new(Batch::new(description, commands))),
        }
    }

    /// Undo the most recent command. Returns false when there is nothing
    /// to undo or the top entry declines.
    pub fn undo(&mut self, deck: &mut Deck) -> Result<bool> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if !command.can_undo() {
            self.undo_stack.push(command);
            return Ok(false);
        }
        if let Err(err) = command.unapply(deck) {
            debug!(command = command.display_name(), %err, "undo failed");
            let message = format!("Undo {} failed: {err}", command.display_name());
            self.undo_stack.push(command);
            self.notify(&message);
            return Err(err);
        }
        debug!(command = command.display_name(), "undone");

        let message = format!("Undo {}", command.display_name());
        self.redo_stack.push(command);
        self.notify(&message);
        Ok(true)
    }

    /// Redo the most recently undone command. Symmetric to
    /// [`History::undo`].
    pub fn redo(&mut self, deck: &mut Deck) -> Result<bool> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if !command.can_redo() {
            self.redo_stack.push(command);
            return Ok(false);
        }
        if let Err(err) = command.apply(deck) {
            debug!(command = command.display_name(), %err, "redo failed");
            let message = format!("Redo {} failed: {err}", command.display_name());
            self.redo_stack.push(command);
            self.notify(&message);
            return Err(err);
        }
        debug!(command = command.display_name(), "redone");

        let message = format!("Redo {}", command.display_name());
        self.undo_stack.push(command);
        self.notify(&message);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.last().is_some_and(|c| c.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.redo_stack.last().is_some_and(|c| c.can_redo())
    }

    /// Description of the command undo would revert, if any
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.display_name())
    }

    /// Description of the command redo would re-run, if any
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.display_name())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.notify("History cleared");
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
