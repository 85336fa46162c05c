//! The reversible command abstraction

use crate::Result;
use deck_model::Deck;

/// A reversible unit of mutation.
///
/// Commands carry the minimal before/after delta needed for an exact
/// inverse and address pages/elements by stable id, never by live
/// reference. Both directions set absolute values, so replaying either
/// one against already-applied state never accumulates drift.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Run the forward action against the deck
    fn apply(&self, deck: &mut Deck) -> Result<()>;

    /// Run the exact inverse of the forward action
    fn unapply(&self, deck: &mut Deck) -> Result<()>;

    /// Whether this command is currently willing to be undone
    fn can_undo(&self) -> bool {
        true
    }

    /// Whether this command is currently willing to be redone
    fn can_redo(&self) -> bool {
        true
    }

    /// Human-readable description for menus and the status channel
    fn display_name(&self) -> &str;
}

/// Composite command: members run in argument order going forward and in
/// exact reverse order going backward.
///
/// A failing member does NOT roll back members that already ran; the
/// history manager keeps its stacks consistent, but the deck reflects the
/// partial application. Undoable/redoable only when every member is.
#[derive(Debug)]
pub struct Batch {
    description: String,
    commands: Vec<Box<dyn Command>>,
}

impl Batch {
    pub fn new(description: impl Into<String>, commands: Vec<Box<dyn Command>>) -> Self {
        Self {
            description: description.into(),
            commands,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for Batch {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        for command in &self.commands {
            command.apply(deck)?;
        }
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        for command in self.commands.iter().rev() {
            command.unapply(deck)?;
        }
        Ok(())
    }

    fn can_undo(&self) -> bool {
        self.commands.iter().all(|c| c.can_undo())
    }

    fn can_redo(&self) -> bool {
        self.commands.iter().all(|c| c.can_redo())
    }

    fn display_name(&self) -> &str {
        &self.description
    }
}
