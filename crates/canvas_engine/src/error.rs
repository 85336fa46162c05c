//! Error types for canvas interaction

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("No page at index {0}")]
    NoSuchPage(usize),

    #[error("No inline text edit in progress")]
    NotEditingText,

    #[error("Edit engine error: {0}")]
    Edit(#[from] edit_engine::EditError),

    #[error("Deck model error: {0}")]
    Model(#[from] deck_model::DeckModelError),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
