//! Error types for editing operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Deck model error: {0}")]
    Model(#[from] deck_model::DeckModelError),
}

pub type Result<T> = std::result::Result<T, EditError>;
