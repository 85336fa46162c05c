//! Error types for deck model operations

use crate::{ElementId, PageId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckModelError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, DeckModelError>;
