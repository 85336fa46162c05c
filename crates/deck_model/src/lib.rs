//! Deck Model - Core deck/page/element data structures
//!
//! This crate provides the document model for the slide editor: a deck of
//! pages, each owning an ordered (z-ordered) list of positioned elements
//! plus its selection set. Identity is carried by stable UUID-backed ids
//! so higher layers (commands, undo/redo) never hold live references into
//! the mutable containers.

mod deck;
mod element;
mod error;
mod geometry;
mod ids;
mod page;

pub use deck::*;
pub use element::*;
pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use page::*;
