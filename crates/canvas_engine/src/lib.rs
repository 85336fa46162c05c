//! Canvas Engine - Selection, direct manipulation, and snapping
//!
//! Sits on top of [`deck_model`] and [`edit_engine`]: the
//! [`CanvasController`] turns raw pointer events into selection changes,
//! live geometry previews, and undoable commands, while the
//! [`alignment`] module supplies the pure snap math and [`handles`] the
//! resize/rotate grab regions. No rendering happens here; hosts consume
//! the read-only snapshots and draw them however they like.

pub mod alignment;
pub mod controller;
mod error;
pub mod handles;

pub use alignment::{resolve_snap, Axis, GuideLine, SnapResult, SNAP_TOLERANCE};
pub use controller::{CanvasController, CanvasSettings, GestureKind, Modifiers};
pub use error::{CanvasError, Result};
pub use handles::{Handle, HANDLE_SIZE, ROTATE_HANDLE_OFFSET};
