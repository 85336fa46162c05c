//! Positioned document objects and their style payloads

use crate::{ElementId, Point, Rect};
use serde::{Deserialize, Serialize};

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Style snapshot for an element.
///
/// Produced by value at command-creation time and opaque to the editing
/// engine: nothing in the command/history layer inspects these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

/// Geometric shape variants (rendered externally)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Triangle,
    Line,
}

/// What an element actually is. The engine only cares that `Text`
/// carries an editable string; everything else is payload for the
/// rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Shape { shape: ShapeKind },
    Text { text: String },
    Image { source: String },
}

/// A positioned object on a page.
///
/// Exclusive owner of its geometry; identity is the stable [`ElementId`],
/// so a delete followed by undo restores the same identity, not a
/// lookalike copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    pub name: String,
    /// Axis-aligned bounding box before rotation is applied
    pub bounds: Rect,
    /// Rotation in degrees, clockwise, around the bounds center
    pub rotation: f64,
    /// Paint-order rank among siblings; re-derived from list order by
    /// [`crate::Page::sync_z_order`]
    pub z_order: u32,
    pub visible: bool,
    pub locked: bool,
    pub kind: ElementKind,
    pub style: ElementStyle,
}

impl Element {
    fn with_kind(name: impl Into<String>, bounds: Rect, kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            bounds,
            rotation: 0.0,
            z_order: 0,
            visible: true,
            locked: false,
            kind,
            style: ElementStyle::default(),
        }
    }

    /// Create a shape element
    pub fn shape(shape: ShapeKind, bounds: Rect) -> Self {
        Self::with_kind("Shape", bounds, ElementKind::Shape { shape })
    }

    /// Create a text element
    pub fn text(text: impl Into<String>, bounds: Rect) -> Self {
        Self::with_kind(
            "Text",
            bounds,
            ElementKind::Text { text: text.into() },
        )
    }

    /// Create an image element referencing an externally managed source
    pub fn image(source: impl Into<String>, bounds: Rect) -> Self {
        Self::with_kind(
            "Image",
            bounds,
            ElementKind::Image {
                source: source.into(),
            },
        )
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Top-left corner of the bounds
    pub fn position(&self) -> Point {
        self.bounds.origin()
    }

    /// Set the absolute position (top-left corner), keeping size
    pub fn set_position(&mut self, position: Point) {
        self.bounds = self.bounds.with_origin(position);
    }

    /// Whether this element carries inline-editable text
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// The editable text, if any
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Replace the editable text. Returns false (and leaves the element
    /// untouched) when the element is not text-bearing.
    pub fn set_text_content(&mut self, text: impl Into<String>) -> bool {
        match &mut self.kind {
            ElementKind::Text { text: current } => {
                *current = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_roundtrip() {
        let mut el = Element::text("hello", Rect::new(0.0, 0.0, 100.0, 40.0));
        assert!(el.is_text());
        assert!(el.set_text_content("world"));
        assert_eq!(el.text_content(), Some("world"));
    }

    #[test]
    fn test_set_text_on_shape_is_rejected() {
        let mut el = Element::shape(ShapeKind::Oval, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert!(!el.set_text_content("nope"));
        assert_eq!(el.text_content(), None);
    }

    #[test]
    fn test_set_position_keeps_size() {
        let mut el = Element::shape(ShapeKind::Rectangle, Rect::new(10.0, 10.0, 50.0, 30.0));
        el.set_position(Point::new(100.0, 200.0));
        assert_eq!(el.bounds, Rect::new(100.0, 200.0, 50.0, 30.0));
    }
}
