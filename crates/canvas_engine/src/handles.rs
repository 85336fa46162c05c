//! Selection handles: hit regions and resize/rotate geometry
//!
//! Handles are derived on demand from the selection bounding box and
//! never stored between frames.

use deck_model::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Side length of a square handle hit region
pub const HANDLE_SIZE: f64 = 10.0;

/// Distance from the top edge to the rotate handle center
pub const ROTATE_HANDLE_OFFSET: f64 = 24.0;

/// The nine grab regions on a selection's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Rotate,
}

impl Handle {
    pub fn is_rotate(&self) -> bool {
        matches!(self, Handle::Rotate)
    }
}

/// Hit regions for every handle of the given bounding box
pub fn handle_rects(bounds: Rect) -> [(Handle, Rect); 9] {
    let half = HANDLE_SIZE / 2.0;
    let square =
        |cx: f64, cy: f64| Rect::new(cx - half, cy - half, HANDLE_SIZE, HANDLE_SIZE);
    let cx = bounds.center().x;
    let cy = bounds.center().y;

    [
        (Handle::TopLeft, square(bounds.left(), bounds.top())),
        (Handle::Top, square(cx, bounds.top())),
        (Handle::TopRight, square(bounds.right(), bounds.top())),
        (Handle::Right, square(bounds.right(), cy)),
        (Handle::BottomRight, square(bounds.right(), bounds.bottom())),
        (Handle::Bottom, square(cx, bounds.bottom())),
        (Handle::BottomLeft, square(bounds.left(), bounds.bottom())),
        (Handle::Left, square(bounds.left(), cy)),
        (
            Handle::Rotate,
            square(cx, bounds.top() - ROTATE_HANDLE_OFFSET),
        ),
    ]
}

/// The handle whose hit region contains the point, if any
pub fn hit_test(bounds: Rect, point: Point) -> Option<Handle> {
    handle_rects(bounds)
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(handle, _)| handle)
}

/// Resize the captured original bounds by a raw pointer delta.
///
/// Only the edges owned by the handle move; each moving edge is clamped
/// so neither dimension drops below `min_size`. The rotate handle moves
/// no edges.
pub fn resize(original: Rect, handle: Handle, dx: f64, dy: f64, min_size: f64) -> Rect {
    let mut left = original.left();
    let mut top = original.top();
    let mut right = original.right();
    let mut bottom = original.bottom();

    let moves_left = matches!(handle, Handle::TopLeft | Handle::Left | Handle::BottomLeft);
    let moves_right = matches!(handle, Handle::TopRight | Handle::Right | Handle::BottomRight);
    let moves_top = matches!(handle, Handle::TopLeft | Handle::Top | Handle::TopRight);
    let moves_bottom = matches!(
        handle,
        Handle::BottomLeft | Handle::Bottom | Handle::BottomRight
    );

    if moves_left {
        left = (left + dx).min(right - min_size);
    }
    if moves_right {
        right = (right + dx).max(left + min_size);
    }
    if moves_top {
        top = (top + dy).min(bottom - min_size);
    }
    if moves_bottom {
        bottom = (bottom + dy).max(top + min_size);
    }

    Rect::new(left, top, right - left, bottom - top)
}

/// Signed angle in degrees between the vectors center->press and
/// center->current, normalized into `(-180, 180]`
pub fn rotation_delta(center: Point, press: Point, current: Point) -> f64 {
    let before = (press.y - center.y).atan2(press.x - center.x);
    let after = (current.y - center.y).atan2(current.x - center.x);
    normalize_angle((after - before).to_degrees())
}

fn normalize_angle(degrees: f64) -> f64 {
    -((-degrees + 180.0).rem_euclid(360.0) - 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect {
        x: 100.0,
        y: 100.0,
        width: 50.0,
        height: 50.0,
    };

    #[test]
    fn test_hit_test_corner_and_rotate() {
        assert_eq!(
            hit_test(BOUNDS, Point::new(150.0, 150.0)),
            Some(Handle::BottomRight)
        );
        assert_eq!(
            hit_test(BOUNDS, Point::new(125.0, 76.0)),
            Some(Handle::Rotate)
        );
        assert_eq!(hit_test(BOUNDS, Point::new(125.0, 125.0)), None);
    }

    #[test]
    fn test_resize_corner_moves_two_edges() {
        let resized = resize(BOUNDS, Handle::BottomRight, 30.0, 20.0, 8.0);
        assert_eq!(resized, Rect::new(100.0, 100.0, 80.0, 70.0));
    }

    #[test]
    fn test_resize_edge_moves_one_edge() {
        let resized = resize(BOUNDS, Handle::Left, 10.0, 999.0, 8.0);
        assert_eq!(resized, Rect::new(110.0, 100.0, 40.0, 50.0));
    }

    #[test]
    fn test_resize_clamps_to_min_size() {
        let resized = resize(BOUNDS, Handle::BottomRight, -500.0, -500.0, 8.0);
        assert_eq!(resized.width, 8.0);
        assert_eq!(resized.height, 8.0);
        // Anchored edges never move.
        assert_eq!(resized.x, 100.0);
        assert_eq!(resized.y, 100.0);
    }

    #[test]
    fn test_rotation_delta_quarter_turn() {
        let center = Point::new(125.0, 125.0);
        let press = Point::new(125.0, 76.0);
        let current = Point::new(174.0, 125.0);
        let delta = rotation_delta(center, press, current);
        assert!((delta - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_delta_normalized() {
        assert_eq!(normalize_angle(270.0), -90.0);
        assert_eq!(normalize_angle(-270.0), 90.0);
        assert_eq!(normalize_angle(180.0), 180.0);
        assert_eq!(normalize_angle(0.0), 0.0);
    }
}
