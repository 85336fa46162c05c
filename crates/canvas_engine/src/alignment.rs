//! Alignment/snapping engine
//!
//! A pure function of geometry: given the box being dragged, the canvas,
//! and the other boxes on the page, compute where the box should settle
//! on each axis and which guide lines to show. Nothing here touches the
//! deck; the result is advisory, recomputed on every drag tick and
//! discarded on release.

use deck_model::Rect;
use serde::{Deserialize, Serialize};

/// Default pixel distance within which an edge snaps to a reference
pub const SNAP_TOLERANCE: f64 = 8.0;

/// Orientation of a guide line on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// A vertical line at a constant x (produced by x-axis snapping)
    Vertical,
    /// A horizontal line at a constant y (produced by y-axis snapping)
    Horizontal,
}

/// A transient guide segment marking an active snap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub axis: Axis,
    /// The snapped coordinate (x for vertical, y for horizontal)
    pub position: f64,
    /// Segment start on the perpendicular axis
    pub start: f64,
    /// Segment end on the perpendicular axis
    pub end: f64,
}

/// Corrected position plus the guides that justify it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// Corrected leading-edge x of the moving box
    pub x: f64,
    /// Corrected leading-edge y of the moving box
    pub y: f64,
    pub guides: Vec<GuideLine>,
}

/// One reference box projected onto a single axis:
/// (lo, size) along the snapping axis, (lo, hi) on the perpendicular one.
type AxisRef = ((f64, f64), (f64, f64));

/// Compute snap-corrected coordinates for a box proposed at
/// `moving.x`/`moving.y`.
///
/// Each axis runs independently with mirrored logic. Candidates are the
/// moving box's leading edge, trailing edge, and center, compared against
/// the same three coordinates of the canvas and of every reference box.
/// When several references qualify, the last one evaluated wins; the
/// iteration order (canvas, then `others` in slice order) is
/// deterministic on purpose and there is no distance ranking. Guides with
/// identical axis and endpoints collapse to one.
pub fn resolve_snap(moving: Rect, canvas: Rect, others: &[Rect], tolerance: f64) -> SnapResult {
    let mut guides = Vec::new();

    let x_refs: Vec<AxisRef> = std::iter::once(&canvas)
        .chain(others.iter())
        .map(|r| ((r.x, r.width), (r.top(), r.bottom())))
        .collect();
    let x = snap_axis(
        moving.x,
        moving.width,
        (moving.top(), moving.bottom()),
        (canvas.top(), canvas.bottom()),
        &x_refs,
        tolerance,
        Axis::Vertical,
        &mut guides,
    );

    let y_refs: Vec<AxisRef> = std::iter::once(&canvas)
        .chain(others.iter())
        .map(|r| ((r.y, r.height), (r.left(), r.right())))
        .collect();
    let y = snap_axis(
        moving.y,
        moving.height,
        (moving.left(), moving.right()),
        (canvas.left(), canvas.right()),
        &y_refs,
        tolerance,
        Axis::Horizontal,
        &mut guides,
    );

    SnapResult { x, y, guides }
}

/// Snap one axis. Returns the corrected leading coordinate.
#[allow(clippy::too_many_arguments)]
fn snap_axis(
    lo: f64,
    size: f64,
    moving_perp: (f64, f64),
    canvas_perp: (f64, f64),
    refs: &[AxisRef],
    tolerance: f64,
    axis: Axis,
    guides: &mut Vec<GuideLine>,
) -> f64 {
    // Candidate coordinates of the moving box, as offsets from its
    // leading edge: leading, trailing, center.
    let offsets = [0.0, size, size / 2.0];
    let mut corrected = lo;

    for &((ref_lo, ref_size), (ref_perp_lo, ref_perp_hi)) in refs {
        let ref_candidates = [ref_lo, ref_lo + ref_size, ref_lo + ref_size / 2.0];
        for &reference in &ref_candidates {
            for &offset in &offsets {
                if (lo + offset - reference).abs() <= tolerance {
                    corrected = reference - offset;
                    // Guide spans the union of both boxes' perpendicular
                    // extents, extended across the canvas.
                    let start = canvas_perp.0.min(moving_perp.0).min(ref_perp_lo);
                    let end = canvas_perp.1.max(moving_perp.1).max(ref_perp_hi);
                    let guide = GuideLine {
                        axis,
                        position: reference,
                        start,
                        end,
                    };
                    if !guides.contains(&guide) {
                        guides.push(guide);
                    }
                }
            }
        }
    }

    corrected
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_left_edge_snaps_to_canvas_origin_with_full_height_guide() {
        // Canvas width 800, tolerance 8, left edge lands at x=6 ->
        // corrected to 0 plus a vertical guide down the canvas.
        let moving = Rect::new(6.0, 100.0, 100.0, 80.0);
        let result = resolve_snap(moving, CANVAS, &[], 8.0);

        assert_eq!(result.x, 0.0);
        assert_eq!(result.y, 100.0);
        assert!(result.guides.contains(&GuideLine {
            axis: Axis::Vertical,
            position: 0.0,
            start: 0.0,
            end: 600.0,
        }));
    }

    #[test]
    fn test_no_snap_beyond_tolerance() {
        let moving = Rect::new(9.0, 100.0, 100.0, 80.0);
        let result = resolve_snap(moving, CANVAS, &[], 8.0);
        assert_eq!(result.x, 9.0);
        // x=9 is outside tolerance of the canvas edge, and no other
        // candidate of a 100-wide box near the left edge qualifies.
        assert!(result
            .guides
            .iter()
            .all(|g| g.axis == Axis::Horizontal || g.position != 0.0));
    }

    #[test]
    fn test_center_snaps_to_sibling_center() {
        // Sibling centered at x=300; moving box center at 303.
        let sibling = Rect::new(250.0, 400.0, 100.0, 50.0);
        let moving = Rect::new(273.0, 100.0, 60.0, 60.0);
        let result = resolve_snap(moving, CANVAS, &[sibling], 8.0);
        assert_eq!(result.x, 270.0);
    }

    #[test]
    fn test_last_qualifying_reference_wins() {
        // Two siblings with edges at 100 and 104, both within tolerance
        // of a leading edge at 102. The later one in slice order wins;
        // no distance ranking applies (100 is closer but evaluated
        // first).
        // Widths differ so only the leading-edge pair is in range.
        let near = Rect::new(100.0, 400.0, 200.0, 40.0);
        let far = Rect::new(104.0, 500.0, 300.0, 40.0);
        let moving = Rect::new(102.0, 100.0, 50.0, 50.0);

        let result = resolve_snap(moving, CANVAS, &[near, far], 8.0);
        assert_eq!(result.x, 104.0);

        let result = resolve_snap(moving, CANVAS, &[far, near], 8.0);
        assert_eq!(result.x, 100.0);
    }

    #[test]
    fn test_identical_guides_collapse() {
        // Two siblings share a left edge; only one guide at that x.
        let a = Rect::new(200.0, 100.0, 40.0, 40.0);
        let b = Rect::new(200.0, 500.0, 40.0, 40.0);
        let moving = Rect::new(197.0, 300.0, 50.0, 50.0);

        let result = resolve_snap(moving, CANVAS, &[a, b], 8.0);
        let at_200: Vec<&GuideLine> = result
            .guides
            .iter()
            .filter(|g| g.axis == Axis::Vertical && g.position == 200.0)
            .collect();
        assert_eq!(at_200.len(), 1);
    }

    #[test]
    fn test_axes_are_independent() {
        // Only y qualifies; x passes through untouched.
        let moving = Rect::new(377.0, 595.0, 100.0, 80.0);
        let result = resolve_snap(moving, CANVAS, &[], 8.0);
        assert_eq!(result.x, 377.0);
        // Top edge at 595 is within 8 of canvas bottom 600.
        assert_eq!(result.y, 600.0);
    }

    #[test]
    fn test_exact_tolerance_boundary_still_snaps() {
        let moving = Rect::new(8.0, 100.0, 100.0, 80.0);
        let result = resolve_snap(moving, CANVAS, &[], 8.0);
        assert_eq!(result.x, 0.0);
    }
}
