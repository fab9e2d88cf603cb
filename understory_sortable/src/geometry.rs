// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry helpers: axis overlap and pointer/slot intersection tests.
//!
//! All helpers are pure. Degenerate input (zero-size or inverted rectangles,
//! NaN coordinates) never panics and simply reports "no intersection".
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_sortable::geometry::{intersects_with, intersects_with_pointer, is_over_axis};
//!
//! // Half-open: the start is inside, the end is not.
//! assert!(is_over_axis(10.0, 10.0, 5.0));
//! assert!(!is_over_axis(15.0, 10.0, 5.0));
//!
//! let slot = Rect::new(0.0, 0.0, 100.0, 20.0);
//! assert!(intersects_with_pointer(Point::new(50.0, 19.0), slot));
//! assert!(!intersects_with_pointer(Point::new(50.0, 20.0), slot));
//!
//! // Touching edges are not an overlap.
//! assert!(!intersects_with(slot, Rect::new(100.0, 0.0, 200.0, 20.0)));
//! ```

use kurbo::{Point, Rect, Size};

/// Side length of the square hit box used for pointer/container queries.
pub const POINTER_EXTENT: f64 = 1.0;

/// Returns `true` if `coord` lies in the half-open range `[start, start + length)`.
#[must_use]
pub fn is_over_axis(coord: f64, start: f64, length: f64) -> bool {
    coord >= start && coord < start + length
}

/// Returns `true` if the click-adjusted pointer position lies inside `slot` on both axes.
#[must_use]
pub fn intersects_with_pointer(pointer: Point, slot: Rect) -> bool {
    is_over_axis(pointer.y, slot.y0, slot.height()) && is_over_axis(pointer.x, slot.x0, slot.width())
}

/// Returns `true` if `a` and `b` share a region of positive area.
///
/// Rectangles with zero or negative extent on either axis never intersect.
#[must_use]
pub fn intersects_with(a: Rect, b: Rect) -> bool {
    has_area(a) && has_area(b) && a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Returns `true` if `outer` fully covers `inner`.
#[must_use]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    has_area(outer)
        && outer.x0 <= inner.x0
        && outer.y0 <= inner.y0
        && inner.x1 <= outer.x1
        && inner.y1 <= outer.y1
}

/// Absolute hit box for a click-adjusted pointer position.
#[must_use]
pub fn pointer_box(pointer: Point) -> Rect {
    Rect::from_origin_size(pointer, Size::new(POINTER_EXTENT, POINTER_EXTENT))
}

fn has_area(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_is_half_open() {
        assert!(is_over_axis(0.0, 0.0, 10.0));
        assert!(is_over_axis(9.999, 0.0, 10.0));
        assert!(!is_over_axis(10.0, 0.0, 10.0));
        assert!(!is_over_axis(-0.001, 0.0, 10.0));
    }

    #[test]
    fn axis_rejects_degenerate_input() {
        assert!(!is_over_axis(0.0, 0.0, 0.0));
        assert!(!is_over_axis(5.0, 10.0, -10.0));
        assert!(!is_over_axis(f64::NAN, 0.0, 10.0));
        assert!(!is_over_axis(1.0, f64::NAN, 10.0));
    }

    #[test]
    fn pointer_must_be_inside_both_axes() {
        let slot = Rect::new(10.0, 10.0, 30.0, 20.0);
        assert!(intersects_with_pointer(Point::new(10.0, 10.0), slot));
        assert!(!intersects_with_pointer(Point::new(31.0, 15.0), slot));
        assert!(!intersects_with_pointer(Point::new(20.0, 25.0), slot));
    }

    #[test]
    fn zero_size_slot_never_matches_pointer() {
        let slot = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!intersects_with_pointer(Point::new(10.0, 10.0), slot));
    }

    #[test]
    fn overlap_requires_positive_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(intersects_with(a, Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!intersects_with(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!intersects_with(a, Rect::new(5.0, 5.0, 5.0, 8.0)));
        assert!(!intersects_with(a, Rect::new(8.0, 8.0, 2.0, 2.0)));
        assert!(!intersects_with(Rect::ZERO, a));
    }

    #[test]
    fn nested_rect_containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(contains_rect(outer, Rect::new(10.0, 10.0, 90.0, 90.0)));
        assert!(contains_rect(outer, outer));
        assert!(!contains_rect(outer, Rect::new(50.0, 50.0, 150.0, 90.0)));
        assert!(!contains_rect(Rect::ZERO, Rect::ZERO));
    }

    #[test]
    fn pointer_box_is_anchored_at_pointer() {
        let hit = pointer_box(Point::new(4.0, 6.0));
        assert_eq!(hit, Rect::new(4.0, 6.0, 5.0, 7.0));
        assert!(intersects_with(hit, Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
