// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-agnostic geometry helpers over [`kurbo`] points and sizes.
//!
//! None of these functions panic or return errors. Invalid input (non-finite
//! coordinates, negative or non-finite sizes) yields `None` or `false`, so
//! callers can treat "cannot compare" as an ordinary outcome.

use kurbo::{Point, Rect, Size};

/// Returns `true` if both coordinates of `p` are finite.
#[must_use]
pub fn is_valid_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Returns `true` if both components of `s` are finite and non-negative.
#[must_use]
pub fn is_valid_size(s: Size) -> bool {
    s.width.is_finite() && s.height.is_finite() && s.width >= 0.0 && s.height >= 0.0
}

/// Returns `true` if `r` has a valid origin and a valid, non-negative size.
///
/// Rects are considered in `from_origin_size` form: `x0 <= x1` and `y0 <= y1`.
#[must_use]
pub fn is_valid_rect(r: Rect) -> bool {
    is_valid_point(r.origin()) && is_valid_size(Size::new(r.x1 - r.x0, r.y1 - r.y0))
}

/// Euclidean distance between `a` and `b`, or `None` if either point is invalid.
#[must_use]
pub fn distance(a: Point, b: Point) -> Option<f64> {
    (is_valid_point(a) && is_valid_point(b)).then(|| a.distance(b))
}

/// Absolute difference of the areas of `a` and `b`, or `None` on invalid input.
#[must_use]
pub fn area_difference(a: Size, b: Size) -> Option<f64> {
    (is_valid_size(a) && is_valid_size(b)).then(|| (a.area() - b.area()).abs())
}

/// Returns `true` if `inner` fits within `outer` on both axes.
///
/// Invalid sizes never fit.
#[must_use]
pub fn fits_within(inner: Size, outer: Size) -> bool {
    is_valid_size(inner)
        && is_valid_size(outer)
        && inner.width <= outer.width
        && inner.height <= outer.height
}

/// Returns `true` if `inner` placed at `inner_origin` lies entirely inside
/// `outer` placed at `outer_origin`.
#[must_use]
pub fn contains_at(inner: Size, outer: Size, inner_origin: Point, outer_origin: Point) -> bool {
    if !fits_within(inner, outer) || !is_valid_point(inner_origin) || !is_valid_point(outer_origin)
    {
        return false;
    }
    inner_origin.x >= outer_origin.x
        && inner_origin.y >= outer_origin.y
        && inner_origin.x + inner.width <= outer_origin.x + outer.width
        && inner_origin.y + inner.height <= outer_origin.y + outer.height
}

/// Smallest rectangle enclosing both `a` and `b`.
///
/// Use [`Rect::origin`] and [`Rect::size`] on the result for the point + size form.
#[must_use]
pub fn combined_bounds(a_point: Point, a_size: Size, b_point: Point, b_size: Size) -> Rect {
    Rect::from_origin_size(a_point, a_size).union(Rect::from_origin_size(b_point, b_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(-2.0, 1.5);
        assert_eq!(distance(a, b), distance(b, a));
        assert_eq!(distance(a, a), Some(0.0));
        assert_eq!(distance(Point::ZERO, a), Some(5.0));
    }

    #[test]
    fn distance_of_invalid_points_is_undistinguishable() {
        let nan = Point::new(f64::NAN, 0.0);
        let inf = Point::new(0.0, f64::INFINITY);
        assert_eq!(distance(nan, Point::ZERO), None);
        assert_eq!(distance(Point::ZERO, inf), None);
    }

    #[test]
    fn area_difference_is_absolute() {
        let a = Size::new(10.0, 10.0);
        let b = Size::new(5.0, 4.0);
        assert_eq!(area_difference(a, b), Some(80.0));
        assert_eq!(area_difference(b, a), Some(80.0));
        assert_eq!(area_difference(Size::new(-1.0, 2.0), a), None);
    }

    #[test]
    fn fits_within_is_reflexive_and_rejects_negative_sizes() {
        let s = Size::new(120.0, 40.0);
        assert!(fits_within(s, s));
        assert!(fits_within(Size::ZERO, s));
        assert!(!fits_within(Size::new(121.0, 40.0), s));
        assert!(!fits_within(Size::new(-1.0, 1.0), s));
        assert!(!fits_within(Size::new(1.0, 1.0), Size::new(10.0, -10.0)));
        assert!(!fits_within(Size::new(f64::NAN, 1.0), s));
    }

    #[test]
    fn contains_at_checks_placement_as_well_as_size() {
        let inner = Size::new(10.0, 10.0);
        let outer = Size::new(100.0, 100.0);
        assert!(contains_at(inner, outer, Point::new(5.0, 5.0), Point::ZERO));
        assert!(contains_at(inner, outer, Point::new(90.0, 90.0), Point::ZERO));
        // Fits by size, but hangs off the right edge.
        assert!(!contains_at(inner, outer, Point::new(95.0, 5.0), Point::ZERO));
        // Starts before the outer origin.
        assert!(!contains_at(inner, outer, Point::new(5.0, 5.0), Point::new(6.0, 0.0)));
        // Never contained when it cannot fit at all.
        assert!(!contains_at(outer, inner, Point::ZERO, Point::ZERO));
    }

    #[test]
    fn combined_bounds_encloses_both() {
        let r = combined_bounds(
            Point::new(10.0, 20.0),
            Size::new(5.0, 5.0),
            Point::new(-4.0, 22.0),
            Size::new(2.0, 30.0),
        );
        assert_eq!(r, Rect::new(-4.0, 20.0, 15.0, 52.0));
        assert_eq!(r.origin(), Point::new(-4.0, 20.0));
        assert_eq!(r.size(), Size::new(19.0, 32.0));
    }

    #[test]
    fn rect_validity() {
        assert!(is_valid_rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(!is_valid_rect(Rect::new(0.0, 0.0, -1.0, 1.0)));
        assert!(!is_valid_rect(Rect::new(f64::NAN, 0.0, 1.0, 1.0)));
    }
}
