// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate generation: the fixed catalogue of hypothetical tooltip placements.

use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::frame::{ContentPoint, ContentRect};
use crate::geometry::{is_valid_rect, is_valid_size};
use crate::offset::center_offset;
use crate::orientation::{ORIENTATION_COUNT, Orientation};

/// One hypothetical tooltip placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Orientation relative to the target.
    pub orientation: Orientation,
    /// Tooltip origin in content coordinates.
    pub point: ContentPoint,
}

/// A list of candidates; never spills for a full catalogue.
pub type Candidates = SmallVec<[Candidate; ORIENTATION_COUNT]>;

/// Generates every placement candidate for a tooltip of size `tooltip` around `target`.
///
/// - Cardinal candidates sit `padding + separation` outside the target edge and
///   are centered along the other axis.
/// - Compound candidates use the same outward offset but align one edge of the
///   tooltip with the matching edge of the padded target.
/// - The [`Orientation::Center`] candidate centers the tooltip in `visible`
///   and ignores the target.
///
/// All 13 candidates are produced in [`Orientation::ALL`] order; filtering
/// happens during selection. Invalid geometry produces an empty list.
#[must_use]
pub fn generate_candidates(
    target: ContentRect,
    tooltip: Size,
    padding: f64,
    separation: f64,
    visible: ContentRect,
) -> Candidates {
    if !is_valid_rect(target.0)
        || !is_valid_size(tooltip)
        || !is_valid_rect(visible.0)
        || !padding.is_finite()
        || !separation.is_finite()
    {
        return Candidates::new();
    }

    let t = target.0;
    let (tw, th) = (t.width(), t.height());
    let (w, h) = (tooltip.width, tooltip.height);
    let gap = padding + separation;

    let center_x = t.x0 - (w - tw) / 2.0;
    let center_y = t.y0 - (h - th) / 2.0;
    let east = t.x1 + gap;
    let south = t.y1 + gap;
    let west = t.x0 - w - gap;
    let north = t.y0 - h - gap;

    // Edge alignment is measured against the padded target (the mask cutout).
    let align_east = t.x0 - (w - tw) + padding;
    let align_south = t.y0 - (h - th) + padding;
    let align_west = t.x0 - padding;
    let align_north = t.y0 - padding;

    let centered = center_offset(visible.0.origin(), visible.size(), tooltip);

    Orientation::ALL
        .into_iter()
        .map(|orientation| {
            let (x, y) = match orientation {
                Orientation::East => (east, center_y),
                Orientation::South => (center_x, south),
                Orientation::West => (west, center_y),
                Orientation::North => (center_x, north),
                Orientation::EastNorth => (east, align_north),
                Orientation::EastSouth => (east, align_south),
                Orientation::SouthEast => (align_east, south),
                Orientation::SouthWest => (align_west, south),
                Orientation::WestSouth => (west, align_south),
                Orientation::WestNorth => (west, align_north),
                Orientation::NorthWest => (align_west, north),
                Orientation::NorthEast => (align_east, north),
                Orientation::Center => (centered.x, centered.y),
            };
            Candidate {
                orientation,
                point: ContentPoint(Point::new(x, y)),
            }
        })
        .collect()
}
