// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame conversion, centering, and scroll prediction.

use kurbo::{Point, Size, Vec2};

use crate::frame::{ContentPoint, ContentRect, ViewportPoint, ViewportRect};
use crate::geometry::combined_bounds;
use crate::viewport::{Container, ContainerKind};

/// Returns the origin at which a rect of size `inner` is centered inside a
/// rect of size `outer` starting at `origin`.
///
/// The relation is symmetric: when `inner` is larger than `outer`, the result
/// places `outer` centered within `inner` instead (the returned origin moves
/// up/left of `origin`).
#[must_use]
pub fn center_offset(origin: Point, outer: Size, inner: Size) -> Point {
    Point::new(
        origin.x + outer.width / 2.0 - inner.width / 2.0,
        origin.y + outer.height / 2.0 - inner.height / 2.0,
    )
}

impl Container {
    /// Converts a viewport-relative point into content-absolute coordinates.
    ///
    /// Element containers subtract their own viewport position first; then the
    /// current scroll offset is added.
    #[must_use]
    pub fn to_content_absolute(&self, p: ViewportPoint) -> ContentPoint {
        let local = match self.kind {
            ContainerKind::Page(_) => p.0,
            ContainerKind::Element { origin, .. } => p.0 - origin.0.to_vec2(),
        };
        ContentPoint(local + self.scroll_offset)
    }

    /// Inverse of [`Container::to_content_absolute`].
    #[must_use]
    pub fn to_viewport_relative(&self, p: ContentPoint) -> ViewportPoint {
        let local = p.0 - self.scroll_offset;
        ViewportPoint(match self.kind {
            ContainerKind::Page(_) => local,
            ContainerKind::Element { origin, .. } => local + origin.0.to_vec2(),
        })
    }

    /// Converts a viewport-relative rect into content-absolute coordinates.
    #[must_use]
    pub fn to_content_rect(&self, r: ViewportRect) -> ContentRect {
        ContentRect::from_origin_size(self.to_content_absolute(r.origin()).0, r.size())
    }

    /// Largest scroll offset the container can reach on each axis.
    #[must_use]
    pub fn max_scroll_offset(&self) -> Vec2 {
        let visible = self.visible_size();
        Vec2::new(
            (self.scroll_size.width - visible.width).max(0.0),
            (self.scroll_size.height - visible.height).max(0.0),
        )
    }

    /// Clamps a desired scroll destination to what the container can reach.
    ///
    /// Any decision that assumes the viewport ends up at `destination` must
    /// use this value: scrolling past an edge is impossible.
    #[must_use]
    pub fn predicted_scroll_position(&self, destination: ContentPoint) -> ContentPoint {
        let max = self.max_scroll_offset();
        // `max(0.0)` first so a NaN destination collapses to the start.
        ContentPoint::new(
            destination.0.x.max(0.0).min(max.x),
            destination.0.y.max(0.0).min(max.y),
        )
    }

    /// Scroll destination that centers a single rect in the viewport.
    #[must_use]
    pub fn center_around_element(&self, a: ContentRect) -> ContentPoint {
        ContentPoint(center_offset(a.0.origin(), a.size(), self.visible_size()))
    }

    /// Scroll destination that centers the combined bounds of `a` and `b` in
    /// the viewport.
    ///
    /// The result is the raw request; pass it through
    /// [`Container::predicted_scroll_position`] to learn where the viewport
    /// will actually land.
    #[must_use]
    pub fn center_around_elements(&self, a: ContentRect, b: ContentRect) -> ContentPoint {
        let both = combined_bounds(a.0.origin(), a.size(), b.0.origin(), b.size());
        ContentPoint(center_offset(both.origin(), both.size(), self.visible_size()))
    }

    /// Origin that centers a rect of size `inner` in the viewport.
    ///
    /// With `scrolled_to`, the viewport is assumed to sit at that scroll
    /// position instead of the current one.
    #[must_use]
    pub fn viewport_center(&self, inner: Size, scrolled_to: Option<ContentPoint>) -> ContentPoint {
        let start = scrolled_to.unwrap_or(ContentPoint(self.scroll_offset.to_point()));
        ContentPoint(center_offset(start.0, self.visible_size(), inner))
    }
}
