// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate frames.
//!
//! Positions come in two frames:
//! - **viewport-relative**: what a bounding-client-rect style query reports; the
//!   origin is the top-left corner of the visible browser/window viewport.
//! - **content-absolute**: relative to the full scrollable content of a
//!   [`Container`](crate::Container), independent of its current scroll offset.
//!
//! Each frame has its own point and rect newtype so the two cannot be mixed by
//! accident. Conversions live on [`Container`](crate::Container).

use kurbo::{Point, Rect, Size, Vec2};

/// A point relative to the visible viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportPoint(pub Point);

/// A point in content-absolute coordinates of a container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentPoint(pub Point);

/// A rectangle relative to the visible viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportRect(pub Rect);

/// A rectangle in content-absolute coordinates of a container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentRect(pub Rect);

impl ViewportPoint {
    /// Creates a viewport-relative point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Point::new(x, y))
    }
}

impl ContentPoint {
    /// Creates a content-absolute point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Point::new(x, y))
    }

    /// Returns this point moved by `delta`.
    #[must_use]
    pub fn offset(self, delta: Vec2) -> Self {
        Self(self.0 + delta)
    }

    /// The vector from the content origin to this point.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        self.0.to_vec2()
    }
}

impl ViewportRect {
    /// Creates a viewport-relative rect from its origin and size.
    #[must_use]
    pub fn from_origin_size(origin: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self(Rect::from_origin_size(origin, size))
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> ViewportPoint {
        ViewportPoint(self.0.origin())
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Size {
        self.0.size()
    }
}

impl ContentRect {
    /// Creates a content-absolute rect from its origin and size.
    #[must_use]
    pub fn from_origin_size(origin: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self(Rect::from_origin_size(origin, size))
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> ContentPoint {
        ContentPoint(self.0.origin())
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Size {
        self.0.size()
    }

    /// The same size placed at `origin`.
    #[must_use]
    pub fn with_origin(&self, origin: ContentPoint) -> Self {
        Self(self.0.with_origin(origin.0))
    }
}
