// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport model: the visible and scrollable regions of a tour container.

use kurbo::{Point, Size, Vec2};

use crate::frame::{ContentPoint, ContentRect, ViewportPoint};
use crate::geometry::contains_at;

/// Measurements of the page-level scroll surface.
///
/// Mobile browsers do not agree on which element reports the real viewport
/// size, so the page viewport is the per-axis maximum of all three.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PageMetrics {
    /// Client size of the scrolling root element (usually `body`).
    pub root_client: Size,
    /// Client size of the document element.
    pub document_client: Size,
    /// Inner size of the window.
    pub window_inner: Size,
}

impl PageMetrics {
    /// Metrics where every source reports the same `size`.
    #[must_use]
    pub const fn uniform(size: Size) -> Self {
        Self {
            root_client: size,
            document_client: size,
            window_inner: size,
        }
    }
}

/// Which scroll surface hosts the tour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ContainerKind {
    /// The default document scroll surface.
    Page(PageMetrics),
    /// An explicitly chosen scrollable ancestor element.
    Element {
        /// Viewport-relative position of the element's client box.
        origin: ViewportPoint,
        /// Size of the element's client box.
        client_size: Size,
    },
}

/// Snapshot of the scrollable region hosting the tour.
///
/// A `Container` is plain data captured from the host at the time of a
/// placement request. It is threaded explicitly through every call; there is
/// no ambient "current root".
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Container {
    /// Page or element container.
    pub kind: ContainerKind,
    /// Full size of the scrollable content.
    pub scroll_size: Size,
    /// Current scroll offset (`scrollLeft`, `scrollTop`).
    pub scroll_offset: Vec2,
}

/// The full extent a container's viewport can ever cover, in content coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollBounds {
    /// First reachable content position.
    pub start: ContentPoint,
    /// One past the last reachable content position.
    pub end: ContentPoint,
}

impl ScrollBounds {
    /// Returns `true` if `rect` lies entirely within these bounds.
    #[must_use]
    pub fn contains(&self, rect: ContentRect) -> bool {
        let r = rect.0;
        r.x0 >= self.start.0.x
            && r.y0 >= self.start.0.y
            && r.x1 <= self.end.0.x
            && r.y1 <= self.end.0.y
    }
}

impl Container {
    /// The page-level container.
    #[must_use]
    pub const fn page(metrics: PageMetrics, scroll_size: Size, scroll_offset: Vec2) -> Self {
        Self {
            kind: ContainerKind::Page(metrics),
            scroll_size,
            scroll_offset,
        }
    }

    /// A scrollable element container whose client box sits at `origin`.
    #[must_use]
    pub const fn element(
        origin: ViewportPoint,
        client_size: Size,
        scroll_size: Size,
        scroll_offset: Vec2,
    ) -> Self {
        Self {
            kind: ContainerKind::Element {
                origin,
                client_size,
            },
            scroll_size,
            scroll_offset,
        }
    }

    /// Returns `true` for the page-level container.
    #[must_use]
    pub const fn is_page(&self) -> bool {
        matches!(self.kind, ContainerKind::Page(_))
    }

    /// Size of the visible part of the container.
    #[must_use]
    pub fn visible_size(&self) -> Size {
        match self.kind {
            ContainerKind::Page(m) => Size::new(
                m.root_client
                    .width
                    .max(m.document_client.width)
                    .max(m.window_inner.width),
                m.root_client
                    .height
                    .max(m.document_client.height)
                    .max(m.window_inner.height),
            ),
            ContainerKind::Element { client_size, .. } => client_size,
        }
    }

    /// Viewport-relative position where the container's visible region begins.
    ///
    /// This is `(0, 0)` for the page; a sub-container's viewport begins at its
    /// own boundary.
    #[must_use]
    pub fn visible_start(&self) -> ViewportPoint {
        match self.kind {
            ContainerKind::Page(_) => ViewportPoint(Point::ZERO),
            ContainerKind::Element { origin, .. } => origin,
        }
    }

    /// The currently visible region in content coordinates.
    #[must_use]
    pub fn visible_rect(&self) -> ContentRect {
        ContentRect::from_origin_size(self.scroll_offset.to_point(), self.visible_size())
    }

    /// Every position the viewport could ever occupy for this container.
    ///
    /// In viewport-relative terms the content starts at `visible_start - scroll_offset`
    /// and spans the scroll size; in content coordinates that is simply the
    /// origin. Content smaller than the viewport still spans the viewport.
    #[must_use]
    pub fn scrollable_bounds(&self) -> ScrollBounds {
        let visible = self.visible_size();
        let start = self.to_content_absolute(ViewportPoint(
            self.visible_start().0 - self.scroll_offset,
        ));
        ScrollBounds {
            start,
            end: start.offset(Vec2::new(
                self.scroll_size.width.max(visible.width),
                self.scroll_size.height.max(visible.height),
            )),
        }
    }

    /// Returns `true` if `rect`, optionally moved to `at`, lies fully within
    /// the currently visible region.
    #[must_use]
    pub fn element_is_in_view(&self, rect: ContentRect, at: Option<ContentPoint>) -> bool {
        let visible = self.visible_rect();
        let origin = at.unwrap_or_else(|| rect.origin());
        contains_at(rect.size(), visible.size(), origin.0, visible.origin().0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_container() -> Container {
        Container::element(
            ViewportPoint::new(100.0, 50.0),
            Size::new(300.0, 200.0),
            Size::new(900.0, 1200.0),
            Vec2::new(40.0, 400.0),
        )
    }

    #[test]
    fn page_visible_size_takes_the_largest_measurement() {
        let metrics = PageMetrics {
            root_client: Size::new(800.0, 500.0),
            document_client: Size::new(780.0, 640.0),
            window_inner: Size::new(820.0, 600.0),
        };
        let page = Container::page(metrics, Size::new(2000.0, 3000.0), Vec2::ZERO);
        assert_eq!(page.visible_size(), Size::new(820.0, 640.0));
        assert_eq!(page.visible_start(), ViewportPoint::new(0.0, 0.0));
        assert!(page.is_page());
    }

    #[test]
    fn element_viewport_starts_at_its_own_boundary() {
        let c = element_container();
        assert_eq!(c.visible_size(), Size::new(300.0, 200.0));
        assert_eq!(c.visible_start(), ViewportPoint::new(100.0, 50.0));
        assert_eq!(
            c.visible_rect(),
            ContentRect::from_origin_size((40.0, 400.0), (300.0, 200.0))
        );
    }

    #[test]
    fn scrollable_bounds_cover_the_whole_content() {
        let c = element_container();
        let bounds = c.scrollable_bounds();
        assert_eq!(bounds.start, ContentPoint::new(0.0, 0.0));
        assert_eq!(bounds.end, ContentPoint::new(900.0, 1200.0));

        // Content smaller than the viewport still spans the viewport.
        let small = Container::page(
            PageMetrics::uniform(Size::new(500.0, 500.0)),
            Size::new(100.0, 700.0),
            Vec2::ZERO,
        );
        assert_eq!(small.scrollable_bounds().end, ContentPoint::new(500.0, 700.0));
    }

    #[test]
    fn in_view_respects_scroll_offset_and_hypothetical_position() {
        let c = element_container();
        let rect = ContentRect::from_origin_size((50.0, 410.0), (100.0, 50.0));
        assert!(c.element_is_in_view(rect, None));
        // Above the scrolled viewport.
        assert!(!c.element_is_in_view(rect, Some(ContentPoint::new(50.0, 10.0))));
        // Flush against the far edge is still in view.
        assert!(c.element_is_in_view(rect, Some(ContentPoint::new(240.0, 550.0))));
        assert!(!c.element_is_in_view(rect, Some(ContentPoint::new(241.0, 550.0))));
    }
}
