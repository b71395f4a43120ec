// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning engine: the composition root for placement decisions.

use core::fmt;

use kurbo::Size;

use crate::candidates::generate_candidates;
use crate::frame::{ContentPoint, ContentRect, ViewportRect};
use crate::geometry::{is_valid_rect, is_valid_size};
use crate::options::PlacementOptions;
use crate::orientation::Orientation;
use crate::select::{CandidateReducer, SelectionContext, select_best};
use crate::viewport::Container;

/// Everything needed to place a tooltip for one step.
///
/// Requests are built fresh for every step change or reposition trigger and
/// consumed synchronously. Missing handles are `None`; invalid geometry is
/// treated as missing.
#[derive(Clone, Copy)]
pub struct PlacementRequest<'a> {
    /// Target bounds as reported by the host (viewport-relative).
    pub target: Option<ViewportRect>,
    /// Tooltip size.
    pub tooltip: Option<Size>,
    /// Container hosting the tour.
    pub container: Option<&'a Container>,
    /// Placement configuration.
    pub options: &'a PlacementOptions,
    /// Replaces the default closest-to-center reduction.
    pub reducer: Option<&'a dyn CandidateReducer>,
}

impl fmt::Debug for PlacementRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementRequest")
            .field("target", &self.target)
            .field("tooltip", &self.tooltip)
            .field("container", &self.container)
            .field("options", &self.options)
            .field("reducer", &self.reducer.is_some())
            .finish()
    }
}

/// Result of a placement decision.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Orientation of the chosen candidate, if the position came from one.
    ///
    /// `None` for the target-less center position, the fallback position, and
    /// custom reducer results that match no candidate.
    pub orientation: Option<Orientation>,
    /// Tooltip origin in content coordinates of the container.
    pub position: ContentPoint,
    /// Where the container should scroll to, if anywhere.
    pub scroll_to: Option<ContentPoint>,
}

/// Computes where the tooltip should go.
///
/// Returns `None` only when the tooltip or the container is missing. Without
/// a target the tooltip is centered in the current viewport.
#[must_use]
pub fn compute_tooltip_position(request: &PlacementRequest<'_>) -> Option<ContentPoint> {
    place(request).map(|p| p.position)
}

/// Computes the tooltip position together with its orientation and the
/// scroll destination that brings target and tooltip into view.
#[must_use]
pub fn place(request: &PlacementRequest<'_>) -> Option<Placement> {
    let tooltip = request.tooltip.filter(|s| is_valid_size(*s))?;
    let container = request.container?;
    let options = request.options;

    let Some(target) = request
        .target
        .filter(|t| is_valid_rect(t.0))
        .map(|t| container.to_content_rect(t))
    else {
        return Some(Placement {
            orientation: None,
            position: container.viewport_center(tooltip, None),
            scroll_to: None,
        });
    };

    let candidates = generate_candidates(
        target,
        tooltip,
        options.padding,
        options.separation,
        container.visible_rect(),
    );
    let ctx = SelectionContext {
        container,
        target,
        tooltip,
        scroll_disabled: options.scroll_disabled,
    };

    let (orientation, position) =
        match select_best(&candidates, &options.preferences, &ctx, request.reducer) {
            Some(point) => (
                candidates
                    .iter()
                    .find(|c| c.point == point)
                    .map(|c| c.orientation),
                point,
            ),
            None => (None, default_position(container, target, tooltip)),
        };

    let scroll_to = if options.scroll_disabled {
        None
    } else {
        compute_scroll_destination(container, target, tooltip, position)
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        orientation = orientation.map(Orientation::as_str),
        x = position.0.x,
        y = position.0.y,
        scrolls = scroll_to.is_some(),
        "placed tooltip"
    );

    Some(Placement {
        orientation,
        position,
        scroll_to,
    })
}

/// Decides whether the container must scroll so that `target` and the
/// tooltip at `chosen` are both visible.
///
/// Returns `None` when both are already in view or when the container cannot
/// move any closer; otherwise the clamped destination that centers both.
#[must_use]
pub fn compute_scroll_destination(
    container: &Container,
    target: ContentRect,
    tooltip: Size,
    chosen: ContentPoint,
) -> Option<ContentPoint> {
    let tooltip_rect = ContentRect::from_origin_size(chosen.0, tooltip);
    if container.element_is_in_view(target, None) && container.element_is_in_view(tooltip_rect, None)
    {
        return None;
    }
    let destination = container
        .predicted_scroll_position(container.center_around_elements(tooltip_rect, target));
    (destination.to_vec2() != container.scroll_offset).then_some(destination)
}

/// Content position of a target reported in viewport coordinates.
#[must_use]
pub fn target_position(container: &Container, target: ViewportRect) -> ContentPoint {
    container.to_content_absolute(target.origin())
}

/// Viewport center after the container scrolls to the target.
fn default_position(container: &Container, target: ContentRect, tooltip: Size) -> ContentPoint {
    let scrolled = container.predicted_scroll_position(container.center_around_element(target));
    container.viewport_center(tooltip, Some(scrolled))
}
