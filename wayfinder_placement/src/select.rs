// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate selection.
//!
//! Selection runs in three stages:
//!
//! 1. **Preferences.** An empty preference list keeps every candidate. A
//!    single preference that matches a candidate is an *override*: that
//!    candidate is returned as-is, regardless of fit. A longer list is only a
//!    *restriction*; the heuristic still chooses among the survivors.
//! 2. **Scroll feasibility** (skipped when scrolling is disabled). The pool is
//!    the first non-empty of:
//!    - candidates that fit with target and tooltip both inside the *current*
//!      viewport,
//!    - candidates whose combined target + tooltip bounds fit the viewport's
//!      *size* (reachable by scrolling),
//!    - candidates inside the container's scrollable bounds at all,
//!    - the preference-filtered set.
//! 3. **Reduction** to a single point with a [`CandidateReducer`], by default
//!    [`CenterDistance`].

use kurbo::Size;

use crate::candidates::{Candidate, Candidates};
use crate::frame::{ContentPoint, ContentRect};
use crate::geometry::{combined_bounds, contains_at, distance, fits_within};
use crate::orientation::Orientation;
use crate::viewport::Container;

/// Strategy that reduces a candidate pool to one tooltip position.
///
/// Implemented for any `Fn(&[Candidate]) -> Option<ContentPoint>`, so callers
/// can pass a closure.
pub trait CandidateReducer {
    /// Picks a position from `candidates`, or `None` if nothing is acceptable.
    fn reduce(&self, candidates: &[Candidate]) -> Option<ContentPoint>;
}

impl<F> CandidateReducer for F
where
    F: Fn(&[Candidate]) -> Option<ContentPoint>,
{
    fn reduce(&self, candidates: &[Candidate]) -> Option<ContentPoint> {
        self(candidates)
    }
}

/// Geometry a selection is made against. All rects are content-absolute.
#[derive(Copy, Clone, Debug)]
pub struct SelectionContext<'a> {
    /// Container hosting the tour.
    pub container: &'a Container,
    /// Target bounds.
    pub target: ContentRect,
    /// Tooltip size.
    pub tooltip: Size,
    /// When set, no candidate may rely on scrolling.
    pub scroll_disabled: bool,
}

impl SelectionContext<'_> {
    fn tooltip_at(&self, point: ContentPoint) -> ContentRect {
        ContentRect::from_origin_size(point.0, self.tooltip)
    }

    fn combined_with_target(&self, point: ContentPoint) -> ContentRect {
        ContentRect(combined_bounds(
            point.0,
            self.tooltip,
            self.target.0.origin(),
            self.target.size(),
        ))
    }
}

/// Result of applying orientation preferences.
#[derive(Clone, Debug, PartialEq)]
pub enum Preferred {
    /// A single matching preference: use this candidate unconditionally.
    Override(Candidate),
    /// Candidates still subject to feasibility filtering and reduction.
    Pool(Candidates),
}

/// Applies orientation preferences to `candidates`.
///
/// A single preference that matches nothing falls back to every candidate.
#[must_use]
pub fn apply_preferences(candidates: &[Candidate], preferences: &[Orientation]) -> Preferred {
    match preferences {
        [] => Preferred::Pool(candidates.iter().copied().collect()),
        [only] => match candidates.iter().find(|c| c.orientation == *only) {
            Some(c) => Preferred::Override(*c),
            None => Preferred::Pool(candidates.iter().copied().collect()),
        },
        _ => Preferred::Pool(
            candidates
                .iter()
                .filter(|c| preferences.contains(&c.orientation))
                .copied()
                .collect(),
        ),
    }
}

/// Narrows `candidates` to the best scroll-feasibility pool.
///
/// Never returns an empty pool unless `candidates` is empty: on a viewport
/// too small for anything, the input comes back unchanged.
#[must_use]
pub fn feasible_pool(candidates: &[Candidate], ctx: &SelectionContext<'_>) -> Candidates {
    let bounds = ctx.container.scrollable_bounds();
    let visible = ctx.container.visible_rect();

    let reachable: Candidates = candidates
        .iter()
        .filter(|c| bounds.contains(ctx.tooltip_at(c.point)))
        .copied()
        .collect();
    let fits_viewport: Candidates = reachable
        .iter()
        .filter(|c| fits_within(ctx.combined_with_target(c.point).size(), visible.size()))
        .copied()
        .collect();
    let fits_now: Candidates = fits_viewport
        .iter()
        .filter(|c| {
            let both = ctx.combined_with_target(c.point);
            contains_at(
                both.size(),
                visible.size(),
                both.origin().0,
                visible.origin().0,
            )
        })
        .copied()
        .collect();

    #[cfg(feature = "tracing")]
    tracing::trace!(
        candidates = candidates.len(),
        reachable = reachable.len(),
        fits_viewport = fits_viewport.len(),
        fits_now = fits_now.len(),
        "candidate pools"
    );

    [fits_now, fits_viewport, reachable]
        .into_iter()
        .find(|pool| !pool.is_empty())
        .unwrap_or_else(|| candidates.iter().copied().collect())
}

/// The default reducer: keep the candidate closest to the viewport center.
///
/// The center is *predicted*: when a candidate would leave the target or the
/// tooltip out of view, the distance is measured from the center of the
/// viewport after the (clamped) scroll that would bring both into view.
/// [`Orientation::Center`] never competes; it is chosen only when no other
/// candidate produced a choice.
#[derive(Copy, Clone, Debug)]
pub struct CenterDistance<'a> {
    /// Selection geometry.
    pub ctx: SelectionContext<'a>,
}

impl CenterDistance<'_> {
    fn predicted_center(&self, point: ContentPoint, current: ContentPoint) -> ContentPoint {
        let ctx = &self.ctx;
        let container = ctx.container;
        let tooltip = ctx.tooltip_at(point);
        if ctx.scroll_disabled
            || (container.element_is_in_view(ctx.target, None)
                && container.element_is_in_view(tooltip, None))
        {
            return current;
        }
        let destination = container.center_around_elements(tooltip, ctx.target);
        container.viewport_center(
            ctx.tooltip,
            Some(container.predicted_scroll_position(destination)),
        )
    }
}

impl CandidateReducer for CenterDistance<'_> {
    fn reduce(&self, candidates: &[Candidate]) -> Option<ContentPoint> {
        let current = self.ctx.container.viewport_center(self.ctx.tooltip, None);

        let mut best: Option<(ContentPoint, Option<f64>)> = None;
        for c in candidates {
            if c.orientation == Orientation::Center {
                continue;
            }
            let score = distance(self.predicted_center(c.point, current).0, c.point.0);
            best = match best {
                // Only a strictly closer running best survives; ties and
                // undistinguishable distances go to the later candidate.
                Some((point, Some(best_score))) if score.is_some_and(|s| s > best_score) => {
                    Some((point, Some(best_score)))
                }
                _ => Some((c.point, score)),
            };
        }

        best.map(|(point, _)| point).or_else(|| {
            candidates
                .iter()
                .find(|c| c.orientation == Orientation::Center)
                .map(|c| c.point)
        })
    }
}

/// Selects a tooltip position from `candidates`.
///
/// `reducer` replaces the default [`CenterDistance`] reduction and receives
/// the feasibility pool. Returns `None` only when nothing survives the
/// preference filter (or the custom reducer declines).
#[must_use]
pub fn select_best(
    candidates: &[Candidate],
    preferences: &[Orientation],
    ctx: &SelectionContext<'_>,
    reducer: Option<&dyn CandidateReducer>,
) -> Option<ContentPoint> {
    let preferred = match apply_preferences(candidates, preferences) {
        Preferred::Override(c) => return Some(c.point),
        Preferred::Pool(pool) => pool,
    };
    let pool = if ctx.scroll_disabled {
        preferred
    } else {
        feasible_pool(&preferred, ctx)
    };
    match reducer {
        Some(r) => r.reduce(&pool),
        None => CenterDistance { ctx: *ctx }.reduce(&pool),
    }
}
