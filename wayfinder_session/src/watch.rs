// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving-target detection.

use wayfinder_placement::geometry::{distance, is_valid_rect};
use wayfinder_placement::{Container, ContentPoint, ViewportRect, target_position};

/// Decides whether a moving target drifted far enough to reposition.
///
/// - Without a container, or with neither a current target nor a recorded
///   position, there is nothing to follow.
/// - A target that appeared or vanished always triggers an update.
/// - Otherwise the target's content position is compared with
///   `last_position`, and only a drift beyond `tolerance` counts.
#[must_use]
pub fn should_update(
    container: Option<&Container>,
    current_target: Option<ViewportRect>,
    last_position: Option<ContentPoint>,
    tolerance: f64,
) -> bool {
    let Some(container) = container else {
        return false;
    };
    let current = current_target.filter(|t| is_valid_rect(t.0));
    match (current, last_position) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(target), Some(last)) => {
            let now = target_position(container, target);
            distance(now.0, last.0).is_none_or(|d| d > tolerance)
        }
    }
}
