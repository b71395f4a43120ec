// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Placement: tooltip positioning for guided tours.
//!
//! Given a target rectangle, a tooltip size, and a snapshot of the scrollable
//! [`Container`] hosting the tour, this crate decides where the tooltip goes and
//! whether the container needs to scroll so that both are visible.
//!
//! The pipeline is:
//! - **Candidates** ([`generate_candidates`]): a fixed catalogue of 13
//!   hypothetical positions, one per [`Orientation`], offset from the target by
//!   padding plus separation.
//! - **Selection** ([`select_best`]): orientation preferences, then a
//!   scroll-feasibility filter, then reduction with a [`CandidateReducer`]. The
//!   default reducer, [`CenterDistance`], keeps the candidate nearest the
//!   (predicted) viewport center.
//! - **Scroll coordination** ([`compute_scroll_destination`]): a clamped scroll
//!   position that centers target and tooltip together, when needed.
//!
//! [`place`] composes all three.
//!
//! ## Coordinate frames
//!
//! Hosts report target bounds relative to the visible viewport
//! ([`ViewportRect`]); every decision and every output is in content
//! coordinates of the container ([`ContentPoint`]). The two frames have
//! distinct types; [`Container::to_content_absolute`] converts between them.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use wayfinder_placement::{
//!     place, Container, Orientation, PageMetrics, PlacementOptions, PlacementRequest,
//!     ViewportRect,
//! };
//!
//! let container = Container::page(
//!     PageMetrics::uniform(Size::new(2000.0, 2000.0)),
//!     Size::new(2000.0, 2000.0),
//!     Vec2::ZERO,
//! );
//! let options = PlacementOptions::default();
//! let request = PlacementRequest {
//!     target: Some(ViewportRect::from_origin_size((0.0, 0.0), (50.0, 50.0))),
//!     tooltip: Some(Size::new(100.0, 40.0)),
//!     container: Some(&container),
//!     options: &options,
//!     reducer: None,
//! };
//!
//! let placement = place(&request).unwrap();
//! assert_eq!(placement.orientation, Some(Orientation::EastSouth));
//! // Everything is already visible.
//! assert_eq!(placement.scroll_to, None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`PlacementOptions`] and [`Orientation`].
//! - `tracing`: emits `tracing` events describing candidate pools and placement decisions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod candidates;
mod engine;
mod frame;
pub mod geometry;
mod offset;
mod options;
mod orientation;
mod select;
mod viewport;

pub use candidates::{Candidate, Candidates, generate_candidates};
pub use engine::{
    Placement, PlacementRequest, compute_scroll_destination, compute_tooltip_position, place,
    target_position,
};
pub use frame::{ContentPoint, ContentRect, ViewportPoint, ViewportRect};
pub use offset::center_offset;
pub use options::{DEFAULT_PADDING, DEFAULT_SEPARATION, PlacementOptions, PlacementOptionsError};
pub use orientation::{ORIENTATION_COUNT, Orientation, ParseOrientationError};
pub use select::{
    CandidateReducer, CenterDistance, Preferred, SelectionContext, apply_preferences,
    feasible_pool, select_best,
};
pub use viewport::{Container, ContainerKind, PageMetrics, ScrollBounds};
