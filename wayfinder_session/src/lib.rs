// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Session: the lifecycle of a guided tour.
//!
//! A [`TourSession`] walks an ordered list of [`Step`]s. On every step entry
//! it asks the host to measure the target, tooltip, and container, places the
//! tooltip with `wayfinder_placement`, installs a `wayfinder_focus_trap` focus
//! trap, focuses the tooltip, and requests a scroll when the placement needs
//! one.
//!
//! The session owns all per-step side effects:
//! - the focus trap and the host listeners it installed,
//! - a resize debounce, re-armed by [`TourSession::on_resize`],
//! - a moving-target poll, when enabled for the step.
//!
//! Timers are [`Subscriptions`] driven by host timestamps through
//! [`TourSession::tick`]; the host only needs to call `tick` at
//! [`TourSession::next_deadline`]. Leaving a step disposes everything it
//! installed before the next step is measured, so nothing from a previous
//! step ever fires.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use wayfinder_focus_trap::{ListenerHost, ListenerKind, Region};
//! use wayfinder_placement::{ContentPoint, Container, PageMetrics, ViewportRect};
//! use wayfinder_session::{Step, StepGeometry, TourEvent, TourHost, TourOptions, TourSession};
//!
//! #[derive(Default)]
//! struct Page {
//!     listeners: u32,
//! }
//!
//! impl ListenerHost for Page {
//!     type Listener = ();
//!     fn add_listener(&mut self, _: Region, _: ListenerKind) {
//!         self.listeners += 1;
//!     }
//!     fn remove_listener(&mut self, _: ()) {
//!         self.listeners -= 1;
//!     }
//! }
//!
//! impl TourHost for Page {
//!     type Element = u32;
//!     fn measure(&mut self, _step: &Step) -> StepGeometry<u32> {
//!         StepGeometry {
//!             container: Some(Container::page(
//!                 PageMetrics::uniform(Size::new(2000.0, 2000.0)),
//!                 Size::new(2000.0, 2000.0),
//!                 Vec2::ZERO,
//!             )),
//!             target: Some(ViewportRect::from_origin_size((0.0, 0.0), (50.0, 50.0))),
//!             tooltip: Some(Size::new(100.0, 40.0)),
//!             tooltip_focusables: vec![1, 2],
//!             target_focusables: Vec::new(),
//!         }
//!     }
//!     fn scroll_to(&mut self, _: ContentPoint) {}
//!     fn focus_tooltip(&mut self) {}
//!     fn focus(&mut self, _: u32) {}
//! }
//!
//! let steps = vec![
//!     Step::new("#intro", "Welcome!"),
//!     Step::new("#save", "Save your work here."),
//! ];
//! let mut page = Page::default();
//! let mut tour = TourSession::new(steps, TourOptions::default()).unwrap();
//!
//! tour.open(&mut page, 0);
//! assert_eq!(tour.current_step(), 0);
//! assert!(matches!(tour.next(&mut page, 10), Some(TourEvent::StepEntered { index: 1, .. })));
//!
//! // Closing removes every listener right away.
//! assert_eq!(tour.close(&mut page), Some(TourEvent::Closed));
//! assert_eq!(page.listeners, 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`TourOptions`], [`StepOverrides`], and [`Step`].
//! - `tracing`: emits `tracing` events for step transitions, timers, and repositioning.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod options;
mod session;
mod subscription;
mod watch;

pub use options::{
    DEFAULT_RENDER_TOLERANCE, DEFAULT_RESIZE_DEBOUNCE_MS, DEFAULT_UPDATE_INTERVAL_MS,
    OptionsError, ResolvedOptions, Step, StepOverrides, TourOptions,
};
pub use session::{KeyResponse, StepGeometry, TourEvent, TourHost, TourSession};
pub use subscription::{Fired, SubscriptionHandle, Subscriptions, Watch};
pub use watch::should_update;
