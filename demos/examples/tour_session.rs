// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted guided tour over a simulated page.
//!
//! This example drives a `TourSession` with a fixed script of host inputs:
//! keyboard navigation, a burst of window resizes, a target that slides
//! across the page, and finally Escape. Every `TourEvent` and every host
//! call is logged.
//!
//! Run:
//! - `cargo run -p wayfinder_demos --example tour_session`
//! - `RUST_LOG=debug cargo run -p wayfinder_demos --example tour_session`

use std::collections::HashMap;

use kurbo::{Size, Vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wayfinder_focus_trap::{Key, ListenerHost, ListenerKind, Modifiers, Region};
use wayfinder_placement::{ContentPoint, Container, PageMetrics, ViewportRect};
use wayfinder_session::{
    Step, StepGeometry, StepOverrides, TourEvent, TourHost, TourOptions, TourSession,
};

/// Focusable elements of the simulated page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Element {
    Back,
    Next,
    Close,
    TargetButton,
}

/// A page with named targets and a scrollable document.
struct Page {
    viewport: Size,
    scroll: Vec2,
    targets: HashMap<&'static str, ViewportRect>,
    next_listener: u32,
    live_listeners: usize,
}

impl Page {
    fn new() -> Self {
        let targets = HashMap::from([
            ("#search", ViewportRect::from_origin_size((40.0, 20.0), (300.0, 36.0))),
            ("#inbox", ViewportRect::from_origin_size((40.0, 120.0), (200.0, 400.0))),
            ("#ticker", ViewportRect::from_origin_size((0.0, 660.0), (160.0, 40.0))),
            ("#settings", ViewportRect::from_origin_size((1180.0, 1900.0), (60.0, 60.0))),
        ]);
        Self {
            viewport: Size::new(1280.0, 720.0),
            scroll: Vec2::ZERO,
            targets,
            next_listener: 0,
            live_listeners: 0,
        }
    }

    fn container(&self) -> Container {
        Container::page(
            PageMetrics::uniform(self.viewport),
            Size::new(1280.0, 2400.0),
            self.scroll,
        )
    }

    /// Moves a target horizontally.
    fn slide(&mut self, selector: &'static str, dx: f64) {
        if let Some(rect) = self.targets.get_mut(selector) {
            rect.0 = rect.0 + Vec2::new(dx, 0.0);
        }
    }
}

impl ListenerHost for Page {
    type Listener = u32;

    fn add_listener(&mut self, region: Region, kind: ListenerKind) -> u32 {
        self.next_listener += 1;
        self.live_listeners += 1;
        tracing::trace!(id = self.next_listener, ?region, ?kind, "listener added");
        self.next_listener
    }

    fn remove_listener(&mut self, listener: u32) {
        self.live_listeners -= 1;
        tracing::trace!(id = listener, "listener removed");
    }
}

impl TourHost for Page {
    type Element = Element;

    fn measure(&mut self, step: &Step) -> StepGeometry<Element> {
        // Targets are reported relative to the viewport, so they move with scrolling.
        let target = self
            .targets
            .get(step.selector.as_str())
            .map(|r| ViewportRect(r.0 - self.scroll));
        StepGeometry {
            container: Some(self.container()),
            target,
            tooltip: Some(Size::new(320.0, 160.0)),
            tooltip_focusables: vec![Element::Back, Element::Next, Element::Close],
            target_focusables: vec![Element::TargetButton],
        }
    }

    fn scroll_to(&mut self, destination: ContentPoint) {
        info!(x = destination.0.x, y = destination.0.y, "host scrolls");
        self.scroll = destination.to_vec2();
    }

    fn focus_tooltip(&mut self) {
        info!("host focuses the tooltip");
    }

    fn focus(&mut self, element: Element) {
        info!(?element, "host moves focus");
    }
}

fn report(event: Option<TourEvent>) {
    match event {
        Some(TourEvent::StepEntered { index, placement }) => match placement {
            Some(p) => info!(
                index,
                orientation = p.orientation.map(|o| o.as_str()),
                x = p.position.0.x,
                y = p.position.0.y,
                "step entered"
            ),
            None => info!(index, "step entered without a tooltip"),
        },
        Some(TourEvent::Repositioned { placement }) => {
            if let Some(p) = placement {
                info!(x = p.position.0.x, y = p.position.0.y, "tooltip repositioned");
            }
        }
        Some(TourEvent::Closed) => info!("tour closed"),
        None => {}
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let steps = vec![
        Step::new("#search", "Find anything from here."),
        Step::new("#inbox", "New messages land in your inbox."),
        Step::new("#ticker", "Live prices scroll by here.").with_overrides(StepOverrides {
            moving_target: Some(true),
            ..StepOverrides::default()
        }),
        Step::new("#settings", "Everything else lives in settings."),
        Step::new("", "That's it. Enjoy!"),
    ];

    let mut page = Page::new();
    let mut tour: TourSession<Element, u32> =
        match TourSession::new(steps, TourOptions::default()) {
            Ok(tour) => tour,
            Err(err) => {
                tracing::error!(%err, "invalid tour");
                return;
            }
        };

    let mut now = 0;
    report(tour.open(&mut page, now));

    // Tab off the end of the tooltip lands on the target's button.
    let response = tour.on_key_down(
        &mut page,
        Region::Tooltip,
        Element::Close,
        Key::Tab,
        Modifiers::empty(),
        now,
    );
    info!(prevent_default = response.prevent_default, "Tab on the last tooltip button");
    tour.on_key_up(Key::Tab, Modifiers::empty());

    now += 1_000;
    let right = tour.on_key_down(
        &mut page,
        Region::Tooltip,
        Element::Next,
        Key::ArrowRight,
        Modifiers::empty(),
        now,
    );
    report(right.event);

    // A burst of resizes repositions once.
    page.viewport = Size::new(1024.0, 700.0);
    for _ in 0..5 {
        now += 5;
        tour.on_resize(now);
        report(tour.tick(&mut page, now));
    }
    now += 50;
    report(tour.tick(&mut page, now));

    now += 1_000;
    report(tour.next(&mut page, now));

    // Follow the ticker while it slides.
    for _ in 0..4 {
        page.slide("#ticker", 120.0);
        if let Some(deadline) = tour.next_deadline() {
            now = now.max(deadline);
        }
        report(tour.tick(&mut page, now));
    }

    now += 1_000;
    report(tour.next(&mut page, now));
    now += 1_000;
    report(tour.next(&mut page, now));

    let escape = tour.on_key_down(
        &mut page,
        Region::Tooltip,
        Element::Close,
        Key::Escape,
        Modifiers::empty(),
        now,
    );
    report(escape.event);
    info!(live_listeners = page.live_listeners, "after close");
}
