// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip placement around a target in a few container shapes.
//!
//! This example shows:
//! - the candidate catalogue generated around a target,
//! - which candidate the default closest-to-center reduction picks,
//! - how orientation preferences and a custom reducer change the choice,
//! - when the container is asked to scroll.
//!
//! Run:
//! - `cargo run -p wayfinder_demos --example placement`
//! - `RUST_LOG=wayfinder_placement=trace cargo run -p wayfinder_demos --example placement`

use kurbo::{Size, Vec2};
use tracing_subscriber::EnvFilter;
use wayfinder_placement::{
    Candidate, Container, ContentPoint, Orientation, PageMetrics, PlacementOptions,
    PlacementRequest, ViewportPoint, ViewportRect, generate_candidates, place,
};

const TOOLTIP: Size = Size::new(240.0, 120.0);

fn show(label: &str, request: &PlacementRequest<'_>) {
    match place(request) {
        Some(p) => println!(
            "{label:<28} -> {:<11} at ({:>6.1}, {:>6.1}){}",
            p.orientation.map_or("(none)", Orientation::as_str),
            p.position.0.x,
            p.position.0.y,
            p.scroll_to
                .map(|s| format!("  scroll to ({:.1}, {:.1})", s.0.x, s.0.y))
                .unwrap_or_default(),
        ),
        None => println!("{label:<28} -> not placed"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = Container::page(
        PageMetrics::uniform(Size::new(1280.0, 720.0)),
        Size::new(1280.0, 4000.0),
        Vec2::new(0.0, 600.0),
    );
    let target = ViewportRect::from_origin_size((80.0, 120.0), (160.0, 40.0));

    println!("== Candidates around a header button ==");
    let defaults = PlacementOptions::default();
    for c in generate_candidates(
        page.to_content_rect(target),
        TOOLTIP,
        defaults.padding,
        defaults.separation,
        page.visible_rect(),
    ) {
        println!("  {:<11} ({:>6.1}, {:>6.1})", c.orientation.as_str(), c.point.0.x, c.point.0.y);
    }

    println!();
    println!("== Page container ==");
    let base = PlacementRequest {
        target: Some(target),
        tooltip: Some(TOOLTIP),
        container: Some(&page),
        options: &defaults,
        reducer: None,
    };
    show("default", &base);

    let forced = PlacementOptions {
        preferences: vec![Orientation::West],
        ..PlacementOptions::default()
    };
    show("forced west", &PlacementRequest { options: &forced, ..base });

    let restricted = PlacementOptions {
        preferences: vec![Orientation::North, Orientation::South],
        ..PlacementOptions::default()
    };
    show("north or south", &PlacementRequest { options: &restricted, ..base });

    let topmost = |pool: &[Candidate]| -> Option<ContentPoint> {
        pool.iter()
            .min_by(|a, b| a.point.0.y.total_cmp(&b.point.0.y))
            .map(|c| c.point)
    };
    show("topmost reducer", &PlacementRequest { reducer: Some(&topmost), ..base });
    show("no target", &PlacementRequest { target: None, ..base });

    println!();
    println!("== Scrolling element container ==");
    let panel = Container::element(
        ViewportPoint::new(300.0, 100.0),
        Size::new(400.0, 300.0),
        Size::new(400.0, 2400.0),
        Vec2::ZERO,
    );
    let deep = ViewportRect::from_origin_size((420.0, 900.0), (80.0, 30.0));
    let in_panel = PlacementRequest {
        target: Some(deep),
        container: Some(&panel),
        ..base
    };
    show("below the fold", &in_panel);

    let no_scroll = PlacementOptions {
        scroll_disabled: true,
        ..PlacementOptions::default()
    };
    show("below the fold, no scroll", &PlacementRequest { options: &no_scroll, ..in_panel });
}
