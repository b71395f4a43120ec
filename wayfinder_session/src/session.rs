// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tour session: step navigation and per-step lifecycle.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;
use wayfinder_focus_trap::{
    FocusOutOutcome, FocusTrap, Key, KeyOutcome, ListenerHost, Modifiers, Region,
};
use wayfinder_placement::geometry::is_valid_rect;
use wayfinder_placement::{
    CandidateReducer, Container, ContentPoint, Placement, PlacementRequest, ViewportRect, place,
    target_position,
};

use crate::options::{OptionsError, ResolvedOptions, Step, TourOptions};
use crate::subscription::{SubscriptionHandle, Subscriptions, Watch};
use crate::watch::should_update;

/// Geometry snapshot the host reports for one step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepGeometry<K> {
    /// Container hosting the tour, if it could be resolved.
    pub container: Option<Container>,
    /// Target bounds (viewport-relative), if the target exists.
    pub target: Option<ViewportRect>,
    /// Tooltip size, if the tooltip is mounted.
    pub tooltip: Option<Size>,
    /// Focusable elements inside the tooltip, in tab order.
    pub tooltip_focusables: Vec<K>,
    /// Focusable elements inside the target, in tab order.
    pub target_focusables: Vec<K>,
}

impl<K> Default for StepGeometry<K> {
    fn default() -> Self {
        Self {
            container: None,
            target: None,
            tooltip: None,
            tooltip_focusables: Vec::new(),
            target_focusables: Vec::new(),
        }
    }
}

/// Everything the session needs from the view layer.
pub trait TourHost: ListenerHost {
    /// Identifier of a focusable element.
    type Element: Copy + Eq;

    /// Measures the container, target, and tooltip for `step`.
    fn measure(&mut self, step: &Step) -> StepGeometry<Self::Element>;

    /// Requests a scroll of the container. The session does not wait for it.
    fn scroll_to(&mut self, destination: ContentPoint);

    /// Moves keyboard focus to the tooltip container.
    fn focus_tooltip(&mut self);

    /// Moves keyboard focus to `element`.
    fn focus(&mut self, element: Self::Element);
}

/// A change the host should render.
#[derive(Clone, Debug, PartialEq)]
pub enum TourEvent {
    /// A step was entered (on open or navigation).
    StepEntered {
        /// Index of the new step.
        index: usize,
        /// Where the tooltip goes; `None` if the container or tooltip is missing.
        placement: Option<Placement>,
    },
    /// The current step was placed again.
    Repositioned {
        /// The new placement.
        placement: Option<Placement>,
    },
    /// The tour was closed.
    Closed,
}

/// The session's answer to a key press.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyResponse {
    /// The host should suppress the key's default action.
    pub prevent_default: bool,
    /// What changed as a result, if anything.
    pub event: Option<TourEvent>,
}

/// A running guided tour.
///
/// The session owns the focus trap and the timer subscriptions of the current
/// step. Every step change and [`close`](Self::close) tears both down before
/// anything new is installed, so callbacks of a previous step can never fire.
///
/// Dropping an open session does not remove host listeners; call
/// [`close`](Self::close) first.
pub struct TourSession<K, L> {
    steps: Vec<Step>,
    resolved: Vec<ResolvedOptions>,
    initial_step: usize,
    index: usize,
    open: bool,
    placement: Option<Placement>,
    last_target: Option<ContentPoint>,
    trap: Option<FocusTrap<K, L>>,
    subscriptions: Subscriptions,
    resize: Option<SubscriptionHandle>,
    poller: Option<SubscriptionHandle>,
    reducer: Option<Box<dyn CandidateReducer>>,
}

impl<K: fmt::Debug, L: fmt::Debug> fmt::Debug for TourSession<K, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourSession")
            .field("steps", &self.steps.len())
            .field("resolved", &self.resolved.len())
            .field("initial_step", &self.initial_step)
            .field("index", &self.index)
            .field("open", &self.open)
            .field("placement", &self.placement)
            .field("last_target", &self.last_target)
            .field("trap", &self.trap)
            .field("subscriptions", &self.subscriptions)
            .field("resize", &self.resize)
            .field("poller", &self.poller)
            .field("reducer", &self.reducer.is_some())
            .finish()
    }
}

impl<K, L> TourSession<K, L>
where
    K: Copy + Eq,
{
    /// Creates a closed session after validating `options` against every step.
    pub fn new(steps: Vec<Step>, options: TourOptions) -> Result<Self, OptionsError> {
        let resolved = options.resolve_steps(&steps)?;
        Ok(Self {
            steps,
            resolved,
            initial_step: options.initial_step,
            index: options.initial_step,
            open: false,
            placement: None,
            last_target: None,
            trap: None,
            subscriptions: Subscriptions::new(),
            resize: None,
            poller: None,
            reducer: None,
        })
    }

    /// Replaces the default closest-to-center reduction for every step.
    #[must_use]
    pub fn with_reducer(mut self, reducer: impl CandidateReducer + 'static) -> Self {
        self.reducer = Some(Box::new(reducer));
        self
    }

    /// Returns `true` between [`open`](Self::open) and [`close`](Self::close).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the current step.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.index
    }

    /// The current step.
    #[must_use]
    pub fn step(&self) -> &Step {
        &self.steps[self.index]
    }

    /// All steps.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Effective options of the current step.
    #[must_use]
    pub fn options(&self) -> &ResolvedOptions {
        &self.resolved[self.index]
    }

    /// Latest placement of the current step.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Focus trap of the current step, if installed.
    #[must_use]
    pub fn focus_trap(&self) -> Option<&FocusTrap<K, L>> {
        self.trap.as_ref()
    }

    /// Timers of the current step.
    #[must_use]
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// When the host should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.subscriptions.next_deadline()
    }

    /// Opens the tour at its initial step. Ignored if already open.
    pub fn open<H>(&mut self, host: &mut H, now: u64) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if self.open {
            return None;
        }
        self.open = true;
        Some(self.enter_step(host, self.initial_step, now))
    }

    /// Moves to step `index`.
    ///
    /// Ignored while closed, for indices outside the step list, and for the
    /// current step (use [`reposition`](Self::reposition) to refresh it).
    pub fn go_to_step<H>(&mut self, host: &mut H, index: usize, now: u64) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if !self.open || index >= self.steps.len() || index == self.index {
            return None;
        }
        Some(self.enter_step(host, index, now))
    }

    /// Moves to the following step, if any.
    pub fn next<H>(&mut self, host: &mut H, now: u64) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        self.go_to_step(host, self.index + 1, now)
    }

    /// Moves to the preceding step, if any.
    pub fn prev<H>(&mut self, host: &mut H, now: u64) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        let index = self.index.checked_sub(1)?;
        self.go_to_step(host, index, now)
    }

    /// Closes the tour.
    ///
    /// The focus trap and every pending timer are gone when this returns.
    /// Closing a closed tour is a no-op.
    pub fn close<H>(&mut self, host: &mut H) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if !self.open {
            return None;
        }
        self.exit_step(host);
        self.open = false;
        self.index = self.initial_step;
        self.placement = None;
        self.last_target = None;

        #[cfg(feature = "tracing")]
        tracing::debug!("tour closed");

        Some(TourEvent::Closed)
    }

    /// Measures and places the current step again.
    pub fn reposition<H>(&mut self, host: &mut H, now: u64) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if !self.open {
            return None;
        }
        match self.enter_step(host, self.index, now) {
            TourEvent::StepEntered { placement, .. } => Some(TourEvent::Repositioned { placement }),
            other => Some(other),
        }
    }

    /// Records a viewport resize. Repositioning happens on a later
    /// [`tick`](Self::tick), once resizes have been quiet for the debounce window.
    pub fn on_resize(&mut self, now: u64) {
        if let Some(handle) = self.resize {
            self.subscriptions.trigger(handle, now);
        }
    }

    /// Runs due timers: the resize debounce and the moving-target poll.
    pub fn tick<H>(&mut self, host: &mut H, now: u64) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if !self.open {
            return None;
        }
        let mut refresh = false;
        for handle in self.subscriptions.poll(now) {
            if Some(handle) == self.resize {
                refresh = true;
            } else if Some(handle) == self.poller {
                let geometry = host.measure(&self.steps[self.index]);
                refresh |= should_update(
                    geometry.container.as_ref(),
                    geometry.target,
                    self.last_target,
                    self.resolved[self.index].render_tolerance,
                );
            }
        }
        if refresh {
            self.reposition(host, now)
        } else {
            None
        }
    }

    /// Handles a key press in `region` while `focused` has focus.
    ///
    /// Tab goes through the focus trap; a redirect is applied with
    /// [`TourHost::focus`]. Escape and the arrow keys on the tooltip close
    /// the tour or change step unless disabled for the current step, and
    /// their default action is suppressed either way.
    pub fn on_key_down<H>(
        &mut self,
        host: &mut H,
        region: Region,
        focused: K,
        key: Key,
        modifiers: Modifiers,
        now: u64,
    ) -> KeyResponse
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if !self.open {
            return KeyResponse::default();
        }
        match key {
            Key::Tab => {
                let Some(trap) = self.trap.as_mut() else {
                    return KeyResponse::default();
                };
                match trap.on_key_down(region, focused, key, modifiers) {
                    KeyOutcome::Redirect(next) => {
                        host.focus(next);
                        KeyResponse {
                            prevent_default: true,
                            event: None,
                        }
                    }
                    KeyOutcome::Native | KeyOutcome::Ignored => KeyResponse::default(),
                }
            }
            Key::Escape | Key::ArrowLeft | Key::ArrowRight if region == Region::Tooltip => {
                let ResolvedOptions {
                    disable_close,
                    disable_next,
                    disable_prev,
                    ..
                } = self.resolved[self.index];
                let event = match key {
                    Key::Escape if !disable_close => self.close(host),
                    Key::ArrowRight if !disable_next => self.next(host, now),
                    Key::ArrowLeft if !disable_prev => self.prev(host, now),
                    _ => None,
                };
                KeyResponse {
                    prevent_default: true,
                    event,
                }
            }
            _ => KeyResponse::default(),
        }
    }

    /// Handles a key release.
    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) {
        if let Some(trap) = self.trap.as_mut() {
            trap.on_key_up(key, modifiers);
        }
    }

    /// Handles focus leaving an element of the target region.
    ///
    /// Returns `true` if focus was redirected into the tooltip.
    pub fn on_focus_out<H>(&mut self, host: &mut H, next: Option<K>, next_within_target: bool) -> bool
    where
        H: TourHost<Element = K, Listener = L>,
    {
        let Some(trap) = self.trap.as_mut() else {
            return false;
        };
        match trap.on_focus_out(next, next_within_target) {
            FocusOutOutcome::Redirect(element) => {
                host.focus(element);
                true
            }
            FocusOutOutcome::Ignored => false,
        }
    }

    /// Handles a click on the mask: closes the tour unless disabled.
    pub fn on_mask_click<H>(&mut self, host: &mut H) -> Option<TourEvent>
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if !self.open || self.resolved[self.index].disable_close_on_click {
            return None;
        }
        self.close(host)
    }

    fn exit_step<H>(&mut self, host: &mut H)
    where
        H: TourHost<Element = K, Listener = L>,
    {
        if let Some(mut trap) = self.trap.take() {
            trap.teardown(host);
        }
        self.subscriptions.clear();
        self.resize = None;
        self.poller = None;
    }

    fn enter_step<H>(&mut self, host: &mut H, index: usize, now: u64) -> TourEvent
    where
        H: TourHost<Element = K, Listener = L>,
    {
        self.exit_step(host);
        self.index = index;

        let step = &self.steps[index];
        let options = &self.resolved[index];
        let geometry = host.measure(step);
        let target = geometry.target.filter(|t| is_valid_rect(t.0));

        let placement = place(&PlacementRequest {
            target,
            tooltip: geometry.tooltip,
            container: geometry.container.as_ref(),
            options: &options.placement,
            reducer: self.reducer.as_deref(),
        });
        self.placement = placement;
        self.last_target = geometry
            .container
            .as_ref()
            .zip(target)
            .map(|(c, t)| target_position(c, t));

        // Reposition on resize even if this attempt failed; the tooltip or
        // container may show up later.
        self.resize = Some(self.subscriptions.watch(
            Watch::Debounce {
                delay: options.resize_debounce_ms,
            },
            now,
        ));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            index,
            placed = placement.is_some(),
            has_target = target.is_some(),
            "entered step"
        );

        let Some(placed) = placement else {
            return TourEvent::StepEntered { index, placement };
        };

        let target_focusables: &[K] = if target.is_some() {
            &geometry.target_focusables
        } else {
            &[]
        };
        self.trap = Some(FocusTrap::install(
            host,
            &geometry.tooltip_focusables,
            target_focusables,
            options.trap,
        ));
        host.focus_tooltip();

        if let Some(destination) = placed.scroll_to {
            #[cfg(feature = "tracing")]
            tracing::debug!(x = destination.0.x, y = destination.0.y, "scroll requested");
            host.scroll_to(destination);
        }

        if options.moving_target && (target.is_some() || !step.selector.is_empty()) {
            self.poller = Some(self.subscriptions.watch(
                Watch::Interval {
                    period: options.update_interval_ms,
                },
                now,
            ));
        }

        TourEvent::StepEntered { index, placement }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StepOverrides;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use kurbo::Vec2;
    use wayfinder_focus_trap::ListenerKind;
    use wayfinder_placement::{Orientation, PageMetrics};

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Focus {
        Tooltip,
        Element(u32),
    }

    struct MockHost {
        container: Option<Container>,
        tooltip: Option<Size>,
        targets: BTreeMap<String, ViewportRect>,
        next_listener: u32,
        listeners: Vec<(u32, Region, ListenerKind)>,
        scrolls: Vec<ContentPoint>,
        focus: Vec<Focus>,
        measures: usize,
    }

    impl MockHost {
        fn new(viewport: f64) -> Self {
            let mut targets = BTreeMap::new();
            targets.insert(
                String::from("#a"),
                ViewportRect::from_origin_size((0.0, 0.0), (50.0, 50.0)),
            );
            targets.insert(
                String::from("#b"),
                ViewportRect::from_origin_size((500.0, 500.0), (50.0, 50.0)),
            );
            Self {
                container: Some(Container::page(
                    PageMetrics::uniform(Size::new(viewport, viewport)),
                    Size::new(2000.0, 2000.0),
                    Vec2::ZERO,
                )),
                tooltip: Some(Size::new(100.0, 40.0)),
                targets,
                next_listener: 0,
                listeners: Vec::new(),
                scrolls: Vec::new(),
                focus: Vec::new(),
                measures: 0,
            }
        }
    }

    impl ListenerHost for MockHost {
        type Listener = u32;

        fn add_listener(&mut self, region: Region, kind: ListenerKind) -> u32 {
            self.next_listener += 1;
            self.listeners.push((self.next_listener, region, kind));
            self.next_listener
        }

        fn remove_listener(&mut self, listener: u32) {
            self.listeners.retain(|(id, ..)| *id != listener);
        }
    }

    impl TourHost for MockHost {
        type Element = u32;

        fn measure(&mut self, step: &Step) -> StepGeometry<u32> {
            self.measures += 1;
            StepGeometry {
                container: self.container,
                target: self.targets.get(&step.selector).copied(),
                tooltip: self.tooltip,
                tooltip_focusables: vec![1, 2],
                target_focusables: vec![3, 4],
            }
        }

        fn scroll_to(&mut self, destination: ContentPoint) {
            self.scrolls.push(destination);
        }

        fn focus_tooltip(&mut self) {
            self.focus.push(Focus::Tooltip);
        }

        fn focus(&mut self, element: u32) {
            self.focus.push(Focus::Element(element));
        }
    }

    fn steps() -> Vec<Step> {
        vec![
            Step::new("#a", "first"),
            Step::new("#b", "second"),
            Step::new("", "no target"),
        ]
    }

    fn session(options: TourOptions) -> TourSession<u32, u32> {
        TourSession::new(steps(), options).unwrap()
    }

    #[test]
    fn open_places_focuses_and_traps() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions::default());
        assert!(!tour.is_open());

        let event = tour.open(&mut host, 0).unwrap();
        let TourEvent::StepEntered { index, placement } = event else {
            panic!("expected a step entry, got {event:?}");
        };
        assert_eq!(index, 0);
        let placement = placement.unwrap();
        assert_eq!(placement.orientation, Some(Orientation::EastSouth));
        assert_eq!(host.focus, vec![Focus::Tooltip]);
        assert_eq!(host.listeners.len(), 5);
        assert!(host.scrolls.is_empty());
        // Only the resize debounce.
        assert_eq!(tour.subscriptions().len(), 1);

        assert_eq!(tour.open(&mut host, 0), None);
    }

    #[test]
    fn step_changes_never_leak_listeners_or_timers() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions {
            moving_target: true,
            ..TourOptions::default()
        });
        tour.open(&mut host, 0);
        assert_eq!(tour.subscriptions().len(), 2);

        tour.next(&mut host, 10);
        assert_eq!(tour.current_step(), 1);
        assert_eq!(host.listeners.len(), 5);
        assert_eq!(tour.subscriptions().len(), 2);

        // Target-less step: the target has no listeners and nothing to poll.
        tour.next(&mut host, 20);
        assert_eq!(host.listeners.len(), 2);
        assert!(host.listeners.iter().all(|(_, r, _)| *r == Region::Tooltip));
        assert_eq!(tour.subscriptions().len(), 1);
    }

    #[test]
    fn navigation_is_bounded() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions::default());
        // Closed: nothing moves.
        assert_eq!(tour.next(&mut host, 0), None);

        tour.open(&mut host, 0);
        assert_eq!(tour.prev(&mut host, 0), None);
        assert_eq!(tour.go_to_step(&mut host, 3, 0), None);
        assert_eq!(tour.go_to_step(&mut host, 0, 0), None);
        assert!(tour.go_to_step(&mut host, 2, 0).is_some());
        assert_eq!(tour.next(&mut host, 0), None);
        assert_eq!(tour.current_step(), 2);
        assert!(tour.prev(&mut host, 0).is_some());
        assert_eq!(tour.current_step(), 1);
    }

    #[test]
    fn close_tears_everything_down_synchronously() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions {
            moving_target: true,
            initial_step: 1,
            ..TourOptions::default()
        });
        tour.open(&mut host, 0);
        tour.on_resize(5);

        assert_eq!(tour.close(&mut host), Some(TourEvent::Closed));
        assert!(host.listeners.is_empty());
        assert!(tour.subscriptions().is_empty());
        assert!(tour.focus_trap().is_none());
        assert_eq!(tour.current_step(), 1);
        assert_eq!(tour.placement(), None);

        let measures = host.measures;
        assert_eq!(tour.tick(&mut host, 10_000), None);
        assert_eq!(host.measures, measures);
        assert_eq!(tour.close(&mut host), None);
    }

    #[test]
    fn keyboard_shortcuts_respect_disable_flags() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions::default());
        tour.open(&mut host, 0);

        let r = tour.on_key_down(&mut host, Region::Tooltip, 1, Key::ArrowRight, Modifiers::empty(), 0);
        assert!(r.prevent_default);
        assert!(matches!(r.event, Some(TourEvent::StepEntered { index: 1, .. })));

        let r = tour.on_key_down(&mut host, Region::Tooltip, 1, Key::ArrowLeft, Modifiers::empty(), 0);
        assert!(matches!(r.event, Some(TourEvent::StepEntered { index: 0, .. })));

        // Arrow keys from the target are the page's business.
        let r = tour.on_key_down(&mut host, Region::Target, 3, Key::ArrowRight, Modifiers::empty(), 0);
        assert_eq!(r, KeyResponse::default());

        let r = tour.on_key_down(&mut host, Region::Tooltip, 1, Key::Escape, Modifiers::empty(), 0);
        assert_eq!(r.event, Some(TourEvent::Closed));
        assert!(!tour.is_open());

        let mut tour = session(TourOptions {
            disable_next: true,
            disable_close: true,
            ..TourOptions::default()
        });
        tour.open(&mut host, 0);
        let r = tour.on_key_down(&mut host, Region::Tooltip, 1, Key::ArrowRight, Modifiers::empty(), 0);
        assert_eq!(
            r,
            KeyResponse {
                prevent_default: true,
                event: None
            }
        );
        let r = tour.on_key_down(&mut host, Region::Tooltip, 1, Key::Escape, Modifiers::empty(), 0);
        assert_eq!(r.event, None);
        assert!(tour.is_open());
    }

    #[test]
    fn tab_redirects_are_applied_through_the_host() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions::default());
        tour.open(&mut host, 0);

        let r = tour.on_key_down(&mut host, Region::Tooltip, 2, Key::Tab, Modifiers::empty(), 0);
        assert!(r.prevent_default);
        assert_eq!(host.focus.last(), Some(&Focus::Element(3)));

        let r = tour.on_key_down(&mut host, Region::Tooltip, 1, Key::Tab, Modifiers::empty(), 0);
        assert!(!r.prevent_default);

        // Shift held, focus escapes the target to an unknown element.
        let _ = tour.on_key_down(&mut host, Region::Target, 4, Key::Tab, Modifiers::SHIFT, 0);
        assert!(tour.on_focus_out(&mut host, Some(77), false));
        assert_eq!(host.focus.last(), Some(&Focus::Element(2)));
        tour.on_key_up(Key::Tab, Modifiers::SHIFT);
        assert!(!tour.on_focus_out(&mut host, Some(77), false));
    }

    #[test]
    fn resize_bursts_reposition_once() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions::default());
        tour.open(&mut host, 0);
        let measures = host.measures;

        tour.on_resize(100);
        tour.on_resize(105);
        assert_eq!(tour.tick(&mut host, 110), None);
        assert_eq!(tour.next_deadline(), Some(121));
        assert!(matches!(
            tour.tick(&mut host, 121),
            Some(TourEvent::Repositioned { placement: Some(_) })
        ));
        assert_eq!(host.measures, measures + 1);
        assert_eq!(tour.tick(&mut host, 500), None);
    }

    #[test]
    fn moving_target_is_followed_beyond_tolerance() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions {
            moving_target: true,
            ..TourOptions::default()
        });
        tour.open(&mut host, 0);

        // Still in place.
        assert_eq!(tour.tick(&mut host, 500), None);

        host.targets.insert(
            String::from("#a"),
            ViewportRect::from_origin_size((1.0, 1.0), (50.0, 50.0)),
        );
        assert_eq!(tour.tick(&mut host, 1_000), None);

        host.targets.insert(
            String::from("#a"),
            ViewportRect::from_origin_size((10.0, 0.0), (50.0, 50.0)),
        );
        let Some(TourEvent::Repositioned { placement: Some(p) }) = tour.tick(&mut host, 1_500)
        else {
            panic!("moved target should reposition");
        };
        assert_eq!(p.position, ContentPoint::new(75.0, 15.0));

        // Re-entering re-arms the poll one period after the refresh.
        assert_eq!(tour.next_deadline(), Some(2_000));
        assert_eq!(tour.subscriptions().len(), 2);
    }

    #[test]
    fn stale_poll_never_fires_after_a_step_change() {
        let mut host = MockHost::new(2000.0);
        let mut steps = steps();
        steps[0] = Step::new("#a", "moving").with_overrides(StepOverrides {
            moving_target: Some(true),
            ..StepOverrides::default()
        });
        let mut moving: TourSession<u32, u32> =
            TourSession::new(steps, TourOptions::default()).unwrap();
        moving.open(&mut host, 0);
        assert_eq!(moving.subscriptions().len(), 2);
        moving.next(&mut host, 100);
        assert_eq!(moving.subscriptions().len(), 1);

        host.targets.clear();
        let measures = host.measures;
        assert_eq!(moving.tick(&mut host, 600), None);
        assert_eq!(host.measures, measures);
    }

    #[test]
    fn auto_scroll_can_be_disabled() {
        let mut host = MockHost::new(60.0);
        let mut tour = session(TourOptions::default());
        tour.open(&mut host, 0);
        assert_eq!(host.scrolls, vec![ContentPoint::new(52.5, 0.0)]);

        let mut host = MockHost::new(60.0);
        let mut tour = session(TourOptions {
            disable_auto_scroll: true,
            ..TourOptions::default()
        });
        tour.open(&mut host, 0);
        assert!(host.scrolls.is_empty());
        assert!(tour.placement().is_some());
    }

    #[test]
    fn missing_tooltip_skips_focus_and_trap() {
        let mut host = MockHost::new(2000.0);
        host.tooltip = None;
        let mut tour = session(TourOptions::default());
        assert_eq!(
            tour.open(&mut host, 0),
            Some(TourEvent::StepEntered {
                index: 0,
                placement: None
            })
        );
        assert!(host.focus.is_empty());
        assert!(host.listeners.is_empty());

        // A later resize recovers once the tooltip is mounted.
        host.tooltip = Some(Size::new(100.0, 40.0));
        tour.on_resize(10);
        assert!(matches!(
            tour.tick(&mut host, 26),
            Some(TourEvent::Repositioned { placement: Some(_) })
        ));
        assert_eq!(host.listeners.len(), 5);
    }

    #[test]
    fn mask_click_closes_unless_disabled() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions {
            disable_close_on_click: true,
            ..TourOptions::default()
        });
        tour.open(&mut host, 0);
        assert_eq!(tour.on_mask_click(&mut host), None);

        let mut tour = session(TourOptions::default());
        tour.open(&mut host, 0);
        assert_eq!(tour.on_mask_click(&mut host), Some(TourEvent::Closed));
    }

    #[test]
    fn custom_reducer_applies_to_every_step() {
        let mut host = MockHost::new(2000.0);
        let mut tour = session(TourOptions::default()).with_reducer(
            |_: &[wayfinder_placement::Candidate]| Some(ContentPoint::new(7.0, 7.0)),
        );
        tour.open(&mut host, 0);
        let placement = tour.placement().unwrap();
        assert_eq!(placement.position, ContentPoint::new(7.0, 7.0));
        assert_eq!(placement.orientation, None);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let err = TourSession::<u32, u32>::new(Vec::new(), TourOptions::default()).unwrap_err();
        assert_eq!(err, OptionsError::EmptySteps);
    }
}
