// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Focus Trap: keep keyboard focus cycling inside a tour step.
//!
//! A tour step exposes two disjoint interactive regions: the tooltip and,
//! optionally, the highlighted target itself. [`FocusTrap`] keeps Tab and
//! Shift+Tab cycling across both:
//!
//! - Tab on the tooltip's last focusable moves to the target's first (or wraps
//!   to the tooltip's first when the target does not participate).
//! - Shift+Tab on the tooltip's first focusable moves to the target's last (or
//!   wraps to the tooltip's last).
//! - Tabbing off either end of the target returns into the tooltip.
//! - Focus leaving the target subtree for something unknown while Tab is held
//!   is pulled back into the tooltip, in the direction of the held Shift state.
//!
//! The trap never touches the host directly except through [`ListenerHost`],
//! which installs and removes the key and focus-out listeners. Event routing
//! stays with the host: it forwards key and focus events to
//! [`FocusTrap::on_key_down`], [`FocusTrap::on_key_up`], and
//! [`FocusTrap::on_focus_out`], and applies the returned redirect.
//!
//! ## Minimal example
//!
//! ```rust
//! use wayfinder_focus_trap::{
//!     FocusTrap, Key, KeyOutcome, ListenerHost, ListenerKind, Modifiers, Region, TrapOptions,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     next: u32,
//!     live: Vec<u32>,
//! }
//!
//! impl ListenerHost for Host {
//!     type Listener = u32;
//!     fn add_listener(&mut self, _region: Region, _kind: ListenerKind) -> u32 {
//!         self.next += 1;
//!         self.live.push(self.next);
//!         self.next
//!     }
//!     fn remove_listener(&mut self, listener: u32) {
//!         self.live.retain(|l| *l != listener);
//!     }
//! }
//!
//! let mut host = Host::default();
//! // Tooltip focusables 1, 2; target focusables 3, 4.
//! let mut trap = FocusTrap::install(&mut host, &[1, 2], &[3, 4], TrapOptions::default());
//!
//! // Tab off the tooltip's last focusable lands on the target's first.
//! assert_eq!(
//!     trap.on_key_down(Region::Tooltip, 2, Key::Tab, Modifiers::empty()),
//!     KeyOutcome::Redirect(3)
//! );
//!
//! trap.teardown(&mut host);
//! assert!(host.live.is_empty());
//! // A second teardown is a no-op.
//! trap.teardown(&mut host);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emits `tracing` events for install, teardown, and redirects.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use smallvec::SmallVec;

/// Direction of focus traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Forward order (Tab).
    Next,
    /// Backward order (Shift+Tab).
    Prev,
}

bitflags::bitflags! {
    /// Keyboard modifier state accompanying a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Windows.
        const META    = 0b0000_1000;
    }
}

/// Keys the tour reacts to. Everything else is [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any other key.
    Other,
}

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The tooltip container.
    Tooltip,
    /// The highlighted target element.
    Target,
}

/// Kind of event a listener receives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Focus left an element of the region.
    FocusOut,
}

/// Host-side listener registration.
///
/// Every listener returned by [`add_listener`](Self::add_listener) is passed
/// back to [`remove_listener`](Self::remove_listener) exactly once.
pub trait ListenerHost {
    /// Handle identifying an installed listener.
    type Listener;

    /// Installs a listener of `kind` on `region`.
    fn add_listener(&mut self, region: Region, kind: ListenerKind) -> Self::Listener;

    /// Removes a listener previously returned by [`add_listener`](Self::add_listener).
    fn remove_listener(&mut self, listener: Self::Listener);
}

/// Focus trap configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrapOptions {
    /// The target cannot be interacted with, so it never joins the cycle.
    pub disable_mask_interaction: bool,
}

/// What the host should do with a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome<K> {
    /// Prevent the default action and focus this element instead.
    Redirect(K),
    /// Let the platform handle the key (native focus order).
    Native,
    /// Not a key the trap handles.
    Ignored,
}

/// What the host should do when focus leaves the target region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusOutOutcome<K> {
    /// Focus this element instead.
    Redirect(K),
    /// Leave focus where it went.
    Ignored,
}

/// Listener handles installed by one trap: at most key down, key up, and
/// focus out on two regions.
type Listeners<L> = SmallVec<[L; 5]>;

/// A two-region cyclic focus trap.
///
/// `K` identifies focusable elements; `L` is the host's listener handle.
/// A trap is installed on step entry and torn down on step exit or close.
#[derive(Debug)]
pub struct FocusTrap<K, L> {
    tooltip: Vec<K>,
    target: Vec<K>,
    listeners: Listeners<L>,
    /// `Some(shift)` while Tab is held down.
    tab_held: Option<bool>,
}

impl<K, L> FocusTrap<K, L>
where
    K: Copy + Eq,
{
    /// Installs a trap over `tooltip_focusables` and `target_focusables`, both
    /// in native tab order.
    ///
    /// The target participates only if it has focusables and mask interaction
    /// is enabled; otherwise no listeners are placed on it.
    pub fn install<H>(
        host: &mut H,
        tooltip_focusables: &[K],
        target_focusables: &[K],
        options: TrapOptions,
    ) -> Self
    where
        H: ListenerHost<Listener = L>,
    {
        let target: Vec<K> = if options.disable_mask_interaction {
            Vec::new()
        } else {
            target_focusables.to_vec()
        };

        let mut listeners = Listeners::new();
        listeners.push(host.add_listener(Region::Tooltip, ListenerKind::KeyDown));
        listeners.push(host.add_listener(Region::Tooltip, ListenerKind::KeyUp));
        if !target.is_empty() {
            listeners.push(host.add_listener(Region::Target, ListenerKind::KeyDown));
            listeners.push(host.add_listener(Region::Target, ListenerKind::KeyUp));
            listeners.push(host.add_listener(Region::Target, ListenerKind::FocusOut));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            tooltip = tooltip_focusables.len(),
            target = target.len(),
            listeners = listeners.len(),
            "focus trap installed"
        );

        Self {
            tooltip: tooltip_focusables.to_vec(),
            target,
            listeners,
            tab_held: None,
        }
    }

    /// Returns `true` until [`teardown`](Self::teardown) runs.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Returns `true` if the target region is part of the cycle.
    #[must_use]
    pub fn target_participates(&self) -> bool {
        !self.target.is_empty()
    }

    /// First and last tooltip focusables.
    #[must_use]
    pub fn tooltip_bounds(&self) -> Option<(K, K)> {
        bounds(&self.tooltip)
    }

    /// First and last target focusables, if the target participates.
    #[must_use]
    pub fn target_bounds(&self) -> Option<(K, K)> {
        bounds(&self.target)
    }

    /// Handles a key press inside `region` while `focused` has focus.
    ///
    /// Tab and Shift+Tab on a region boundary are redirected; any other Tab is
    /// left to native focus order. Other keys are ignored.
    pub fn on_key_down(
        &mut self,
        region: Region,
        focused: K,
        key: Key,
        modifiers: Modifiers,
    ) -> KeyOutcome<K> {
        if key != Key::Tab || !self.is_installed() {
            return KeyOutcome::Ignored;
        }
        let shift = modifiers.contains(Modifiers::SHIFT);
        self.tab_held = Some(shift);

        let Some((tooltip_first, tooltip_last)) = self.tooltip_bounds() else {
            return KeyOutcome::Native;
        };
        let target = self.target_bounds();

        let redirect = match (region, shift) {
            (Region::Tooltip, false) if focused == tooltip_last => {
                Some(target.map_or(tooltip_first, |(first, _)| first))
            }
            (Region::Tooltip, true) if focused == tooltip_first => {
                Some(target.map_or(tooltip_last, |(_, last)| last))
            }
            (Region::Target, false) if target.is_some_and(|(_, last)| focused == last) => {
                Some(tooltip_first)
            }
            (Region::Target, true) if target.is_some_and(|(first, _)| focused == first) => {
                Some(tooltip_last)
            }
            _ => None,
        };

        match redirect {
            Some(next) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?region, shift, "focus trap redirect");
                KeyOutcome::Redirect(next)
            }
            None => KeyOutcome::Native,
        }
    }

    /// Handles a key release. Releasing Tab clears the held state.
    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) {
        if key == Key::Tab {
            self.tab_held = None;
        }
    }

    /// Handles focus leaving an element of the target region.
    ///
    /// `next` is the element receiving focus, if known, and
    /// `next_within_target` tells whether it lies inside the target subtree.
    /// While Tab is held, focus escaping the target to anything that is not a
    /// known tooltip focusable returns to the tooltip: its last focusable for
    /// Shift+Tab, its first otherwise.
    pub fn on_focus_out(&mut self, next: Option<K>, next_within_target: bool) -> FocusOutOutcome<K> {
        let Some(shift) = self.tab_held else {
            return FocusOutOutcome::Ignored;
        };
        if !self.target_participates() || next_within_target {
            return FocusOutOutcome::Ignored;
        }
        if next.is_some_and(|n| self.tooltip.contains(&n)) {
            return FocusOutOutcome::Ignored;
        }
        match self.tooltip_bounds() {
            Some((first, last)) => FocusOutOutcome::Redirect(if shift { last } else { first }),
            None => FocusOutOutcome::Ignored,
        }
    }

    /// The element Tab (`Next`) or Shift+Tab (`Prev`) leads to from `current`.
    ///
    /// This is the complete cycle: tooltip focusables, then target focusables,
    /// then back to the start. An unknown `current` enters the cycle at its
    /// first (`Next`) or last (`Prev`) element.
    #[must_use]
    pub fn resolve(&self, current: K, navigation: Navigation) -> Option<K> {
        let len = self.tooltip.len() + self.target.len();
        if len == 0 {
            return None;
        }
        let at = |i: usize| {
            if i < self.tooltip.len() {
                self.tooltip[i]
            } else {
                self.target[i - self.tooltip.len()]
            }
        };
        let pos = self
            .tooltip
            .iter()
            .chain(self.target.iter())
            .position(|k| *k == current);
        Some(match (navigation, pos) {
            (Navigation::Next, Some(p)) => at((p + 1) % len),
            (Navigation::Prev, Some(p)) => at((p + len - 1) % len),
            (Navigation::Next, None) => at(0),
            (Navigation::Prev, None) => at(len - 1),
        })
    }

    /// Removes every listener this trap installed.
    ///
    /// Calling it again is a no-op.
    pub fn teardown<H>(&mut self, host: &mut H)
    where
        H: ListenerHost<Listener = L>,
    {
        if self.listeners.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(listeners = self.listeners.len(), "focus trap torn down");
        for listener in self.listeners.drain(..) {
            host.remove_listener(listener);
        }
        self.tab_held = None;
    }
}

fn bounds<K: Copy>(items: &[K]) -> Option<(K, K)> {
    Some((*items.first()?, *items.last()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Default)]
    struct MockHost {
        next: u32,
        live: Vec<(u32, Region, ListenerKind)>,
    }

    impl ListenerHost for MockHost {
        type Listener = u32;

        fn add_listener(&mut self, region: Region, kind: ListenerKind) -> u32 {
            self.next += 1;
            self.live.push((self.next, region, kind));
            self.next
        }

        fn remove_listener(&mut self, listener: u32) {
            let before = self.live.len();
            self.live.retain(|(id, ..)| *id != listener);
            assert_eq!(before - 1, self.live.len(), "listener {listener} removed twice");
        }
    }

    const A: u32 = 1;
    const B: u32 = 2;
    const C: u32 = 3;
    const D: u32 = 4;

    fn installed(host: &mut MockHost, options: TrapOptions) -> FocusTrap<u32, u32> {
        FocusTrap::install(host, &[A, B], &[C, D], options)
    }

    /// Simulates Tab from `focused`: redirect if the trap says so, else native order.
    fn tab(trap: &mut FocusTrap<u32, u32>, focused: u32, shift: bool) -> u32 {
        let region = if [A, B].contains(&focused) {
            Region::Tooltip
        } else {
            Region::Target
        };
        let mods = if shift { Modifiers::SHIFT } else { Modifiers::empty() };
        let out = trap.on_key_down(region, focused, Key::Tab, mods);
        trap.on_key_up(Key::Tab, mods);
        match out {
            KeyOutcome::Redirect(k) => k,
            KeyOutcome::Native => {
                let nav = if shift { Navigation::Prev } else { Navigation::Next };
                trap.resolve(focused, nav).unwrap()
            }
            KeyOutcome::Ignored => panic!("tab was ignored"),
        }
    }

    #[test]
    fn tab_cycles_through_both_regions() {
        let mut host = MockHost::default();
        let mut trap = installed(&mut host, TrapOptions::default());

        let mut seen = vec![A];
        let mut focused = A;
        for _ in 0..4 {
            focused = tab(&mut trap, focused, false);
            seen.push(focused);
        }
        assert_eq!(seen, vec![A, B, C, D, A]);
    }

    #[test]
    fn shift_tab_from_first_goes_to_target_last() {
        let mut host = MockHost::default();
        let mut trap = installed(&mut host, TrapOptions::default());
        assert_eq!(
            trap.on_key_down(Region::Tooltip, A, Key::Tab, Modifiers::SHIFT),
            KeyOutcome::Redirect(D)
        );
        assert_eq!(
            trap.on_key_down(Region::Target, C, Key::Tab, Modifiers::SHIFT),
            KeyOutcome::Redirect(B)
        );
        assert_eq!(
            trap.on_key_down(Region::Target, D, Key::Tab, Modifiers::empty()),
            KeyOutcome::Redirect(A)
        );
        // Not on a boundary.
        assert_eq!(
            trap.on_key_down(Region::Tooltip, A, Key::Tab, Modifiers::empty()),
            KeyOutcome::Native
        );
        assert_eq!(
            trap.on_key_down(Region::Tooltip, A, Key::Escape, Modifiers::empty()),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn disabled_mask_interaction_wraps_within_tooltip() {
        let mut host = MockHost::default();
        let mut trap = installed(
            &mut host,
            TrapOptions {
                disable_mask_interaction: true,
            },
        );
        assert!(!trap.target_participates());
        assert_eq!(host.live.len(), 2);
        assert!(host.live.iter().all(|(_, region, _)| *region == Region::Tooltip));

        assert_eq!(
            trap.on_key_down(Region::Tooltip, B, Key::Tab, Modifiers::empty()),
            KeyOutcome::Redirect(A)
        );
        assert_eq!(
            trap.on_key_down(Region::Tooltip, A, Key::Tab, Modifiers::SHIFT),
            KeyOutcome::Redirect(B)
        );
    }

    #[test]
    fn target_without_focusables_does_not_participate() {
        let mut host = MockHost::default();
        let trap: FocusTrap<u32, u32> =
            FocusTrap::install(&mut host, &[A], &[], TrapOptions::default());
        assert_eq!(trap.target_bounds(), None);
        assert_eq!(trap.tooltip_bounds(), Some((A, A)));
        assert_eq!(trap.resolve(A, Navigation::Next), Some(A));
        assert_eq!(host.live.len(), 2);
    }

    #[test]
    fn focus_escaping_target_while_tab_held_returns_to_tooltip() {
        let mut host = MockHost::default();
        let mut trap = installed(&mut host, TrapOptions::default());
        const UNKNOWN: u32 = 99;

        // No Tab held: ordinary focus changes are left alone.
        assert_eq!(trap.on_focus_out(Some(UNKNOWN), false), FocusOutOutcome::Ignored);

        let _ = trap.on_key_down(Region::Target, C, Key::Tab, Modifiers::empty());
        assert_eq!(trap.on_focus_out(Some(UNKNOWN), true), FocusOutOutcome::Ignored);
        assert_eq!(trap.on_focus_out(Some(UNKNOWN), false), FocusOutOutcome::Redirect(A));
        assert_eq!(trap.on_focus_out(None, false), FocusOutOutcome::Redirect(A));
        // Landing on a tooltip focusable needs no correction.
        assert_eq!(trap.on_focus_out(Some(B), false), FocusOutOutcome::Ignored);
        trap.on_key_up(Key::Tab, Modifiers::empty());

        let _ = trap.on_key_down(Region::Target, D, Key::Tab, Modifiers::SHIFT);
        assert_eq!(trap.on_focus_out(Some(UNKNOWN), false), FocusOutOutcome::Redirect(B));
        trap.on_key_up(Key::Tab, Modifiers::SHIFT);
        assert_eq!(trap.on_focus_out(Some(UNKNOWN), false), FocusOutOutcome::Ignored);
    }

    #[test]
    fn teardown_removes_every_listener_once() {
        let mut host = MockHost::default();
        let mut trap = installed(&mut host, TrapOptions::default());
        assert_eq!(host.live.len(), 5);
        assert!(trap.is_installed());

        trap.teardown(&mut host);
        assert!(host.live.is_empty());
        assert!(!trap.is_installed());

        // Idempotent: MockHost would panic on a double removal.
        trap.teardown(&mut host);
        assert!(host.live.is_empty());
        assert_eq!(
            trap.on_key_down(Region::Tooltip, B, Key::Tab, Modifiers::empty()),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn resolve_enters_cycle_from_unknown_elements() {
        let mut host = MockHost::default();
        let trap = installed(&mut host, TrapOptions::default());
        assert_eq!(trap.resolve(42, Navigation::Next), Some(A));
        assert_eq!(trap.resolve(42, Navigation::Prev), Some(D));
        assert_eq!(trap.resolve(A, Navigation::Prev), Some(D));

        let mut host = MockHost::default();
        let empty: FocusTrap<u32, u32> =
            FocusTrap::install(&mut host, &[], &[], TrapOptions::default());
        assert_eq!(empty.resolve(A, Navigation::Next), None);
    }
}
