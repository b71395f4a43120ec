// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable timer subscriptions driven by host timestamps.
//!
//! The session has two timers: a resize debounce and an optional
//! moving-target poll. Both live in one [`Subscriptions`] registry so that a
//! single [`Subscriptions::clear`] cancels everything a step installed.
//!
//! Handles are generational: once disposed, a handle never fires again, even
//! if its slot is reused by a later subscription.
//!
//! ```rust
//! use wayfinder_session::{Subscriptions, Watch};
//!
//! let mut subs = Subscriptions::new();
//! let resize = subs.watch(Watch::Debounce { delay: 16 }, 0);
//!
//! // A burst of resize events collapses into one firing after the last.
//! subs.trigger(resize, 0);
//! subs.trigger(resize, 10);
//! assert!(subs.poll(20).is_empty());
//! assert_eq!(subs.poll(26).as_slice(), &[resize]);
//! assert!(subs.poll(100).is_empty());
//! ```

use alloc::vec::Vec;
use smallvec::SmallVec;

/// Identifier for a subscription (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionHandle(u32, u32);

impl SubscriptionHandle {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What a subscription waits for. Durations are in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Watch {
    /// Fires once, `delay` after the most recent [`Subscriptions::trigger`].
    Debounce {
        /// Quiet time required before firing.
        delay: u64,
    },
    /// Fires every `period` from registration until disposed.
    Interval {
        /// Time between firings.
        period: u64,
    },
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    watch: Watch,
    /// Next firing time; `None` for an unarmed debounce.
    due: Option<u64>,
}

/// Handles fired by one [`Subscriptions::poll`].
pub type Fired = SmallVec<[SubscriptionHandle; 2]>;

/// Registry of cancellable timers.
#[derive(Clone, Default)]
pub struct Subscriptions {
    /// slots
    slots: Vec<Option<Slot>>,
    /// last generation per slot (persists across disposal)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("live", &self.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Subscriptions {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscription at time `now`.
    ///
    /// Intervals are armed immediately; debounces wait for a trigger.
    pub fn watch(&mut self, watch: Watch, now: u64) -> SubscriptionHandle {
        let due = match watch {
            Watch::Debounce { .. } => None,
            Watch::Interval { period } => Some(now.saturating_add(period)),
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot {
                generation,
                watch,
                due,
            });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot {
                generation,
                watch,
                due,
            }));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "A session holds a handful of subscriptions."
        )]
        let handle = SubscriptionHandle(idx as u32, generation);

        #[cfg(feature = "tracing")]
        tracing::trace!(?handle, ?watch, now, "subscription registered");

        handle
    }

    /// Returns `true` if `handle` has not been disposed.
    #[must_use]
    pub fn is_alive(&self, handle: SubscriptionHandle) -> bool {
        self.slot(handle).is_some()
    }

    /// (Re-)arms a debounce so it fires `delay` after `now`.
    ///
    /// Returns `false` for stale handles and for intervals, which are not
    /// triggered.
    pub fn trigger(&mut self, handle: SubscriptionHandle, now: u64) -> bool {
        let Some(slot) = self.slot_mut(handle) else {
            return false;
        };
        match slot.watch {
            Watch::Debounce { delay } => {
                slot.due = Some(now.saturating_add(delay));
                true
            }
            Watch::Interval { .. } => false,
        }
    }

    /// Returns every subscription due at `now`, in registration slot order.
    ///
    /// A debounce fires once and disarms; an interval fires at most once per
    /// poll and re-arms one period after `now`.
    pub fn poll(&mut self, now: u64) -> Fired {
        let mut fired = Fired::new();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let Some(slot) = slot else { continue };
            if !slot.due.is_some_and(|due| due <= now) {
                continue;
            }
            slot.due = match slot.watch {
                Watch::Debounce { .. } => None,
                Watch::Interval { period } => Some(now.saturating_add(period)),
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Slot indices always fit; see `watch`."
            )]
            let handle = SubscriptionHandle(idx as u32, slot.generation);
            fired.push(handle);
        }

        #[cfg(feature = "tracing")]
        if !fired.is_empty() {
            tracing::trace!(now, fired = fired.len(), "subscriptions fired");
        }

        fired
    }

    /// Earliest pending firing time, for hosts that schedule a real timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.iter().flatten().filter_map(|s| s.due).min()
    }

    /// Cancels `handle`. Stale or repeated disposal is a no-op returning `false`.
    pub fn dispose(&mut self, handle: SubscriptionHandle) -> bool {
        if !self.is_alive(handle) {
            return false;
        }
        self.slots[handle.idx()] = None;
        self.free_list.push(handle.idx());

        #[cfg(feature = "tracing")]
        tracing::trace!(?handle, "subscription disposed");

        true
    }

    /// Cancels every live subscription.
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, handle: SubscriptionHandle) -> Option<&Slot> {
        self.slots
            .get(handle.idx())
            .and_then(Option::as_ref)
            .filter(|s| s.generation == handle.1)
    }

    fn slot_mut(&mut self, handle: SubscriptionHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.idx())
            .and_then(Option::as_mut)
            .filter(|s| s.generation == handle.1)
    }
}
