// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tour configuration: tour-level defaults, per-step overrides, and the
//! validated result of merging the two.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use wayfinder_focus_trap::TrapOptions;
use wayfinder_placement::{
    DEFAULT_PADDING, DEFAULT_SEPARATION, Orientation, PlacementOptions, PlacementOptionsError,
};

/// Default distance a moving target may drift before the tooltip follows.
pub const DEFAULT_RENDER_TOLERANCE: f64 = 2.0;

/// Default period of the moving-target poll, in milliseconds.
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 500;

/// Default quiet time after the last resize before repositioning, in milliseconds.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 16;

/// Tour-wide options. Every step inherits them unless it overrides a field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TourOptions {
    /// Space between the target and the mask cutout.
    pub mask_padding: f64,
    /// Gap between the mask cutout and the tooltip.
    pub tooltip_separation: f64,
    /// Orientation preferences, see [`PlacementOptions::preferences`].
    pub orientation_preferences: Vec<Orientation>,
    /// Keep the target out of the focus cycle and block pointer input to it.
    pub disable_mask_interaction: bool,
    /// Clicking the mask does not close the tour.
    pub disable_close_on_click: bool,
    /// Escape does not close the tour.
    pub disable_close: bool,
    /// Right arrow does not advance.
    pub disable_next: bool,
    /// Left arrow does not go back.
    pub disable_prev: bool,
    /// Never scroll the container, and never choose a placement that relies on it.
    pub disable_auto_scroll: bool,
    /// Poll the target and follow it when it moves.
    pub moving_target: bool,
    /// Poll period for [`moving_target`](Self::moving_target), in milliseconds.
    pub update_interval_ms: u64,
    /// Drift (in content units) tolerated before a moving target is followed.
    pub render_tolerance: f64,
    /// Debounce window for resize-triggered repositioning, in milliseconds.
    pub resize_debounce_ms: u64,
    /// Step shown when the tour opens.
    pub initial_step: usize,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            mask_padding: DEFAULT_PADDING,
            tooltip_separation: DEFAULT_SEPARATION,
            orientation_preferences: Vec::new(),
            disable_mask_interaction: false,
            disable_close_on_click: false,
            disable_close: false,
            disable_next: false,
            disable_prev: false,
            disable_auto_scroll: false,
            moving_target: false,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            render_tolerance: DEFAULT_RENDER_TOLERANCE,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            initial_step: 0,
        }
    }
}

/// Per-step replacements for [`TourOptions`] fields. `None` inherits.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepOverrides {
    /// Replaces [`TourOptions::mask_padding`].
    pub mask_padding: Option<f64>,
    /// Replaces [`TourOptions::tooltip_separation`].
    pub tooltip_separation: Option<f64>,
    /// Replaces [`TourOptions::orientation_preferences`].
    pub orientation_preferences: Option<Vec<Orientation>>,
    /// Replaces [`TourOptions::disable_mask_interaction`].
    pub disable_mask_interaction: Option<bool>,
    /// Replaces [`TourOptions::disable_close_on_click`].
    pub disable_close_on_click: Option<bool>,
    /// Replaces [`TourOptions::disable_close`].
    pub disable_close: Option<bool>,
    /// Replaces [`TourOptions::disable_next`].
    pub disable_next: Option<bool>,
    /// Replaces [`TourOptions::disable_prev`].
    pub disable_prev: Option<bool>,
    /// Replaces [`TourOptions::disable_auto_scroll`].
    pub disable_auto_scroll: Option<bool>,
    /// Replaces [`TourOptions::moving_target`].
    pub moving_target: Option<bool>,
    /// Replaces [`TourOptions::update_interval_ms`].
    pub update_interval_ms: Option<u64>,
    /// Replaces [`TourOptions::render_tolerance`].
    pub render_tolerance: Option<f64>,
}

/// One stop of the tour.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Host-defined query locating the target; empty for target-less steps.
    pub selector: String,
    /// Optional heading.
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    /// Body text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Options specific to this step.
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: StepOverrides,
}

impl Step {
    /// A step targeting `selector`.
    pub fn new(selector: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Replaces the step's overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: StepOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Effective, validated options for one step.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    /// Placement configuration handed to the engine.
    pub placement: PlacementOptions,
    /// Focus trap configuration.
    pub trap: TrapOptions,
    /// See [`TourOptions::disable_close_on_click`].
    pub disable_close_on_click: bool,
    /// See [`TourOptions::disable_close`].
    pub disable_close: bool,
    /// See [`TourOptions::disable_next`].
    pub disable_next: bool,
    /// See [`TourOptions::disable_prev`].
    pub disable_prev: bool,
    /// See [`TourOptions::moving_target`].
    pub moving_target: bool,
    /// See [`TourOptions::update_interval_ms`].
    pub update_interval_ms: u64,
    /// See [`TourOptions::render_tolerance`].
    pub render_tolerance: f64,
    /// See [`TourOptions::resize_debounce_ms`].
    pub resize_debounce_ms: u64,
}

impl ResolvedOptions {
    /// Whether auto-scroll is disabled.
    #[must_use]
    pub fn disable_auto_scroll(&self) -> bool {
        self.placement.scroll_disabled
    }
}

/// Invalid tour configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    /// Padding or separation is out of range.
    #[error(transparent)]
    Placement(#[from] PlacementOptionsError),
    /// Render tolerance is negative or not finite.
    #[error("render tolerance must be finite and non-negative, got {0}")]
    RenderTolerance(f64),
    /// A moving-target poll would never wait.
    #[error("update interval must be at least 1 ms")]
    UpdateInterval,
    /// A tour needs at least one step.
    #[error("a tour needs at least one step")]
    EmptySteps,
    /// The initial step does not exist.
    #[error("initial step {index} is out of range for {len} steps")]
    InitialStep {
        /// Requested index.
        index: usize,
        /// Number of steps.
        len: usize,
    },
    /// A step's overrides produce invalid options.
    #[error("step {index}: {source}")]
    Step {
        /// Index of the offending step.
        index: usize,
        /// What is wrong with it.
        source: Box<OptionsError>,
    },
}

impl TourOptions {
    /// Merges `overrides` over these options and validates the result.
    pub fn resolve(&self, overrides: &StepOverrides) -> Result<ResolvedOptions, OptionsError> {
        let placement = PlacementOptions {
            padding: overrides.mask_padding.unwrap_or(self.mask_padding),
            separation: overrides
                .tooltip_separation
                .unwrap_or(self.tooltip_separation),
            preferences: overrides
                .orientation_preferences
                .clone()
                .unwrap_or_else(|| self.orientation_preferences.clone()),
            scroll_disabled: overrides
                .disable_auto_scroll
                .unwrap_or(self.disable_auto_scroll),
        };
        placement.validate()?;

        let render_tolerance = overrides.render_tolerance.unwrap_or(self.render_tolerance);
        if !(render_tolerance.is_finite() && render_tolerance >= 0.0) {
            return Err(OptionsError::RenderTolerance(render_tolerance));
        }
        let update_interval_ms = overrides
            .update_interval_ms
            .unwrap_or(self.update_interval_ms);
        if update_interval_ms == 0 {
            return Err(OptionsError::UpdateInterval);
        }

        Ok(ResolvedOptions {
            placement,
            trap: TrapOptions {
                disable_mask_interaction: overrides
                    .disable_mask_interaction
                    .unwrap_or(self.disable_mask_interaction),
            },
            disable_close_on_click: overrides
                .disable_close_on_click
                .unwrap_or(self.disable_close_on_click),
            disable_close: overrides.disable_close.unwrap_or(self.disable_close),
            disable_next: overrides.disable_next.unwrap_or(self.disable_next),
            disable_prev: overrides.disable_prev.unwrap_or(self.disable_prev),
            moving_target: overrides.moving_target.unwrap_or(self.moving_target),
            update_interval_ms,
            render_tolerance,
            resize_debounce_ms: self.resize_debounce_ms,
        })
    }

    /// Validates the tour-level options on their own.
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.resolve(&StepOverrides::default()).map(|_| ())
    }

    /// Resolves every step, failing on the first invalid one.
    pub fn resolve_steps(&self, steps: &[Step]) -> Result<Vec<ResolvedOptions>, OptionsError> {
        if steps.is_empty() {
            return Err(OptionsError::EmptySteps);
        }
        if self.initial_step >= steps.len() {
            return Err(OptionsError::InitialStep {
                index: self.initial_step,
                len: steps.len(),
            });
        }
        self.validate()?;
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                self.resolve(&step.overrides)
                    .map_err(|e| OptionsError::Step {
                        index,
                        source: Box::new(e),
                    })
            })
            .collect()
    }
}
