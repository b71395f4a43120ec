// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement configuration.

use alloc::vec::Vec;

use crate::orientation::Orientation;

/// Default space between the target and the highlight cutout around it.
pub const DEFAULT_PADDING: f64 = 5.0;

/// Default gap between the highlight cutout and the tooltip.
pub const DEFAULT_SEPARATION: f64 = 10.0;

/// Immutable per-request placement configuration.
///
/// Build it once per request (typically via `ResolvedOptions` in the session
/// crate) and [`validate`](Self::validate) it before use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementOptions {
    /// Padding around the target, in the same units as the geometry.
    pub padding: f64,
    /// Additional distance between the padded target and the tooltip.
    pub separation: f64,
    /// Orientation preferences.
    ///
    /// One entry forces that orientation; several restrict the choice.
    pub preferences: Vec<Orientation>,
    /// Never rely on scrolling the container to fit the tooltip.
    pub scroll_disabled: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            separation: DEFAULT_SEPARATION,
            preferences: Vec::new(),
            scroll_disabled: false,
        }
    }
}

/// Invalid [`PlacementOptions`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PlacementOptionsError {
    /// Padding is negative or not finite.
    #[error("padding must be finite and non-negative, got {0}")]
    Padding(f64),
    /// Separation is negative or not finite.
    #[error("separation must be finite and non-negative, got {0}")]
    Separation(f64),
}

impl PlacementOptions {
    /// Checks every field.
    pub fn validate(&self) -> Result<(), PlacementOptionsError> {
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(PlacementOptionsError::Padding(self.padding));
        }
        if !(self.separation.is_finite() && self.separation >= 0.0) {
            return Err(PlacementOptionsError::Separation(self.separation));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = PlacementOptions::default();
        assert_eq!(options.padding, 5.0);
        assert_eq!(options.separation, 10.0);
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn rejects_negative_and_non_finite_distances() {
        let options = PlacementOptions {
            padding: -1.0,
            ..PlacementOptions::default()
        };
        assert_eq!(options.validate(), Err(PlacementOptionsError::Padding(-1.0)));

        let options = PlacementOptions {
            separation: f64::INFINITY,
            ..PlacementOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(PlacementOptionsError::Separation(f64::INFINITY))
        );
    }
}
