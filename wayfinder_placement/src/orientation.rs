// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of tooltip orientations.

use core::fmt;
use core::str::FromStr;

/// Number of [`Orientation`] values.
pub const ORIENTATION_COUNT: usize = 13;

/// Where a tooltip sits relative to its target.
///
/// Compound variants name the side first and the aligned edge second:
/// [`Orientation::EastNorth`] sits east of the target with its top edge
/// aligned to the target's top edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Orientation {
    /// Right of the target, vertically centered.
    East,
    /// Below the target, horizontally centered.
    South,
    /// Left of the target, vertically centered.
    West,
    /// Above the target, horizontally centered.
    North,
    /// Centered in the viewport, ignoring the target.
    Center,
    /// Right of the target, top edges aligned.
    EastNorth,
    /// Right of the target, bottom edges aligned.
    EastSouth,
    /// Below the target, right edges aligned.
    SouthEast,
    /// Below the target, left edges aligned.
    SouthWest,
    /// Left of the target, bottom edges aligned.
    WestSouth,
    /// Left of the target, top edges aligned.
    WestNorth,
    /// Above the target, left edges aligned.
    NorthWest,
    /// Above the target, right edges aligned.
    NorthEast,
}

impl Orientation {
    /// Every orientation, in candidate generation order.
    pub const ALL: [Self; ORIENTATION_COUNT] = [
        Self::East,
        Self::South,
        Self::West,
        Self::North,
        Self::EastNorth,
        Self::EastSouth,
        Self::SouthEast,
        Self::SouthWest,
        Self::WestSouth,
        Self::WestNorth,
        Self::NorthWest,
        Self::NorthEast,
        Self::Center,
    ];

    /// The four plain sides.
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::East | Self::South | Self::West | Self::North)
    }

    /// Anything placed relative to the target, i.e. everything except [`Orientation::Center`].
    #[must_use]
    pub const fn is_directional(self) -> bool {
        !matches!(self, Self::Center)
    }

    /// Kebab-case name, for example `"east-north"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::North => "north",
            Self::Center => "center",
            Self::EastNorth => "east-north",
            Self::EastSouth => "east-south",
            Self::SouthEast => "south-east",
            Self::SouthWest => "south-west",
            Self::WestSouth => "west-south",
            Self::WestNorth => "west-north",
            Self::NorthWest => "north-west",
            Self::NorthEast => "north-east",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown orientation name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation {0:?}")]
pub struct ParseOrientationError(pub alloc::string::String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| ParseOrientationError(s.into()))
    }
}
