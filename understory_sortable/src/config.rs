// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! Per-container options (connect-with, disabled, layout) live on
//! [`ContainerSpec`](crate::container::ContainerSpec); item enumeration is the
//! host's [`ItemSource`](crate::registry::ItemSource). This module covers the
//! gesture-wide options.
//!
//! ```
//! use understory_sortable::config::{Revert, SortableConfig};
//!
//! let config = SortableConfig::new()
//!     .with_distance(4.0)
//!     .with_delay(150)
//!     .with_revert(Revert::parse("true"));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.revert.duration(), Some(500));
//! assert_eq!(Revert::parse("250").duration(), Some(250));
//! assert_eq!(Revert::parse("false").duration(), None);
//! ```

use core::fmt;

/// Whether and how long to animate the item back on release.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Revert {
    /// Tear down immediately on release.
    #[default]
    Off,
    /// Animate for [`Revert::DEFAULT_DURATION`].
    On,
    /// Animate for the given number of milliseconds.
    ///
    /// `Millis(0)` falls back to [`Revert::DEFAULT_DURATION`].
    Millis(u32),
}

impl Revert {
    /// Duration used when none, zero, or a non-numeric value is given.
    pub const DEFAULT_DURATION: u32 = 500;

    /// Animation duration in milliseconds, or `None` when reverting is off.
    #[must_use]
    pub const fn duration(self) -> Option<u32> {
        match self {
            Self::Off => None,
            Self::On | Self::Millis(0) => Some(Self::DEFAULT_DURATION),
            Self::Millis(ms) => Some(ms),
        }
    }

    /// Returns `true` unless [`Revert::Off`].
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Parse a string option value.
    ///
    /// Empty strings, `"false"` and `"off"` disable reverting. A leading
    /// decimal number is taken as the duration. Anything else enables
    /// reverting with the default duration.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("off") {
            return Self::Off;
        }
        let digits = value
            .find(|c: char| !c.is_ascii_digit())
            .map_or(value, |end| &value[..end]);
        match digits.parse::<u32>() {
            Ok(ms) => Self::Millis(ms),
            Err(_) => Self::On,
        }
    }
}

impl From<bool> for Revert {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}

/// Who handles drop-target governance at release.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropBehaviour {
    /// Notify the installed [`DropGovernor`](crate::DropGovernor), if any.
    #[default]
    Managed,
    /// The host handles drop targets itself; the governor is not called.
    SelfManaged,
}

/// Error returned by [`SortableConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The distance threshold is NaN or infinite.
    NonFiniteDistance(f64),
    /// The distance threshold is negative.
    NegativeDistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteDistance(d) => write!(f, "distance threshold {d} is not finite"),
            Self::NegativeDistance(d) => write!(f, "distance threshold {d} is negative"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Gesture-wide options.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SortableConfig {
    /// Pixels the pointer must travel (on either axis) before a drag starts.
    pub distance: f64,
    /// Milliseconds after the press before a drag may start.
    pub delay: u64,
    /// Release animation.
    pub revert: Revert,
    /// Disables starting new drags.
    pub disabled: bool,
    /// Drop-target governance mode.
    pub drop_behaviour: DropBehaviour,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SortableConfig {
    /// One pixel of travel, no delay, no revert.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            distance: 1.0,
            delay: 0,
            revert: Revert::Off,
            disabled: false,
            drop_behaviour: DropBehaviour::Managed,
        }
    }

    /// Set the distance threshold.
    #[must_use]
    pub const fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Set the delay threshold.
    #[must_use]
    pub const fn with_delay(mut self, delay: u64) -> Self {
        self.delay = delay;
        self
    }

    /// Set the release animation.
    #[must_use]
    pub const fn with_revert(mut self, revert: Revert) -> Self {
        self.revert = revert;
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the drop governance mode.
    #[must_use]
    pub const fn with_drop_behaviour(mut self, drop_behaviour: DropBehaviour) -> Self {
        self.drop_behaviour = drop_behaviour;
        self
    }

    /// Check that thresholds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.distance.is_finite() {
            return Err(ConfigError::NonFiniteDistance(self.distance));
        }
        if self.distance < 0.0 {
            return Err(ConfigError::NegativeDistance(self.distance));
        }
        Ok(())
    }
}
