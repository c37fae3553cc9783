// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for overlay values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// HideDelay
// =============================================================================

/// Hide delay bounds in seconds.
pub mod hide_delay_bounds {
    /// Minimum hide delay.
    pub const MIN: u32 = 1;
    /// Maximum hide delay.
    pub const MAX: u32 = 60;
    /// Default hide delay.
    pub const DEFAULT: u32 = 5;
}

/// Idle time before the overlay hides while playing, in seconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–60 seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelay(u32);

impl HideDelay {
    /// Creates a new hide delay, clamping to valid range.
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self(secs.clamp(hide_delay_bounds::MIN, hide_delay_bounds::MAX))
    }

    /// Returns the value in seconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for HideDelay {
    fn default() -> Self {
        Self(hide_delay_bounds::DEFAULT)
    }
}

// =============================================================================
// AnimationDuration
// =============================================================================

/// Animation duration bounds in milliseconds.
pub mod animation_bounds {
    /// Minimum duration (instant).
    pub const MIN_MS: u32 = 0;
    /// Maximum duration.
    pub const MAX_MS: u32 = 2_000;
    /// Default duration.
    pub const DEFAULT_MS: u32 = 200;
}

/// Length of the overlay fade and fullscreen resize animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationDuration(u32);

impl AnimationDuration {
    /// Creates a new animation duration, clamping to valid range.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis.clamp(animation_bounds::MIN_MS, animation_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the duration as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl Default for AnimationDuration {
    fn default() -> Self {
        Self(animation_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// AspectRatio
// =============================================================================

/// Width divided by height of a preview image. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f32);

impl AspectRatio {
    /// Layout default used until a preview reports its real geometry.
    pub const SQUARE: Self = Self(1.0);

    /// Computes the ratio of an image. Returns `None` for degenerate sizes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self(width as f32 / height as f32))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}
