// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Default volume level.
    pub const DEFAULT: f32 = 1.0;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Silence.
    pub const MUTED: Self = Self(volume_bounds::MIN);

    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively muted (below audible threshold).
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < 0.001
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// SeekFraction
// =============================================================================

/// Seek target expressed as a fraction of the media duration.
///
/// Out-of-range requests are clamped into `[0, 1]` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekFraction(f64);

impl SeekFraction {
    /// Beginning of the media.
    pub const START: Self = Self(0.0);

    /// Creates a seek fraction, clamping to `[0, 1]`. NaN maps to the start.
    #[must_use]
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::START;
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    /// Like [`SeekFraction::new`], but also reports whether clamping happened.
    #[must_use]
    pub fn checked(fraction: f64) -> (Self, bool) {
        let clamped = Self::new(fraction);
        (clamped, clamped.0 != fraction)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_clamps_to_valid_range() {
        assert_eq!(Volume::new(1.7).value(), volume_bounds::MAX);
        assert_eq!(Volume::new(-0.5).value(), volume_bounds::MIN);
        assert_eq!(Volume::new(0.4).value(), 0.4);
    }

    #[test]
    fn volume_muted_detection() {
        assert!(Volume::MUTED.is_muted());
        assert!(Volume::new(0.0005).is_muted());
        assert!(!Volume::default().is_muted());
    }

    #[test]
    fn seek_fraction_clamps() {
        assert_eq!(SeekFraction::new(1.2).value(), 1.0);
        assert_eq!(SeekFraction::new(-3.0).value(), 0.0);
        assert_eq!(SeekFraction::new(0.25).value(), 0.25);
        assert_eq!(SeekFraction::new(f64::NAN), SeekFraction::START);
    }

    #[test]
    fn seek_fraction_checked_reports_clamping() {
        let (fraction, clamped) = SeekFraction::checked(0.5);
        assert_eq!(fraction.value(), 0.5);
        assert!(!clamped);

        let (fraction, clamped) = SeekFraction::checked(1.5);
        assert_eq!(fraction.value(), 1.0);
        assert!(clamped);
    }
}
