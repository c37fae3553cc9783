// SPDX-License-Identifier: MPL-2.0
//! Helpers behind the control bar widgets: time label, progress track and
//! volume button.

use crate::domain::video::{SeekFraction, Volume};
use iced_core::Rectangle;
use std::time::Duration;

/// Formats `position` as `M:SS`.
///
/// Returns `None` when `duration` is zero: some streams never report one, and
/// the label keeps its previous text.
#[must_use]
pub fn format_time(position: Duration, duration: Duration) -> Option<String> {
    if duration.is_zero() {
        return None;
    }
    let secs = position.as_secs();
    Some(format!("{}:{:02}", secs / 60, secs % 60))
}

/// Converts a click at window x-coordinate `x` into a fraction of `track`.
///
/// The coordinate is clamped into the track first. Returns `None` for a track
/// without width.
#[must_use]
pub fn seek_fraction_from_pointer(x: f32, track: Rectangle) -> Option<SeekFraction> {
    if !(track.width.is_finite() && track.width > 0.0) || !x.is_finite() {
        return None;
    }
    let local = (x - track.x).clamp(0.0, track.width);
    Some(SeekFraction::new(f64::from(local / track.width)))
}

/// Mute toggle that remembers the volume it muted.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeToggle {
    remembered: Volume,
}

impl VolumeToggle {
    /// Returns the volume to apply after a press at `current`.
    pub fn toggle(&mut self, current: Volume) -> Volume {
        if current.is_muted() {
            self.remembered
        } else {
            self.remembered = current;
            Volume::MUTED
        }
    }

    #[must_use]
    pub fn remembered(&self) -> Volume {
        self.remembered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::F32_EPSILON;
    use iced_core::{Point, Size};

    fn track() -> Rectangle {
        Rectangle::new(Point::new(100.0, 0.0), Size::new(200.0, 8.0))
    }

    #[test]
    fn time_label_uses_minutes_and_padded_seconds() {
        let total = Duration::from_secs(600);
        assert_eq!(
            format_time(Duration::from_secs(0), total).as_deref(),
            Some("0:00")
        );
        assert_eq!(
            format_time(Duration::from_secs(65), total).as_deref(),
            Some("1:05")
        );
        assert_eq!(
            format_time(Duration::from_millis(599_900), total).as_deref(),
            Some("9:59")
        );
        assert_eq!(
            format_time(Duration::from_secs(3_725), total).as_deref(),
            Some("62:05")
        );
    }

    #[test]
    fn time_label_untouched_without_duration() {
        assert_eq!(format_time(Duration::from_secs(12), Duration::ZERO), None);
    }

    #[test]
    fn click_maps_to_track_fraction() {
        let fraction = seek_fraction_from_pointer(150.0, track()).expect("valid track");
        assert!((fraction.value() - 0.25).abs() < f64::from(F32_EPSILON));
    }

    #[test]
    fn click_outside_track_is_clamped() {
        let left = seek_fraction_from_pointer(-40.0, track()).expect("valid track");
        let right = seek_fraction_from_pointer(1_000.0, track()).expect("valid track");
        assert_eq!(left.value(), 0.0);
        assert_eq!(right.value(), 1.0);
    }

    #[test]
    fn zero_width_track_ignores_click() {
        let empty = Rectangle::new(Point::ORIGIN, Size::new(0.0, 8.0));
        assert!(seek_fraction_from_pointer(10.0, empty).is_none());
    }

    #[test]
    fn volume_toggle_mutes_and_restores() {
        let mut toggle = VolumeToggle::default();

        let muted = toggle.toggle(Volume::new(0.6));
        assert!(muted.is_muted());

        let restored = toggle.toggle(muted);
        assert!((restored.value() - 0.6).abs() < F32_EPSILON);
    }

    #[test]
    fn volume_toggle_from_silence_restores_default() {
        let mut toggle = VolumeToggle::default();
        assert_eq!(toggle.toggle(Volume::MUTED), Volume::default());
    }
}
