// SPDX-License-Identifier: MPL-2.0
//! Playback engine port definition.
//!
//! The engine decodes and plays media; the control surface only reads its
//! state and issues commands. State changes are reported back to the
//! controls as explicit `PlaybackChanged` messages, never by polling.

use crate::domain::video::{PlaybackState, SeekFraction, Volume};
use std::time::Duration;

/// Port for the media playback engine.
pub trait PlaybackEngine {
    fn state(&self) -> PlaybackState;

    /// Requests a state change. The engine confirms it with a notification.
    fn set_state(&mut self, state: PlaybackState);

    fn position(&self) -> Duration;

    fn set_position(&mut self, position: Duration);

    /// Total duration. Zero when the container does not report one (webm).
    fn duration(&self) -> Duration;

    fn volume(&self) -> Volume;

    fn set_volume(&mut self, volume: Volume);

    fn seek(&mut self, fraction: SeekFraction);

    /// Shows a still image in place of the video frame (thumbnail on stop).
    fn show_still(&mut self, image: &str);
}
