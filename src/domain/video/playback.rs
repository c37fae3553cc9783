// SPDX-License-Identifier: MPL-2.0
//! Video playback state machine.
//!
//! This module defines the playback states reported by the playback engine
//! and the derived "ended" flag the overlay uses to decide whether a stopped
//! video should reveal its controls on hover.

/// Represents the current playback state of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Video is stopped (at beginning or end).
    #[default]
    Stopped,
    /// Video is currently playing.
    Playing,
    /// Video is paused at current position.
    Paused,
}

impl PlaybackState {
    /// Returns true if the video is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the video is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if the video is stopped.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// State requested by the play/pause button.
    #[must_use]
    pub fn toggled(self) -> Self {
        if self.is_playing() {
            Self::Paused
        } else {
            Self::Playing
        }
    }
}

/// Last observed playback state plus the derived `ended` flag.
///
/// The player starts `Stopped` without having ended. Entering `Stopped` from
/// `Playing` or `Paused` marks the video as ended; any later change clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStatus {
    state: PlaybackState,
    ended: bool,
}

impl PlaybackStatus {
    /// Records a state notification.
    ///
    /// Returns `false` when the notification repeats the current state, in
    /// which case nothing changes (the ended flag in particular survives).
    pub fn transition(&mut self, next: PlaybackState) -> bool {
        if next == self.state {
            return false;
        }
        self.ended = next.is_stopped();
        self.state = next;
        true
    }

    #[must_use]
    pub fn state(self) -> PlaybackState {
        self.state
    }

    /// True right after playback stopped from a started state.
    #[must_use]
    pub fn ended(self) -> bool {
        self.ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stopped() {
        assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
    }

    #[test]
    fn test_state_checks() {
        assert!(PlaybackState::Playing.is_playing());
        assert!(!PlaybackState::Paused.is_playing());

        assert!(PlaybackState::Paused.is_paused());
        assert!(!PlaybackState::Playing.is_paused());

        assert!(PlaybackState::Stopped.is_stopped());
        assert!(!PlaybackState::Playing.is_stopped());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(PlaybackState::Playing.toggled(), PlaybackState::Paused);
        assert_eq!(PlaybackState::Paused.toggled(), PlaybackState::Playing);
        assert_eq!(PlaybackState::Stopped.toggled(), PlaybackState::Playing);
    }

    #[test]
    fn initial_stop_is_not_ended() {
        let status = PlaybackStatus::default();
        assert!(status.state().is_stopped());
        assert!(!status.ended());
    }

    #[test]
    fn stopping_after_play_marks_ended() {
        let mut status = PlaybackStatus::default();
        assert!(status.transition(PlaybackState::Playing));
        assert!(!status.ended());
        assert!(status.transition(PlaybackState::Stopped));
        assert!(status.ended());
    }

    #[test]
    fn repeated_stop_keeps_ended() {
        let mut status = PlaybackStatus::default();
        status.transition(PlaybackState::Paused);
        status.transition(PlaybackState::Stopped);
        assert!(!status.transition(PlaybackState::Stopped));
        assert!(status.ended());
    }

    #[test]
    fn any_change_clears_ended() {
        let mut status = PlaybackStatus::default();
        status.transition(PlaybackState::Playing);
        status.transition(PlaybackState::Stopped);
        status.transition(PlaybackState::Paused);
        assert!(!status.ended());
    }
}
