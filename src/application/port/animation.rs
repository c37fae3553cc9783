// SPDX-License-Identifier: MPL-2.0
//! Animation engine port definition.
//!
//! The engine tweens a property set on a target over a duration. Completion is
//! reported back by the host as an explicit message carrying the
//! [`AnimationId`] returned from [`Animator::animate`].
//!
//! # Supersession
//!
//! Starting an animation on a target that already has one in flight replaces
//! it. The replaced animation may still report completion; the state machines
//! only act on the id they started last, so a superseded completion is a no-op.

use iced_core::{Point, Size};
use std::time::Duration;

/// Identifier of one started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Elements of the control overlay that fade in and out together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayElement {
    StopButton,
    PlayPauseButton,
    FullscreenButton,
    VolumeContainer,
    TimeLabel,
    VolumeButton,
    /// Optional label showing the source identifier.
    Title,
    /// The progress track; its animation drives the control bar layout commit.
    ProgressTrack,
}

impl OverlayElement {
    /// Elements always present on the control bar, except the progress track.
    pub const BUTTONS: [OverlayElement; 6] = [
        OverlayElement::StopButton,
        OverlayElement::PlayPauseButton,
        OverlayElement::FullscreenButton,
        OverlayElement::VolumeContainer,
        OverlayElement::TimeLabel,
        OverlayElement::VolumeButton,
    ];
}

/// What an animation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    Overlay(OverlayElement),
    /// The player widget itself (fullscreen resize).
    Player,
}

/// Target values of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertySet {
    Opacity(f32),
    Frame { position: Point, size: Size },
}

/// Port for the animation engine.
///
/// Methods take `&self`: the engine is a shared handle used by several
/// controllers on the UI thread.
pub trait Animator {
    /// Starts tweening `target` towards `properties` over `duration`,
    /// superseding any animation in flight on the same target.
    fn animate(
        &self,
        target: AnimationTarget,
        properties: PropertySet,
        duration: Duration,
    ) -> AnimationId;
}
