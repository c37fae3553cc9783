// SPDX-License-Identifier: MPL-2.0
//! Overlay visibility sub-component for the player controls.
//!
//! # States
//!
//! - `Hidden`: controls faded out, no timer.
//! - `Visible`: controls shown, no timer (paused, stopped, or pointer away
//!   while not playing).
//! - `PendingHide`: controls shown while playing, hide timer armed.
//!
//! A hide timer is armed exactly while the state is `PendingHide`. Fades are
//! requested only when crossing between hidden and shown, never when moving
//! between `Visible` and `PendingHide`.
//!
//! Timer expiries and animation completions arrive as messages carrying the
//! token or id they belong to. Anything that does not match the latest one is
//! stale and ignored.

use crate::application::port::{
    AnimationId, AnimationTarget, Animator, HideTimer, OverlayElement, PropertySet, TimerToken,
};
use crate::config::PlayerSettings;
use crate::domain::ui::{AnimationDuration, HideDelay};
use crate::domain::video::{PlaybackState, PlaybackStatus};
use std::rc::Rc;

/// Overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
    PendingHide,
}

impl Visibility {
    /// True when the controls are on screen.
    #[must_use]
    pub fn is_shown(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Messages for the overlay sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Playback engine reported a state.
    PlaybackChanged(PlaybackState),
    /// Pointer moved; payload is whether it is inside the control surface.
    PointerMoved(bool),
    /// A hide timer fired.
    HideTimerExpired(TimerToken),
    /// The animation engine finished an animation.
    AnimationCompleted(AnimationId),
}

/// Effects produced by overlay visibility changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// Visibility changed; fade requested.
    VisibilityChanged(bool),
    /// Fade finished; the control bar now takes `height`.
    BarCommitted { height: f32 },
}

/// Visibility state machine. Owns its hide timer and shares the animator.
pub struct VisibilityController {
    visibility: Visibility,
    playback: PlaybackStatus,
    pointer_inside: bool,
    animator: Rc<dyn Animator>,
    timer: Option<Box<dyn HideTimer>>,
    armed: Option<TimerToken>,
    next_token: u64,
    hide_delay: HideDelay,
    animation_duration: AnimationDuration,
    bar_height: f32,
    committed_bar_height: f32,
    /// Latest progress-track fade and whether it shows the bar.
    pending_bar: Option<(AnimationId, bool)>,
    show_title: bool,
}

impl VisibilityController {
    #[must_use]
    pub fn new(
        animator: Rc<dyn Animator>,
        timer: Box<dyn HideTimer>,
        settings: &PlayerSettings,
    ) -> Self {
        Self {
            visibility: Visibility::Hidden,
            playback: PlaybackStatus::default(),
            pointer_inside: false,
            animator,
            timer: Some(timer),
            armed: None,
            next_token: 0,
            hide_delay: settings.hide_delay,
            animation_duration: settings.animation_duration,
            bar_height: settings.control_bar_height,
            committed_bar_height: 0.0,
            pending_bar: None,
            show_title: false,
        }
    }

    /// Handle an overlay message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        if self.timer.is_none() {
            tracing::debug!(?msg, "overlay detached, ignoring message");
            return Effect::None;
        }

        match msg {
            Message::PlaybackChanged(state) => {
                if !self.playback.transition(state) {
                    return Effect::None;
                }
                let next = match state {
                    PlaybackState::Playing if self.pointer_inside => Visibility::PendingHide,
                    PlaybackState::Playing => Visibility::Hidden,
                    // Paused wins over everything; stopping always reveals.
                    PlaybackState::Paused | PlaybackState::Stopped => Visibility::Visible,
                };
                self.transition(next)
            }
            Message::PointerMoved(inside) => {
                self.pointer_inside = inside;
                let next = match self.playback.state() {
                    PlaybackState::Playing if inside => Visibility::PendingHide,
                    PlaybackState::Playing => Visibility::Hidden,
                    PlaybackState::Paused => Visibility::Visible,
                    PlaybackState::Stopped if inside && self.playback.ended() => {
                        Visibility::Visible
                    }
                    PlaybackState::Stopped => return Effect::None,
                };
                self.transition(next)
            }
            Message::HideTimerExpired(token) => {
                if self.armed != Some(token) || self.visibility != Visibility::PendingHide {
                    tracing::debug!(token = token.raw(), "stale hide timer ignored");
                    return Effect::None;
                }
                self.armed = None;
                self.transition(Visibility::Hidden)
            }
            Message::AnimationCompleted(id) => match self.pending_bar {
                Some((pending, shown)) if pending == id => {
                    self.pending_bar = None;
                    self.committed_bar_height = if shown { self.bar_height } else { 0.0 };
                    Effect::BarCommitted {
                        height: self.committed_bar_height,
                    }
                }
                _ => Effect::None,
            },
        }
    }

    fn transition(&mut self, next: Visibility) -> Effect {
        let previous = self.visibility;
        if next == Visibility::PendingHide {
            self.arm_timer();
        } else {
            self.cancel_timer();
        }
        self.visibility = next;

        if previous != next {
            tracing::debug!(?previous, ?next, "overlay visibility transition");
        }

        match (previous.is_shown(), next.is_shown()) {
            (false, true) => {
                self.fade(true);
                Effect::VisibilityChanged(true)
            }
            (true, false) => {
                self.fade(false);
                Effect::VisibilityChanged(false)
            }
            _ => Effect::None,
        }
    }

    fn arm_timer(&mut self) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        timer.cancel();
        self.next_token += 1;
        let token = TimerToken::new(self.next_token);
        timer.arm(token, self.hide_delay.as_duration());
        self.armed = Some(token);
    }

    fn cancel_timer(&mut self) {
        if self.armed.take().is_some() {
            if let Some(timer) = self.timer.as_mut() {
                timer.cancel();
            }
        }
    }

    fn fade(&mut self, show: bool) {
        let opacity = if show { 1.0 } else { 0.0 };
        let duration = self.animation_duration.as_duration();
        for element in self.elements() {
            self.animator.animate(
                AnimationTarget::Overlay(element),
                PropertySet::Opacity(opacity),
                duration,
            );
        }
        let id = self.animator.animate(
            AnimationTarget::Overlay(OverlayElement::ProgressTrack),
            PropertySet::Opacity(opacity),
            duration,
        );
        // A newer fade supersedes the pending commit.
        self.pending_bar = Some((id, show));
    }

    fn elements(&self) -> impl Iterator<Item = OverlayElement> {
        let title = self.show_title.then_some(OverlayElement::Title);
        OverlayElement::BUTTONS.into_iter().chain(title)
    }

    /// Includes or removes the title label from the fades.
    pub fn set_title_shown(&mut self, shown: bool) {
        self.show_title = shown;
    }

    /// Cancels any outstanding timer and stops reacting to messages.
    pub fn detach(&mut self) {
        self.cancel_timer();
        self.timer = None;
        self.pending_bar = None;
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn playback(&self) -> PlaybackStatus {
        self.playback
    }

    #[must_use]
    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Token of the armed hide timer, if any.
    #[must_use]
    pub fn armed_timer(&self) -> Option<TimerToken> {
        self.armed
    }

    /// True if `id` is the fade whose completion commits the bar height.
    #[must_use]
    pub fn awaits_animation(&self, id: AnimationId) -> bool {
        self.pending_bar.is_some_and(|(pending, _)| pending == id)
    }

    /// Height currently allocated to the control bar.
    #[must_use]
    pub fn bar_height(&self) -> f32 {
        self.committed_bar_height
    }

    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.timer.is_none()
    }
}

impl Drop for VisibilityController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
