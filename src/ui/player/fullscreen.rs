// SPDX-License-Identifier: MPL-2.0
//! Fullscreen sub-component.
//!
//! Cycles `Windowed → Entering → Fullscreen → Exiting → Windowed`. The two
//! transient phases wait for the player frame animation; toggles received
//! meanwhile are dropped so reparenting never overlaps.
//!
//! Entering moves the player out of its container onto the top-level surface
//! and remembers the container. Exiting hands it back. If that container was
//! torn down in the meantime the player stays detached and the exit still
//! completes.

use crate::application::port::{
    AnimationId, AnimationTarget, Animator, ContainerId, PlayerHost, PropertySet,
};
use crate::config::PlayerSettings;
use crate::domain::ui::AnimationDuration;
use crate::error::ControlError;
use iced_core::{Point, Rectangle};
use std::rc::Rc;

/// Fullscreen phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Windowed,
    Entering,
    Fullscreen,
    Exiting,
}

impl Phase {
    /// True while a frame animation is running.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

/// Messages for the fullscreen sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Fullscreen button or equivalent.
    Toggle,
    /// Leave fullscreen if in it (Escape).
    Exit,
    /// The animation engine finished an animation.
    AnimationCompleted(AnimationId),
}

/// Effects produced by fullscreen changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// Phase changed.
    PhaseChanged(Phase),
    /// Phase changed, but the player could not be put back into its container.
    Detached { phase: Phase, error: ControlError },
}

/// Fullscreen state machine. Owns the player host handle.
pub struct FullscreenController {
    phase: Phase,
    host: Box<dyn PlayerHost>,
    animator: Rc<dyn Animator>,
    duration: AnimationDuration,
    /// When false, toggling only flips the phase.
    run_sequence: bool,
    original_container: Option<ContainerId>,
    original_frame: Rectangle,
    pending: Option<AnimationId>,
}

impl std::fmt::Debug for FullscreenController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenController")
            .field("phase", &self.phase)
            .field("run_sequence", &self.run_sequence)
            .field("original_container", &self.original_container)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl FullscreenController {
    #[must_use]
    pub fn new(
        host: Box<dyn PlayerHost>,
        animator: Rc<dyn Animator>,
        settings: &PlayerSettings,
    ) -> Self {
        let original_frame = host.frame();
        Self {
            phase: Phase::Windowed,
            host,
            animator,
            duration: settings.animation_duration,
            run_sequence: settings.disable_full_screen_guard,
            original_container: None,
            original_frame,
            pending: None,
        }
    }

    /// Handle a fullscreen message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Toggle => match self.phase {
                Phase::Windowed => self.enter(),
                Phase::Fullscreen => self.exit(),
                Phase::Entering | Phase::Exiting => {
                    tracing::debug!(phase = ?self.phase, "fullscreen toggle ignored mid-transition");
                    Effect::None
                }
            },
            Message::Exit => {
                if self.phase == Phase::Fullscreen {
                    self.exit()
                } else {
                    Effect::None
                }
            }
            Message::AnimationCompleted(id) => {
                if self.pending != Some(id) {
                    return Effect::None;
                }
                self.pending = None;
                let next = match self.phase {
                    Phase::Entering => {
                        self.host.set_stretch(true);
                        Phase::Fullscreen
                    }
                    Phase::Exiting => {
                        self.host.set_stretch(false);
                        Phase::Windowed
                    }
                    Phase::Windowed | Phase::Fullscreen => return Effect::None,
                };
                self.settle(next)
            }
        }
    }

    fn enter(&mut self) -> Effect {
        if !self.run_sequence {
            return self.settle(Phase::Fullscreen);
        }

        self.original_frame = self.host.frame();
        self.original_container = self.host.detach();
        self.host.attach_to_surface();
        self.host.set_window_fullscreen(true);

        let size = self.host.surface_size();
        self.pending = Some(self.animator.animate(
            AnimationTarget::Player,
            PropertySet::Frame {
                position: Point::ORIGIN,
                size,
            },
            self.duration.as_duration(),
        ));
        self.settle(Phase::Entering)
    }

    fn exit(&mut self) -> Effect {
        if !self.run_sequence {
            return self.settle(Phase::Windowed);
        }

        self.host.set_window_fullscreen(false);
        self.host.detach();

        let reattached = match self.original_container.take() {
            Some(container) => match self.host.attach_to(container) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "original container gone");
                    false
                }
            },
            None => false,
        };

        let frame = self.original_frame;
        self.pending = Some(self.animator.animate(
            AnimationTarget::Player,
            PropertySet::Frame {
                position: frame.position(),
                size: frame.size(),
            },
            self.duration.as_duration(),
        ));
        let effect = self.settle(Phase::Exiting);

        if reattached {
            effect
        } else {
            let error = ControlError::DetachedAfterFullscreen;
            tracing::warn!(key = error.diagnostic_key(), "{error}");
            Effect::Detached {
                phase: Phase::Exiting,
                error,
            }
        }
    }

    fn settle(&mut self, next: Phase) -> Effect {
        if self.phase == next {
            return Effect::None;
        }
        tracing::debug!(previous = ?self.phase, ?next, "fullscreen phase transition");
        self.phase = next;
        Effect::PhaseChanged(next)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.phase == Phase::Fullscreen
    }

    /// True if `id` is the frame animation this controller waits for.
    #[must_use]
    pub fn awaits_animation(&self, id: AnimationId) -> bool {
        self.pending == Some(id)
    }
}
