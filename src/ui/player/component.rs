// SPDX-License-Identifier: MPL-2.0
//! Player controls component encapsulating state and update logic.
//!
//! Owns the overlay and fullscreen sub-components, the playback engine handle
//! and the thumbnail cache. Every external signal enters through
//! [`PlayerControls::update`] on the UI thread, one message at a time.

use crate::application::port::{
    AnimationId, Animator, HideTimer, PlaybackEngine, PlayerHost, TimerToken,
};
use crate::config::PlayerSettings;
use crate::domain::ui::AspectRatio;
use crate::domain::video::{PlaybackState, SeekFraction};
use crate::error::ControlError;
use crate::media::{EntryStatus, FetchCompletion, ThumbnailCache};
use crate::ui::player::controls::{self, VolumeToggle};
use crate::ui::player::fullscreen::{self, FullscreenController, Phase};
use crate::ui::player::keyboard::{self, KeyAction, KeyPayload};
use crate::ui::player::overlay::{self, Visibility, VisibilityController};
use iced_core::{Point, Rectangle, Size};
use std::rc::Rc;
use std::time::Duration;

/// Messages delivered to the player controls.
#[derive(Debug, Clone)]
pub enum Message {
    /// Playback engine state notification.
    PlaybackChanged(PlaybackState),
    /// Pointer position in window coordinates.
    PointerMoved(Point),
    /// Bounds of the control surface changed.
    BoundsChanged(Rectangle),
    /// Bounds of the progress track changed.
    ProgressTrackChanged(Rectangle),
    HideTimerExpired(TimerToken),
    AnimationCompleted(AnimationId),
    KeyDown(KeyPayload),
    StopPressed,
    PlayPausePressed,
    VolumePressed,
    FullscreenPressed,
    /// Click on the progress track, in window coordinates.
    ProgressPressed(Point),
    /// Programmatic seek to a fraction of the duration.
    SeekRequested(f64),
    /// Periodic refresh of the time label.
    PositionTick,
    /// New media source, with optional preview image and title.
    SourceChanged {
        source: String,
        thumbnail: Option<String>,
        title: Option<String>,
    },
    /// Background thumbnail fetch finished.
    ThumbnailFetched(FetchCompletion),
}

/// Effects the host applies to its widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// Overlay fade requested.
    OverlayVisibilityChanged(bool),
    /// Control bar height committed after a fade.
    ControlBarResized { height: f32 },
    /// Fullscreen phase changed.
    FullscreenChanged(Phase),
    /// Fullscreen phase changed, and the player was left outside its
    /// original container.
    FullscreenDetached { phase: Phase, error: ControlError },
    /// Display this preview image with this aspect ratio.
    ThumbnailChanged {
        image: String,
        aspect_ratio: AspectRatio,
    },
    /// Non-fatal failure to surface to the user.
    Warning(ControlError),
}

/// Handles injected at construction. They live as long as the controls.
pub struct Collaborators {
    pub animator: Rc<dyn Animator>,
    pub timer: Box<dyn HideTimer>,
    pub host: Box<dyn PlayerHost>,
    pub engine: Box<dyn PlaybackEngine>,
    /// Used only when caching is enabled in the settings.
    pub thumbnails: Option<ThumbnailCache>,
}

/// Control surface of one player instance.
pub struct PlayerControls {
    overlay: VisibilityController,
    fullscreen: FullscreenController,
    engine: Box<dyn PlaybackEngine>,
    thumbnails: Option<ThumbnailCache>,
    volume: VolumeToggle,
    bounds: Rectangle,
    progress_track: Rectangle,
    source: Option<String>,
    title: Option<String>,
    /// Thumbnail identifier awaiting a fetch.
    requested_thumbnail: Option<String>,
    thumbnail: Option<String>,
    aspect_ratio: AspectRatio,
    time_label: String,
}

impl std::fmt::Debug for PlayerControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerControls")
            .field("visibility", &self.overlay.visibility())
            .field("fullscreen", &self.fullscreen.phase())
            .field("source", &self.source)
            .field("thumbnail", &self.thumbnail)
            .field("caching", &self.thumbnails.is_some())
            .finish_non_exhaustive()
    }
}

impl PlayerControls {
    #[must_use]
    pub fn new(settings: &PlayerSettings, collaborators: Collaborators) -> Self {
        let Collaborators {
            animator,
            timer,
            host,
            engine,
            thumbnails,
        } = collaborators;

        Self {
            overlay: VisibilityController::new(Rc::clone(&animator), timer, settings),
            fullscreen: FullscreenController::new(host, animator, settings),
            engine,
            thumbnails: thumbnails.filter(|_| settings.should_cache),
            volume: VolumeToggle::default(),
            bounds: Rectangle::new(Point::ORIGIN, Size::ZERO),
            progress_track: Rectangle::new(Point::ORIGIN, Size::ZERO),
            source: None,
            title: None,
            requested_thumbnail: None,
            thumbnail: None,
            aspect_ratio: AspectRatio::SQUARE,
            time_label: String::from("0:00"),
        }
    }

    /// Process one message.
    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::PlaybackChanged(state) => {
                let effect = self
                    .overlay
                    .handle(overlay::Message::PlaybackChanged(state));
                if state.is_stopped() {
                    if let Some(thumbnail) = &self.thumbnail {
                        self.engine.show_still(thumbnail);
                    }
                }
                map_overlay(effect)
            }
            Message::PointerMoved(position) => {
                let inside = self.bounds.contains(position);
                map_overlay(self.overlay.handle(overlay::Message::PointerMoved(inside)))
            }
            Message::BoundsChanged(bounds) => {
                self.bounds = bounds;
                Effect::None
            }
            Message::ProgressTrackChanged(track) => {
                self.progress_track = track;
                Effect::None
            }
            Message::HideTimerExpired(token) => {
                map_overlay(self.overlay.handle(overlay::Message::HideTimerExpired(token)))
            }
            Message::AnimationCompleted(id) => {
                if self.overlay.awaits_animation(id) {
                    map_overlay(self.overlay.handle(overlay::Message::AnimationCompleted(id)))
                } else if self.fullscreen.awaits_animation(id) {
                    map_fullscreen(
                        self.fullscreen
                            .handle(fullscreen::Message::AnimationCompleted(id)),
                    )
                } else {
                    Effect::None
                }
            }
            Message::KeyDown(payload) => match keyboard::action_for(&payload) {
                Some(KeyAction::ExitFullscreen) => {
                    map_fullscreen(self.fullscreen.handle(fullscreen::Message::Exit))
                }
                None => Effect::None,
            },
            Message::StopPressed => {
                self.engine.set_state(PlaybackState::Stopped);
                self.engine.set_position(Duration::ZERO);
                Effect::None
            }
            Message::PlayPausePressed => {
                let next = self.engine.state().toggled();
                self.engine.set_state(next);
                Effect::None
            }
            Message::VolumePressed => {
                let next = self.volume.toggle(self.engine.volume());
                self.engine.set_volume(next);
                Effect::None
            }
            Message::FullscreenPressed => {
                map_fullscreen(self.fullscreen.handle(fullscreen::Message::Toggle))
            }
            Message::ProgressPressed(position) => {
                match controls::seek_fraction_from_pointer(position.x, self.progress_track) {
                    Some(fraction) => self.engine.seek(fraction),
                    None => tracing::debug!("progress click on empty track ignored"),
                }
                Effect::None
            }
            Message::SeekRequested(raw) => {
                let (fraction, clamped) = SeekFraction::checked(raw);
                if clamped {
                    let err = ControlError::InvalidSeekTarget(raw);
                    tracing::warn!(key = err.diagnostic_key(), "{err}");
                }
                self.engine.seek(fraction);
                Effect::None
            }
            Message::PositionTick => {
                if let Some(label) =
                    controls::format_time(self.engine.position(), self.engine.duration())
                {
                    self.time_label = label;
                }
                Effect::None
            }
            Message::SourceChanged {
                source,
                thumbnail,
                title,
            } => {
                self.overlay.set_title_shown(title.is_some());
                self.source = Some(source);
                self.title = title;
                self.set_thumbnail(thumbnail)
            }
            Message::ThumbnailFetched(completion) => self.thumbnail_fetched(completion),
        }
    }

    fn set_thumbnail(&mut self, thumbnail: Option<String>) -> Effect {
        self.requested_thumbnail = None;
        self.aspect_ratio = AspectRatio::SQUARE;

        let Some(identifier) = thumbnail else {
            self.thumbnail = None;
            return Effect::None;
        };

        let Some(cache) = self.thumbnails.as_mut() else {
            return self.show_thumbnail(identifier, AspectRatio::SQUARE);
        };

        let entry = cache.resolve(&identifier);
        match (entry.status, entry.aspect_ratio) {
            (EntryStatus::Ready, Some(ratio)) => {
                self.show_thumbnail(entry.path.to_string_lossy().into_owned(), ratio)
            }
            _ => {
                cache.request(&identifier);
                self.thumbnail = None;
                self.requested_thumbnail = Some(identifier);
                Effect::None
            }
        }
    }

    fn thumbnail_fetched(&mut self, completion: FetchCompletion) -> Effect {
        let Some(cache) = self.thumbnails.as_mut() else {
            return Effect::None;
        };
        let Some(entry) = cache.complete(completion) else {
            return Effect::None;
        };

        let current = self
            .requested_thumbnail
            .as_deref()
            .is_some_and(|requested| cache.codec().derive_key(requested).key == entry.key);
        if !current {
            tracing::debug!(key = %entry.key, "thumbnail for a previous source");
            return Effect::None;
        }

        let requested = self.requested_thumbnail.take().unwrap_or_default();
        match (entry.status, entry.aspect_ratio) {
            (EntryStatus::Ready, Some(ratio)) => {
                self.show_thumbnail(entry.path.to_string_lossy().into_owned(), ratio)
            }
            _ => Effect::Warning(ControlError::FetchFailed(requested)),
        }
    }

    fn show_thumbnail(&mut self, image: String, aspect_ratio: AspectRatio) -> Effect {
        self.thumbnail = Some(image.clone());
        self.aspect_ratio = aspect_ratio;
        if self.engine.state().is_stopped() {
            self.engine.show_still(&image);
        }
        Effect::ThumbnailChanged {
            image,
            aspect_ratio,
        }
    }

    /// Cancels timers and stops reacting to overlay messages.
    pub fn detach(&mut self) {
        self.overlay.detach();
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.overlay.visibility()
    }

    #[must_use]
    pub fn fullscreen_phase(&self) -> Phase {
        self.fullscreen.phase()
    }

    #[must_use]
    pub fn bar_height(&self) -> f32 {
        self.overlay.bar_height()
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Image currently used as the still/preview.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    #[must_use]
    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    #[must_use]
    pub fn thumbnails(&self) -> Option<&ThumbnailCache> {
        self.thumbnails.as_ref()
    }
}

fn map_overlay(effect: overlay::Effect) -> Effect {
    match effect {
        overlay::Effect::None => Effect::None,
        overlay::Effect::VisibilityChanged(shown) => Effect::OverlayVisibilityChanged(shown),
        overlay::Effect::BarCommitted { height } => Effect::ControlBarResized { height },
    }
}

fn map_fullscreen(effect: fullscreen::Effect) -> Effect {
    match effect {
        fullscreen::Effect::None => Effect::None,
        fullscreen::Effect::PhaseChanged(phase) => Effect::FullscreenChanged(phase),
        fullscreen::Effect::Detached { phase, error } => {
            Effect::FullscreenDetached { phase, error }
        }
    }
}
