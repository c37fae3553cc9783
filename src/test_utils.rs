// SPDX-License-Identifier: MPL-2.0
//! Recording test doubles for the port traits.
//!
//! Controllers own their collaborators, so every double writes into a shared
//! `Rc<RefCell<..>>` log that the test keeps a handle to.

use crate::application::port::{
    AnimationId, AnimationTarget, Animator, ContainerId, HideTimer, HostError, ImageLoader,
    LoadError, PlaybackEngine, PlayerHost, PropertySet, TimerToken,
};
use crate::domain::video::{PlaybackState, SeekFraction, Volume};
use futures_util::future::{BoxFuture, FutureExt};
use iced_core::{Point, Rectangle, Size};
use image_rs::DynamicImage;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-6;

// =============================================================================
// Image loader
// =============================================================================

/// Loader returning a blank image of fixed size, or a fixed error.
pub struct StubLoader {
    outcome: Result<(u32, u32), LoadError>,
    calls: AtomicUsize,
}

impl StubLoader {
    pub fn image(width: u32, height: u32) -> Self {
        Self {
            outcome: Ok((width, height)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(LoadError::NotFound("stub".into())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageLoader for StubLoader {
    fn load(&self, _source: &str) -> BoxFuture<'static, Result<DynamicImage, LoadError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone();
        async move { outcome.map(|(width, height)| DynamicImage::new_rgba8(width, height)) }.boxed()
    }
}

// =============================================================================
// Animator
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationCall {
    pub id: AnimationId,
    pub target: AnimationTarget,
    pub properties: PropertySet,
    pub duration: Duration,
}

/// Animator that records every request and hands out sequential ids.
#[derive(Default)]
pub struct RecordingAnimator {
    next_id: Cell<u64>,
    calls: RefCell<Vec<AnimationCall>>,
}

impl RecordingAnimator {
    pub fn calls(&self) -> Vec<AnimationCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn last_id(&self) -> Option<AnimationId> {
        self.calls.borrow().last().map(|call| call.id)
    }

    /// Opacity values requested so far, in order.
    pub fn opacities(&self) -> Vec<f32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call.properties {
                PropertySet::Opacity(value) => Some(value),
                PropertySet::Frame { .. } => None,
            })
            .collect()
    }
}

impl Animator for RecordingAnimator {
    fn animate(
        &self,
        target: AnimationTarget,
        properties: PropertySet,
        duration: Duration,
    ) -> AnimationId {
        let id = AnimationId::new(self.next_id.get() + 1);
        self.next_id.set(id.raw());
        self.calls.borrow_mut().push(AnimationCall {
            id,
            target,
            properties,
            duration,
        });
        id
    }
}

// =============================================================================
// Hide timer
// =============================================================================

#[derive(Debug, Default)]
pub struct TimerLog {
    pub armed: Vec<(TimerToken, Duration)>,
    pub cancels: usize,
    pub active: Option<TimerToken>,
}

/// Timer that never fires on its own; tests deliver expiry messages by hand.
pub struct RecordingTimer {
    log: Rc<RefCell<TimerLog>>,
}

impl RecordingTimer {
    pub fn new() -> (Self, Rc<RefCell<TimerLog>>) {
        let log = Rc::new(RefCell::new(TimerLog::default()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl HideTimer for RecordingTimer {
    fn arm(&mut self, token: TimerToken, delay: Duration) {
        let mut log = self.log.borrow_mut();
        log.armed.push((token, delay));
        log.active = Some(token);
    }

    fn cancel(&mut self) {
        let mut log = self.log.borrow_mut();
        log.cancels += 1;
        log.active = None;
    }
}

// =============================================================================
// Player host
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Detach,
    AttachToSurface,
    AttachTo(ContainerId),
    SetWindowFullscreen(bool),
    SetStretch(bool),
}

#[derive(Debug)]
pub struct HostLog {
    pub calls: Vec<HostCall>,
    pub parent: Option<ContainerId>,
    pub on_surface: bool,
    /// When set, `attach_to` fails as if the container was torn down.
    pub container_gone: bool,
    pub frame: Rectangle,
    pub surface: Size,
}

pub struct FakeHost {
    log: Rc<RefCell<HostLog>>,
}

impl FakeHost {
    pub const WINDOWED_FRAME: Rectangle = Rectangle {
        x: 10.0,
        y: 20.0,
        width: 320.0,
        height: 180.0,
    };

    pub fn new() -> (Self, Rc<RefCell<HostLog>>) {
        let log = Rc::new(RefCell::new(HostLog {
            calls: Vec::new(),
            parent: Some(ContainerId::new(7)),
            on_surface: false,
            container_gone: false,
            frame: Self::WINDOWED_FRAME,
            surface: Size::new(1920.0, 1080.0),
        }));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl PlayerHost for FakeHost {
    fn frame(&self) -> Rectangle {
        self.log.borrow().frame
    }

    fn surface_size(&self) -> Size {
        self.log.borrow().surface
    }

    fn detach(&mut self) -> Option<ContainerId> {
        let mut log = self.log.borrow_mut();
        log.calls.push(HostCall::Detach);
        log.on_surface = false;
        log.parent.take()
    }

    fn attach_to_surface(&mut self) {
        let mut log = self.log.borrow_mut();
        log.calls.push(HostCall::AttachToSurface);
        log.on_surface = true;
        log.frame = Rectangle::new(Point::ORIGIN, log.surface);
    }

    fn attach_to(&mut self, container: ContainerId) -> Result<(), HostError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(HostCall::AttachTo(container));
        if log.container_gone {
            return Err(HostError::ContainerGone(container));
        }
        log.parent = Some(container);
        Ok(())
    }

    fn set_window_fullscreen(&mut self, fullscreen: bool) {
        self.log
            .borrow_mut()
            .calls
            .push(HostCall::SetWindowFullscreen(fullscreen));
    }

    fn set_stretch(&mut self, stretch: bool) {
        self.log.borrow_mut().calls.push(HostCall::SetStretch(stretch));
    }
}

// =============================================================================
// Playback engine
// =============================================================================

#[derive(Debug, Default)]
pub struct EngineLog {
    pub state: PlaybackState,
    pub position: Duration,
    pub duration: Duration,
    pub volume: Volume,
    pub seeks: Vec<SeekFraction>,
    pub stills: Vec<String>,
}

pub struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
}

impl FakeEngine {
    pub fn new() -> (Self, Rc<RefCell<EngineLog>>) {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl PlaybackEngine for FakeEngine {
    fn state(&self) -> PlaybackState {
        self.log.borrow().state
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.log.borrow_mut().state = state;
    }

    fn position(&self) -> Duration {
        self.log.borrow().position
    }

    fn set_position(&mut self, position: Duration) {
        self.log.borrow_mut().position = position;
    }

    fn duration(&self) -> Duration {
        self.log.borrow().duration
    }

    fn volume(&self) -> Volume {
        self.log.borrow().volume
    }

    fn set_volume(&mut self, volume: Volume) {
        self.log.borrow_mut().volume = volume;
    }

    fn seek(&mut self, fraction: SeekFraction) {
        self.log.borrow_mut().seeks.push(fraction);
    }

    fn show_still(&mut self, image: &str) {
        self.log.borrow_mut().stills.push(image.to_string());
    }
}
