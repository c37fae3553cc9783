// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! Every collaborator the control surface talks to but does not own is
//! described here. Infrastructure adapters and host applications implement
//! these traits; tests implement them with recording doubles.
//!
//! # Available Ports
//!
//! - [`animation`]: Tween engine driving opacity and frame changes
//! - [`host`]: Container tree and window the player lives in
//! - [`image_loader`]: Asynchronous preview image loading
//! - [`playback`]: Media playback engine
//! - [`timer`]: Cancellable one-shot hide timer
//!
//! # Design Notes
//!
//! - Completions (animation finished, timer expired, fetch done) are never
//!   delivered through callbacks into the state machines. The host turns them
//!   into explicit messages processed on the UI thread in arrival order.
//! - Only [`ImageLoader`] is `Send + Sync`: it is the one port used from
//!   background tasks. Everything else lives on the UI thread.

pub mod animation;
pub mod host;
pub mod image_loader;
pub mod playback;
pub mod timer;

// Re-export main types for convenience
pub use animation::{AnimationId, AnimationTarget, Animator, OverlayElement, PropertySet};
pub use host::{ContainerId, HostError, PlayerHost};
pub use image_loader::{ImageLoader, LoadError};
pub use playback::PlaybackEngine;
pub use timer::{HideTimer, TimerToken};
