// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with no dependency on the host toolkit.
//!
//! This module contains pure value objects and state enums shared by the
//! thumbnail cache and the player control state machines.
//!
//! # Modules
//!
//! - [`ui`]: Overlay value objects ([`HideDelay`](ui::HideDelay),
//!   [`AnimationDuration`](ui::AnimationDuration), [`AspectRatio`](ui::AspectRatio))
//! - [`video`]: Playback types ([`PlaybackState`](video::PlaybackState),
//!   [`PlaybackStatus`](video::PlaybackStatus), [`Volume`](video::Volume),
//!   [`SeekFraction`](video::SeekFraction))

pub mod ui;
pub mod video;
