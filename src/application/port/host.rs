// SPDX-License-Identifier: MPL-2.0
//! Player host port definition.
//!
//! The host owns the container tree and the top-level window. Fullscreen moves
//! the player between its container and the window surface; these moves are
//! explicit ownership transfers through this trait.

use iced_core::{Rectangle, Size};
use std::fmt;

/// Handle to a container the player can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Errors reported by the host when moving the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The container was torn down and can no longer receive the player.
    ContainerGone(ContainerId),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::ContainerGone(id) => write!(f, "Container {:?} no longer exists", id),
        }
    }
}

impl std::error::Error for HostError {}

/// Port for the window system hosting the player widget.
pub trait PlayerHost {
    /// Current bounds of the player in window coordinates.
    fn frame(&self) -> Rectangle;

    /// Size of the top-level surface.
    fn surface_size(&self) -> Size;

    /// Removes the player from whatever owns it and returns the previous
    /// container, if it was in one.
    fn detach(&mut self) -> Option<ContainerId>;

    /// Makes the top-level surface the player's owner.
    fn attach_to_surface(&mut self);

    /// Makes `container` the player's owner.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ContainerGone`] when the container was destroyed.
    fn attach_to(&mut self, container: ContainerId) -> Result<(), HostError>;

    /// Switches the host window in or out of fullscreen mode.
    fn set_window_fullscreen(&mut self, fullscreen: bool);

    /// Lets the video content stretch to fill the player bounds.
    fn set_stretch(&mut self, stretch: bool);
}
