// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Thumbnails**: Preview caching
//! - **Overlay**: Auto-hide delay, fade animation, control bar geometry
//! - **Fullscreen**: Reparent/animate sequence gate

use crate::domain::ui::newtypes::{animation_bounds, hide_delay_bounds};

// ==========================================================================
// Thumbnail Defaults
// ==========================================================================

/// Whether previews go through the disk cache by default.
pub const DEFAULT_SHOULD_CACHE: bool = false;

/// File extension of cached artifacts.
pub const THUMBNAIL_EXTENSION: &str = "png";

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Default idle time before the overlay hides while playing (in seconds).
pub const DEFAULT_HIDE_DELAY_SECS: u32 = hide_delay_bounds::DEFAULT;

/// Default overlay fade duration (in milliseconds).
pub const DEFAULT_ANIMATION_DURATION_MS: u32 = animation_bounds::DEFAULT_MS;

/// Height allocated to the control bar while it is shown (logical pixels).
pub const DEFAULT_CONTROL_BAR_HEIGHT: f32 = 56.0;

/// Minimum control bar height.
pub const MIN_CONTROL_BAR_HEIGHT: f32 = 16.0;

/// Maximum control bar height.
pub const MAX_CONTROL_BAR_HEIGHT: f32 = 256.0;

// ==========================================================================
// Fullscreen Defaults
// ==========================================================================

/// Whether toggling fullscreen runs the reparent/animate sequence.
pub const DEFAULT_DISABLE_FULL_SCREEN_GUARD: bool = true;

// ==========================================================================
// Keyboard
// ==========================================================================

/// Keycode of the Escape key.
pub const ESCAPE_KEYCODE: u32 = 27;
