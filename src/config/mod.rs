// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[thumbnails]` - Preview caching
//! - `[overlay]` - Auto-hide delay, animation duration, control bar height
//! - `[fullscreen]` - Fullscreen reparent sequence
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PLAYER_OVERLAY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use player_overlay::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.thumbnails.should_cache = Some(true);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::ui::{AnimationDuration, HideDelay};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Preview cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThumbnailConfig {
    /// Route previews through the disk cache.
    #[serde(
        default = "default_should_cache",
        skip_serializing_if = "Option::is_none"
    )]
    pub should_cache: Option<bool>,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            should_cache: default_should_cache(),
        }
    }
}

/// Control overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    /// Idle time before the overlay hides while playing (seconds).
    #[serde(
        default = "default_hide_delay_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_delay_secs: Option<u32>,

    /// Fade duration of the overlay elements (milliseconds).
    #[serde(
        default = "default_animation_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation_duration_ms: Option<u32>,

    /// Height allocated to the control bar while shown.
    #[serde(
        default = "default_control_bar_height",
        skip_serializing_if = "Option::is_none"
    )]
    pub control_bar_height: Option<f32>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            hide_delay_secs: default_hide_delay_secs(),
            animation_duration_ms: default_animation_duration_ms(),
            control_bar_height: default_control_bar_height(),
        }
    }
}

/// Fullscreen settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FullscreenConfig {
    /// Run the detach/reattach/animate sequence when toggling fullscreen.
    /// When false the toggle only flips the flag.
    #[serde(
        default = "default_disable_full_screen_guard",
        skip_serializing_if = "Option::is_none"
    )]
    pub disable_full_screen_guard: Option<bool>,
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            disable_full_screen_guard: default_disable_full_screen_guard(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Crate configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub thumbnails: ThumbnailConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub fullscreen: FullscreenConfig,
}

/// Validated settings consumed by the player controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    pub should_cache: bool,
    pub hide_delay: HideDelay,
    pub animation_duration: AnimationDuration,
    pub control_bar_height: f32,
    pub disable_full_screen_guard: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Config::default().player_settings()
    }
}

impl Config {
    /// Resolves optional fields to defaults and clamps values into range.
    #[must_use]
    pub fn player_settings(&self) -> PlayerSettings {
        let bar_height = self
            .overlay
            .control_bar_height
            .filter(|h| h.is_finite())
            .unwrap_or(DEFAULT_CONTROL_BAR_HEIGHT)
            .clamp(MIN_CONTROL_BAR_HEIGHT, MAX_CONTROL_BAR_HEIGHT);

        PlayerSettings {
            should_cache: self
                .thumbnails
                .should_cache
                .unwrap_or(DEFAULT_SHOULD_CACHE),
            hide_delay: HideDelay::new(
                self.overlay
                    .hide_delay_secs
                    .unwrap_or(DEFAULT_HIDE_DELAY_SECS),
            ),
            animation_duration: AnimationDuration::new(
                self.overlay
                    .animation_duration_ms
                    .unwrap_or(DEFAULT_ANIMATION_DURATION_MS),
            ),
            control_bar_height: bar_height,
            disable_full_screen_guard: self
                .fullscreen
                .disable_full_screen_guard
                .unwrap_or(DEFAULT_DISABLE_FULL_SCREEN_GUARD),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_should_cache() -> Option<bool> {
    Some(DEFAULT_SHOULD_CACHE)
}

fn default_hide_delay_secs() -> Option<u32> {
    Some(DEFAULT_HIDE_DELAY_SECS)
}

fn default_animation_duration_ms() -> Option<u32> {
    Some(DEFAULT_ANIMATION_DURATION_MS)
}

fn default_control_bar_height() -> Option<f32> {
    Some(DEFAULT_CONTROL_BAR_HEIGHT)
}

fn default_disable_full_screen_guard() -> Option<bool> {
    Some(DEFAULT_DISABLE_FULL_SCREEN_GUARD)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "config load failed, using defaults");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration into a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
