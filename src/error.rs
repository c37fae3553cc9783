// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Control(ControlError),
}

/// Local, non-fatal failures of the control surface.
///
/// None of these ever stop playback: each one is reported through an effect
/// or a log line and the affected component degrades instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    /// The cache directory cannot be created or written. The cache falls back
    /// to a non-persistent passthrough for the rest of the session.
    CacheUnavailable(String),

    /// The image loader failed to produce a preview. The entry is marked
    /// failed and is not retried automatically.
    FetchFailed(String),

    /// The container the player lived in before fullscreen is gone, so the
    /// player stays detached after leaving fullscreen.
    DetachedAfterFullscreen,

    /// A seek fraction outside `[0, 1]` was requested and has been clamped.
    InvalidSeekTarget(f64),
}

impl ControlError {
    /// Returns a stable key identifying the error kind, suitable for
    /// notifications and log filtering.
    pub fn diagnostic_key(&self) -> &'static str {
        match self {
            ControlError::CacheUnavailable(_) => "thumbnail-cache-unavailable",
            ControlError::FetchFailed(_) => "thumbnail-fetch-failed",
            ControlError::DetachedAfterFullscreen => "fullscreen-detached",
            ControlError::InvalidSeekTarget(_) => "seek-target-invalid",
        }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::CacheUnavailable(msg) => write!(f, "Thumbnail cache unavailable: {}", msg),
            ControlError::FetchFailed(msg) => write!(f, "Thumbnail fetch failed: {}", msg),
            ControlError::DetachedAfterFullscreen => {
                write!(f, "Player left detached after exiting fullscreen")
            }
            ControlError::InvalidSeekTarget(fraction) => {
                write!(f, "Seek target {} outside [0, 1], clamped", fraction)
            }
        }
    }
}

impl std::error::Error for ControlError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Control(e) => write!(f, "Control Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ControlError> for Error {
    fn from(err: ControlError) -> Self {
        Error::Control(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
