// SPDX-License-Identifier: MPL-2.0
//! Image loading port definition.
//!
//! This module defines the [`ImageLoader`] trait used by the thumbnail cache
//! to obtain a decoded preview for a source identifier (a local path or a URL).
//!
//! # Design Notes
//!
//! - `load` returns a boxed `'static` future so the cache can move it onto a
//!   background task; the UI thread never awaits it directly
//! - Decoding happens inside the loader; callers receive a ready image

use futures_util::future::BoxFuture;
use image_rs::DynamicImage;
use std::fmt;

// =============================================================================
// LoadError
// =============================================================================

/// Errors that can occur while loading a preview image.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The source does not exist.
    NotFound(String),

    /// The source was read but could not be decoded as an image.
    Decode(String),

    /// A remote source could not be fetched.
    Network(String),

    /// A local source could not be read.
    Io(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound(source) => write!(f, "Image not found: {source}"),
            LoadError::Decode(msg) => write!(f, "Image decoding failed: {msg}"),
            LoadError::Network(msg) => write!(f, "Network error: {msg}"),
            LoadError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

// =============================================================================
// ImageLoader Trait
// =============================================================================

/// Port for asynchronous preview image loading.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: the cache shares one loader across
/// all in-flight fetch tasks.
///
/// # Example
///
/// ```ignore
/// use player_overlay::application::port::ImageLoader;
///
/// async fn print_size(loader: &dyn ImageLoader, source: &str) {
///     match loader.load(source).await {
///         Ok(image) => println!("{}x{}", image.width(), image.height()),
///         Err(e) => eprintln!("Failed to load: {e}"),
///     }
/// }
/// ```
pub trait ImageLoader: Send + Sync {
    /// Starts loading `source`.
    ///
    /// Each call issues one load; deduplication is the caller's job.
    fn load(&self, source: &str) -> BoxFuture<'static, Result<DynamicImage, LoadError>>;
}
