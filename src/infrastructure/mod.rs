// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port` that rely on the async runtime and system I/O.
//!
//! # Available Adapters
//!
//! - [`image_loader`]: Filesystem and HTTP preview loading (implements [`ImageLoader`])
//! - [`timer`]: Tokio-backed hide timer (implements [`HideTimer`])
//!
//! Animation, host and playback ports are implemented by the embedding
//! application, which owns the toolkit.
//!
//! [`ImageLoader`]: crate::application::port::ImageLoader
//! [`HideTimer`]: crate::application::port::HideTimer

pub mod image_loader;
pub mod timer;

// Re-export main types for convenience
pub use image_loader::{FsImageLoader, HttpImageLoader, SourceImageLoader};
pub use timer::TokioHideTimer;
