// SPDX-License-Identifier: MPL-2.0
//! Application layer - Collaborator interfaces.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The player controls hold port handles injected at construction
//!
//! # Example
//!
//! ```ignore
//! use player_overlay::application::port::ImageLoader;
//! use player_overlay::infrastructure::SourceImageLoader;
//! use std::sync::Arc;
//!
//! let loader: Arc<dyn ImageLoader> = Arc::new(SourceImageLoader::new()?);
//! ```

pub mod port;
