// SPDX-License-Identifier: MPL-2.0
//! Preview image handling.
//!
//! [`thumbnail_key`] maps source identifiers to stable cache paths and
//! [`thumbnail_cache`] fetches, persists and serves the previews behind them.

pub mod thumbnail_cache;
pub mod thumbnail_key;

// Re-export commonly used types
pub use thumbnail_cache::{CacheEntry, EntryStatus, FetchCompletion, ThumbnailCache};
pub use thumbnail_key::{CacheKey, CacheKeyCodec};
