// SPDX-License-Identifier: MPL-2.0
//! Cache key derivation for preview images.
//!
//! A source identifier (path or URL) maps to `<cache-root>/<digest>.png`, where
//! `<digest>` is the lowercase hex MD5 of the identifier string. Keys only
//! depend on the identifier, so they are stable across runs and processes and
//! match artifacts written by other players sharing the directory.
//!
//! An identifier whose parent directory is named like the cache root already
//! points at a cached artifact and maps to itself.

use crate::config::THUMBNAIL_EXTENSION;
use crate::error::ControlError;
use md5::{Digest, Md5};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key and artifact location for one source identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub key: String,
    pub path: PathBuf,
}

/// Derives cache keys and owns the cache root directory.
#[derive(Debug, Clone)]
pub struct CacheKeyCodec {
    root: PathBuf,
    namespace: String,
}

impl CacheKeyCodec {
    /// Creates a codec rooted at `root`. The namespace is the root's last
    /// path component. Nothing is created on disk until [`ensure_root`].
    ///
    /// [`ensure_root`]: CacheKeyCodec::ensure_root
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let namespace = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { root, namespace }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Creates the cache root and its parents if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::CacheUnavailable`] when the directory cannot be
    /// created, or when something other than a directory occupies the path.
    pub fn ensure_root(&self) -> Result<(), ControlError> {
        match fs::create_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && self.root.is_dir() => {
                Ok(())
            }
            Err(err) => Err(ControlError::CacheUnavailable(format!(
                "{}: {}",
                self.root.display(),
                err
            ))),
        }
    }

    /// Returns true when `source` already names an artifact of this cache.
    #[must_use]
    pub fn is_cached_artifact(&self, source: &str) -> bool {
        if self.namespace.is_empty() {
            return false;
        }
        Path::new(source)
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|parent| parent.to_string_lossy() == self.namespace)
    }

    /// Maps a source identifier to its key and artifact path.
    #[must_use]
    pub fn derive_key(&self, source: &str) -> CacheKey {
        if self.is_cached_artifact(source) {
            let path = PathBuf::from(source);
            let key = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| digest(source));
            return CacheKey { key, path };
        }

        let key = digest(source);
        let path = self.root.join(format!("{key}.{THUMBNAIL_EXTENSION}"));
        CacheKey { key, path }
    }
}

fn digest(source: &str) -> String {
    format!("{:x}", Md5::digest(source.as_bytes()))
}
