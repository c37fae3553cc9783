// SPDX-License-Identifier: MPL-2.0
//! Disk-backed cache of preview images.
//!
//! # Flow
//!
//! 1. [`ThumbnailCache::resolve`] checks the in-memory entry table, then the
//!    artifact on disk. It only reads a PNG header and never waits on a load.
//! 2. On a miss, [`ThumbnailCache::fetch_and_cache`] spawns one background
//!    task per key: load through the [`ImageLoader`], encode to PNG, write to
//!    a temp file in the cache root and rename it into place.
//! 3. The task sends a [`FetchCompletion`] over a channel. The UI loop passes
//!    it to [`ThumbnailCache::complete`], which updates the entry and runs the
//!    callbacks of every caller that asked for that key.
//!
//! Entry state is only touched by `&mut self` methods, so it stays on the
//! thread that owns the cache. Background tasks see nothing but the source
//! string, the target path and the loader.
//!
//! # Degraded mode
//!
//! When the cache root cannot be created the cache keeps working as a
//! passthrough: every lookup misses, fetched previews are not written, and
//! the source identifier itself is reported as the display path.

use crate::application::port::ImageLoader;
use crate::domain::ui::AspectRatio;
use crate::error::ControlError;
use crate::media::thumbnail_key::{CacheKey, CacheKeyCodec};
use image_rs::{DynamicImage, ImageFormat};
use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::mpsc::UnboundedSender;

/// Lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Missing,
    Pending,
    Ready,
    Failed,
}

/// Snapshot of one cache entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    /// Artifact path, or the source itself when served in passthrough.
    pub path: PathBuf,
    pub status: EntryStatus,
    /// Set only when `status` is [`EntryStatus::Ready`].
    pub aspect_ratio: Option<AspectRatio>,
}

impl CacheEntry {
    fn missing(key: &CacheKey) -> Self {
        Self {
            key: key.key.clone(),
            path: key.path.clone(),
            status: EntryStatus::Missing,
            aspect_ratio: None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == EntryStatus::Ready
    }
}

/// Outcome of a background fetch, to be handed to [`ThumbnailCache::complete`]
/// on the thread that owns the cache.
#[derive(Debug, Clone)]
pub struct FetchCompletion {
    key: String,
    result: Result<FetchedPreview, ControlError>,
}

impl FetchCompletion {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Clone)]
struct FetchedPreview {
    path: PathBuf,
    aspect_ratio: AspectRatio,
}

type ReadyCallback = Box<dyn FnOnce(&Path, AspectRatio)>;
type FailedCallback = Box<dyn FnOnce(&ControlError)>;

struct Waiter {
    on_ready: ReadyCallback,
    on_failed: FailedCallback,
}

/// Content-addressed preview cache. See the module docs for the flow.
pub struct ThumbnailCache {
    codec: CacheKeyCodec,
    persist: bool,
    loader: Arc<dyn ImageLoader>,
    completions: UnboundedSender<FetchCompletion>,
    entries: HashMap<String, CacheEntry>,
    waiters: HashMap<String, Vec<Waiter>>,
}

impl std::fmt::Debug for ThumbnailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailCache")
            .field("root", &self.codec.root())
            .field("persist", &self.persist)
            .field("entries", &self.entries.len())
            .field("pending_keys", &self.waiters.len())
            .finish()
    }
}

impl ThumbnailCache {
    /// Creates the cache, creating its root directory on first use.
    ///
    /// If the root cannot be created the cache starts in passthrough mode
    /// instead of failing.
    pub fn new(
        codec: CacheKeyCodec,
        loader: Arc<dyn ImageLoader>,
        completions: UnboundedSender<FetchCompletion>,
    ) -> Self {
        let persist = match codec.ensure_root() {
            Ok(()) => {
                tracing::info!(root = %codec.root().display(), "thumbnail cache ready");
                true
            }
            Err(err) => {
                tracing::warn!(
                    key = err.diagnostic_key(),
                    error = %err,
                    "thumbnail cache running without persistence"
                );
                false
            }
        };

        Self {
            codec,
            persist,
            loader,
            completions,
            entries: HashMap::new(),
            waiters: HashMap::new(),
        }
    }

    /// Whether fetched previews are written to disk.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    #[must_use]
    pub fn codec(&self) -> &CacheKeyCodec {
        &self.codec
    }

    /// Artifact path a source maps to.
    #[must_use]
    pub fn path_for(&self, source: &str) -> PathBuf {
        self.codec.derive_key(source).path
    }

    /// Current entry for a source, if it was ever requested.
    #[must_use]
    pub fn entry(&self, source: &str) -> Option<&CacheEntry> {
        let key = self.codec.derive_key(source);
        self.entries.get(&key.key)
    }

    /// Synchronous lookup. Never waits on a load.
    ///
    /// Returns the known entry for a pending or ready key. Otherwise reads the
    /// artifact header from disk, so a failed entry turns ready once another
    /// process has written its artifact. Unreadable artifacts count as missing and
    /// will be overwritten by the next fetch.
    pub fn resolve(&mut self, source: &str) -> CacheEntry {
        let key = self.codec.derive_key(source);
        let known = self.entries.get(&key.key);
        if let Some(entry) = known {
            if matches!(entry.status, EntryStatus::Pending | EntryStatus::Ready) {
                return entry.clone();
            }
        }
        let failed = known.is_some_and(|entry| entry.status == EntryStatus::Failed);

        let mut entry = if self.persist {
            read_artifact(&key)
        } else {
            CacheEntry::missing(&key)
        };
        if failed && entry.status == EntryStatus::Missing {
            entry.status = EntryStatus::Failed;
        }
        self.entries.insert(key.key, entry.clone());
        entry
    }

    /// Starts a fetch for `source` if none is in flight for its key.
    ///
    /// - `Ready`: `on_ready` runs immediately.
    /// - `Pending`: the callbacks join the in-flight fetch; no new load starts.
    /// - `Missing` or `Failed`: one load is issued. A failed entry is only
    ///   retried when a caller asks again.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch_and_cache<R, F>(&mut self, source: &str, on_ready: R, on_failed: F)
    where
        R: FnOnce(&Path, AspectRatio) + 'static,
        F: FnOnce(&ControlError) + 'static,
    {
        let key = self.codec.derive_key(source);
        let entry = self
            .entries
            .entry(key.key.clone())
            .or_insert_with(|| CacheEntry::missing(&key));

        match entry.status {
            EntryStatus::Ready => {
                if let Some(ratio) = entry.aspect_ratio {
                    on_ready(&entry.path, ratio);
                }
                return;
            }
            EntryStatus::Pending => {
                tracing::debug!(key = %key.key, "joining in-flight thumbnail fetch");
                self.waiters.entry(key.key).or_default().push(Waiter {
                    on_ready: Box::new(on_ready),
                    on_failed: Box::new(on_failed),
                });
                return;
            }
            EntryStatus::Missing | EntryStatus::Failed => {
                entry.status = EntryStatus::Pending;
                entry.aspect_ratio = None;
                entry.path = key.path.clone();
            }
        }

        self.waiters.entry(key.key.clone()).or_default().push(Waiter {
            on_ready: Box::new(on_ready),
            on_failed: Box::new(on_failed),
        });
        self.spawn_fetch(source.to_string(), key);
    }

    /// [`fetch_and_cache`](Self::fetch_and_cache) without callbacks, for owners
    /// that read the entry returned by [`complete`](Self::complete) instead.
    pub fn request(&mut self, source: &str) {
        self.fetch_and_cache(source, |_, _| {}, |_| {});
    }

    /// Applies a finished fetch and notifies every waiter of its key.
    ///
    /// Returns the updated entry, or `None` when the completion does not match
    /// a pending entry.
    pub fn complete(&mut self, completion: FetchCompletion) -> Option<CacheEntry> {
        let FetchCompletion { key, result } = completion;
        let entry = self.entries.get_mut(&key)?;
        if entry.status != EntryStatus::Pending {
            tracing::debug!(%key, status = ?entry.status, "ignoring completion for settled entry");
            return None;
        }

        let waiters = self.waiters.remove(&key).unwrap_or_default();
        match result {
            Ok(preview) => {
                entry.status = EntryStatus::Ready;
                entry.path = preview.path;
                entry.aspect_ratio = Some(preview.aspect_ratio);
                let snapshot = entry.clone();
                tracing::debug!(%key, path = %snapshot.path.display(), "thumbnail ready");
                for waiter in waiters {
                    (waiter.on_ready)(&snapshot.path, preview.aspect_ratio);
                }
                Some(snapshot)
            }
            Err(err) => {
                entry.status = EntryStatus::Failed;
                entry.aspect_ratio = None;
                let snapshot = entry.clone();
                tracing::warn!(%key, key_kind = err.diagnostic_key(), error = %err, "thumbnail fetch failed");
                for waiter in waiters {
                    (waiter.on_failed)(&err);
                }
                Some(snapshot)
            }
        }
    }

    fn spawn_fetch(&self, source: String, key: CacheKey) {
        let loader = Arc::clone(&self.loader);
        let completions = self.completions.clone();
        let target = self.persist.then_some(key.path);
        let key = key.key;

        tokio::spawn(async move {
            let result = match loader.load(&source).await {
                Ok(image) => {
                    let stored = tokio::task::spawn_blocking(move || {
                        store_preview(&image, target.as_deref(), &source)
                    })
                    .await;
                    match stored {
                        Ok(result) => result,
                        Err(join_err) => Err(ControlError::FetchFailed(join_err.to_string())),
                    }
                }
                Err(err) => Err(ControlError::FetchFailed(err.to_string())),
            };

            // A closed channel means the UI loop is gone; nobody is left to notify.
            let _ = completions.send(FetchCompletion { key, result });
        });
    }
}

fn read_artifact(key: &CacheKey) -> CacheEntry {
    if !key.path.is_file() {
        return CacheEntry::missing(key);
    }

    let dimensions = image_rs::image_dimensions(&key.path);
    match dimensions
        .ok()
        .and_then(|(width, height)| AspectRatio::from_dimensions(width, height))
    {
        Some(ratio) => CacheEntry {
            key: key.key.clone(),
            path: key.path.clone(),
            status: EntryStatus::Ready,
            aspect_ratio: Some(ratio),
        },
        None => {
            tracing::warn!(path = %key.path.display(), "unreadable cached thumbnail, treating as missing");
            CacheEntry::missing(key)
        }
    }
}

fn store_preview(
    image: &DynamicImage,
    target: Option<&Path>,
    source: &str,
) -> Result<FetchedPreview, ControlError> {
    let aspect_ratio = AspectRatio::from_dimensions(image.width(), image.height())
        .ok_or_else(|| ControlError::FetchFailed(format!("{source}: image has no area")))?;

    let passthrough = FetchedPreview {
        path: PathBuf::from(source),
        aspect_ratio,
    };
    let Some(path) = target else {
        return Ok(passthrough);
    };

    match write_atomic(image, path) {
        Ok(()) => Ok(FetchedPreview {
            path: path.to_path_buf(),
            aspect_ratio,
        }),
        Err(err) => {
            let err = ControlError::CacheUnavailable(format!("{}: {}", path.display(), err));
            tracing::warn!(key = err.diagnostic_key(), error = %err, "serving thumbnail without persisting it");
            Ok(passthrough)
        }
    }
}

/// Encodes `image` as PNG next to `path` and renames it into place, so
/// readers see either no file or a complete one.
fn write_atomic(image: &DynamicImage, path: &Path) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::other("artifact path has no parent directory"))?;

    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, ImageFormat::Png)
        .map_err(io::Error::other)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(encoded.get_ref())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubLoader;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::tempdir;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn cache_in(
        root: PathBuf,
        loader: Arc<StubLoader>,
    ) -> (ThumbnailCache, UnboundedReceiver<FetchCompletion>) {
        let (tx, rx) = unbounded_channel();
        (ThumbnailCache::new(CacheKeyCodec::new(root), loader, tx), rx)
    }

    #[tokio::test]
    async fn resolve_reports_missing_on_empty_cache() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::image(64, 32));
        let (mut cache, _rx) = cache_in(temp.path().join("App"), loader.clone());

        let entry = cache.resolve("foo/video.mp4");

        assert_eq!(entry.status, EntryStatus::Missing);
        assert_eq!(entry.path, cache.path_for("foo/video.mp4"));
        assert_eq!(loader.calls(), 0);
    }

    #[tokio::test]
    async fn fetch_persists_png_and_reports_aspect_ratio() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::image(64, 32));
        let (mut cache, mut rx) = cache_in(temp.path().join("App"), loader.clone());

        let ready = Rc::new(Cell::new(0));
        let seen = ready.clone();
        cache.fetch_and_cache(
            "foo/video.mp4",
            move |_, ratio| {
                assert!((ratio.value() - 2.0).abs() < 1e-6);
                seen.set(seen.get() + 1);
            },
            |err| panic!("unexpected failure: {err}"),
        );

        let completion = rx.recv().await.expect("completion");
        let entry = cache.complete(completion).expect("pending entry");

        assert_eq!(ready.get(), 1);
        assert!(entry.is_ready());
        assert_eq!(entry.path, cache.path_for("foo/video.mp4"));
        assert_eq!(
            image_rs::image_dimensions(&entry.path).expect("valid png"),
            (64, 32)
        );
    }

    #[tokio::test]
    async fn duplicate_requests_share_one_load() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::image(10, 10));
        let (mut cache, mut rx) = cache_in(temp.path().join("App"), loader.clone());

        let ready = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let seen = ready.clone();
            cache.fetch_and_cache(
                "foo/video.mp4",
                move |_, _| seen.set(seen.get() + 1),
                |_| panic!("unexpected failure"),
            );
        }
        assert_eq!(cache.resolve("foo/video.mp4").status, EntryStatus::Pending);

        let completion = rx.recv().await.expect("completion");
        cache.complete(completion);

        assert_eq!(loader.calls(), 1);
        assert_eq!(ready.get(), 2);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn artifact_on_disk_resolves_without_loading() {
        let temp = tempdir().expect("temp dir");
        let root = temp.path().join("App");
        let loader = Arc::new(StubLoader::image(30, 10));

        let (mut first, mut rx) = cache_in(root.clone(), loader.clone());
        first.request("clip.mp4");
        let completion = rx.recv().await.expect("completion");
        first.complete(completion);

        let (mut second, _rx) = cache_in(root, loader.clone());
        let entry = second.resolve("clip.mp4");

        assert!(entry.is_ready());
        assert!((entry.aspect_ratio.expect("ratio").value() - 3.0).abs() < 1e-6);
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn resolving_cached_path_is_identity() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::image(8, 8));
        let (mut cache, mut rx) = cache_in(temp.path().join("App"), loader);

        cache.request("foo/video.mp4");
        let completion = rx.recv().await.expect("completion");
        cache.complete(completion);

        let artifact = cache.path_for("foo/video.mp4");
        let entry = cache.resolve(&artifact.to_string_lossy());
        assert_eq!(entry.path, artifact);
        assert!(entry.is_ready());
    }

    #[tokio::test]
    async fn no_temp_files_remain_after_fetch() {
        let temp = tempdir().expect("temp dir");
        let root = temp.path().join("App");
        let loader = Arc::new(StubLoader::image(8, 4));
        let (mut cache, mut rx) = cache_in(root.clone(), loader);

        cache.request("a.mp4");
        let completion = rx.recv().await.expect("completion");
        cache.complete(completion);

        let files: Vec<_> = fs::read_dir(&root)
            .expect("read root")
            .filter_map(|entry| entry.ok())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(fs::metadata(files[0].path()).expect("metadata").len() > 0);
    }

    #[tokio::test]
    async fn failed_load_marks_entry_and_notifies_once() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::failing());
        let (mut cache, mut rx) = cache_in(temp.path().join("App"), loader.clone());

        let failures = Rc::new(Cell::new(0));
        let seen = failures.clone();
        cache.fetch_and_cache(
            "missing.png",
            |_, _| panic!("unexpected success"),
            move |err| {
                assert!(matches!(err, ControlError::FetchFailed(_)));
                seen.set(seen.get() + 1);
            },
        );

        let completion = rx.recv().await.expect("completion");
        let entry = cache.complete(completion).expect("pending entry");

        assert_eq!(entry.status, EntryStatus::Failed);
        assert_eq!(failures.get(), 1);
        assert!(!cache.path_for("missing.png").exists());
        assert!(rx.try_recv().is_err(), "no automatic retry");
    }

    #[tokio::test]
    async fn failed_entry_is_retried_only_on_request() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::failing());
        let (mut cache, mut rx) = cache_in(temp.path().join("App"), loader.clone());

        cache.request("missing.png");
        let completion = rx.recv().await.expect("completion");
        cache.complete(completion);
        assert_eq!(cache.resolve("missing.png").status, EntryStatus::Failed);

        cache.request("missing.png");
        let completion = rx.recv().await.expect("completion");
        cache.complete(completion);
        assert_eq!(loader.calls(), 2);
    }

    #[tokio::test]
    async fn failed_entry_picks_up_artifact_written_elsewhere() {
        let temp = tempdir().expect("temp dir");
        let root = temp.path().join("App");

        let (mut local, mut local_rx) = cache_in(root.clone(), Arc::new(StubLoader::failing()));
        local.request("later.png");
        let completion = local_rx.recv().await.expect("completion");
        local.complete(completion);
        assert_eq!(local.resolve("later.png").status, EntryStatus::Failed);

        let (mut other, mut other_rx) = cache_in(root, Arc::new(StubLoader::image(20, 10)));
        other.request("later.png");
        let completion = other_rx.recv().await.expect("completion");
        other.complete(completion);

        let entry = local.resolve("later.png");
        assert!(entry.is_ready());
        assert!((entry.aspect_ratio.expect("ratio").value() - 2.0).abs() < 1e-6);
        assert_eq!(
            local.entry("later.png").map(|entry| entry.status),
            Some(EntryStatus::Ready)
        );
        assert!(local_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unavailable_root_degrades_to_passthrough() {
        let temp = tempdir().expect("temp dir");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"file").expect("write blocker");
        let loader = Arc::new(StubLoader::image(40, 20));
        let (mut cache, mut rx) = cache_in(blocker.join("App"), loader);

        assert!(!cache.is_persistent());
        assert_eq!(cache.resolve("foo/video.mp4").status, EntryStatus::Missing);

        cache.request("foo/video.mp4");
        let completion = rx.recv().await.expect("completion");
        let entry = cache.complete(completion).expect("pending entry");

        assert!(entry.is_ready());
        assert_eq!(entry.path, PathBuf::from("foo/video.mp4"));
        assert!((entry.aspect_ratio.expect("ratio").value() - 2.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn corrupt_artifact_is_treated_as_missing() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::image(8, 8));
        let (mut cache, _rx) = cache_in(temp.path().join("App"), loader);

        let path = cache.path_for("broken.mp4");
        fs::write(&path, b"").expect("write empty artifact");

        assert_eq!(cache.resolve("broken.mp4").status, EntryStatus::Missing);
    }

    #[tokio::test]
    async fn stale_completion_is_ignored() {
        let temp = tempdir().expect("temp dir");
        let loader = Arc::new(StubLoader::image(8, 8));
        let (mut cache, mut rx) = cache_in(temp.path().join("App"), loader);

        cache.request("a.mp4");
        let completion = rx.recv().await.expect("completion");
        assert_eq!(completion.key(), cache.codec().derive_key("a.mp4").key);
        let duplicate = completion.clone();

        assert!(cache.complete(completion).is_some());
        assert!(cache.complete(duplicate).is_none());
    }
}
