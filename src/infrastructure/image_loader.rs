// SPDX-License-Identifier: MPL-2.0
//! Image loader adapters implementing the [`ImageLoader`] port.
//!
//! - [`FsImageLoader`]: decodes local files on the blocking pool
//! - [`HttpImageLoader`]: downloads `http(s)` sources with `reqwest`
//! - [`SourceImageLoader`]: picks one of the above per source identifier
//!
//! [`ImageLoader`]: crate::application::port::ImageLoader

use crate::application::port::{ImageLoader, LoadError};
use futures_util::future::{BoxFuture, FutureExt};
use futures_util::StreamExt;
use image_rs::{DynamicImage, ImageError};
use std::path::{Path, PathBuf};

/// Upper bound on a downloaded preview. Larger bodies are rejected.
const MAX_PREVIEW_BYTES: usize = 32 * 1024 * 1024;

/// Maximum redirects followed for remote previews.
const MAX_REDIRECTS: usize = 10;

/// Returns true for identifiers fetched over the network.
#[must_use]
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Loads previews from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, source: &str) -> BoxFuture<'static, Result<DynamicImage, LoadError>> {
        let path = PathBuf::from(source.strip_prefix("file://").unwrap_or(source));
        async move {
            tokio::task::spawn_blocking(move || open_local(&path))
                .await
                .map_err(|e| LoadError::Io(e.to_string()))?
        }
        .boxed()
    }
}

fn open_local(path: &Path) -> Result<DynamicImage, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }
    image_rs::open(path).map_err(|err| match err {
        ImageError::IoError(io) => LoadError::Io(io.to_string()),
        other => LoadError::Decode(other.to_string()),
    })
}

/// Downloads previews over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    client: reqwest::Client,
}

impl HttpImageLoader {
    /// Builds a loader with a bounded redirect policy.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Network`] if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("PlayerOverlay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(&self, source: &str) -> BoxFuture<'static, Result<DynamicImage, LoadError>> {
        let client = self.client.clone();
        let url = source.to_string();
        async move {
            let bytes = download(&client, &url).await?;
            tokio::task::spawn_blocking(move || {
                image_rs::load_from_memory(&bytes).map_err(|e| LoadError::Decode(e.to_string()))
            })
            .await
            .map_err(|e| LoadError::Io(e.to_string()))?
        }
        .boxed()
    }
}

async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, LoadError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(LoadError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(LoadError::Network(format!("HTTP status: {status}")));
    }

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| LoadError::Network(e.to_string()))?;
        if body.len() + chunk.len() > MAX_PREVIEW_BYTES {
            return Err(LoadError::Network(format!(
                "preview larger than {MAX_PREVIEW_BYTES} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Routes each source to the network or filesystem loader.
#[derive(Debug, Clone)]
pub struct SourceImageLoader {
    fs: FsImageLoader,
    http: HttpImageLoader,
}

impl SourceImageLoader {
    /// # Errors
    ///
    /// Returns [`LoadError::Network`] if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, LoadError> {
        Ok(Self {
            fs: FsImageLoader,
            http: HttpImageLoader::new()?,
        })
    }
}

impl ImageLoader for SourceImageLoader {
    fn load(&self, source: &str) -> BoxFuture<'static, Result<DynamicImage, LoadError>> {
        if is_remote(source) {
            self.http.load(source)
        } else {
            self.fs.load(source)
        }
    }
}
