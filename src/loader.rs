//! Asset loading for the replay runner.
//!
//! The engine only needs an image's natural size, so the filesystem loader
//! reads the header and never decodes pixels. Header parsing is blocking
//! I/O and runs on the blocking pool.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use std::path::{Component, Path, PathBuf};

/// Natural pixel size of a decoded panorama image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Errors produced while resolving or reading an asset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("unsupported asset url: {0}")]
    UnsupportedUrl(String),

    #[error("asset url escapes the assets root: {0}")]
    OutsideRoot(String),

    #[error("image header unreadable: {0}")]
    Image(#[from] image::ImageError),

    #[error("loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Resolves an image URL to its natural size. Enables stubbing in tests.
#[async_trait::async_trait]
pub trait AssetLoader: Send + Sync {
    /// Fetch enough of `url` to know its size.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the asset is missing or not a readable image.
    async fn load(&self, url: &str) -> Result<ImageSize, LoadError>;
}

/// Loads assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an image URL onto a path under the assets root.
    ///
    /// # Errors
    ///
    /// Rejects URLs with a scheme and relative paths that climb out of the root.
    pub fn resolve(&self, url: &str) -> Result<PathBuf, LoadError> {
        if url.contains("://") {
            return Err(LoadError::UnsupportedUrl(url.to_owned()));
        }
        let relative = Path::new(url.trim_start_matches('/'));
        if relative.components().any(|c| matches!(c, Component::ParentDir | Component::Prefix(_))) {
            return Err(LoadError::OutsideRoot(url.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait::async_trait]
impl AssetLoader for FsAssetLoader {
    async fn load(&self, url: &str) -> Result<ImageSize, LoadError> {
        let path = self.resolve(url)?;
        tracing::debug!(path = %path.display(), "reading image header");
        tokio::task::spawn_blocking(move || {
            if !path.is_file() {
                return Err(LoadError::NotFound(path.display().to_string()));
            }
            let (width, height) = image::image_dimensions(&path)?;
            Ok(ImageSize { width, height })
        })
        .await?
    }
}
