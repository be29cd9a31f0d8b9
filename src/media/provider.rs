//! Asset provider seam.
//!
//! The playback session never inspects a resource's format. It only asks an
//! [`AssetProvider`] to turn an [`AssetRef`] into a loaded [`MediaResource`],
//! then starts and eventually releases that resource.
//!
//! [`FsAssetProvider`] is the provider used by the binary: it resolves asset
//! references against a root directory and loads the clip bytes into memory.
//! The read is a plain blocking `std::fs::read` performed on the first poll of
//! the load future, so it runs on the thread driving the session (inside
//! `SessionDriver::poll_ready`) and the future never returns `Pending`. Clips
//! are small local files; a provider backed by slow storage or the network
//! should hand the work to its own executor and return a future that waits on it.

use crate::domain::{AssetRef, KinotekaError, MediaKind, MovieId, Result};
use futures_util::future::{FutureExt, LocalBoxFuture};
use std::fmt;
use std::path::{Path, PathBuf};

/// A loaded audio/video resource holding native handles or buffers.
///
/// Exclusively owned by the playback session once the load completes.
pub trait MediaResource: fmt::Debug {
    /// Begins playback of the loaded resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot start; the session then
    /// releases it and reports a load failure.
    fn start(&mut self) -> Result<()>;

    /// Stops playback and frees every handle the resource holds.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing fails. The resource is considered gone
    /// either way.
    fn release(self: Box<Self>) -> Result<()>;
}

/// Result of one asynchronous load.
pub type LoadResult = Result<Box<dyn MediaResource>>;

/// Resolves opaque asset references into loadable media resources.
///
/// Loads are asynchronous relative to the caller. The returned future must not
/// borrow the provider, so that the session can keep handling intents while
/// the load is in flight.
pub trait AssetProvider {
    /// Starts loading `asset` for `movie_id`.
    fn load(&self, movie_id: MovieId, kind: MediaKind, asset: &AssetRef) -> LocalBoxFuture<'static, LoadResult>;
}

/// Filesystem-backed provider: asset references are paths relative to `root`.
///
/// Loads complete on their first poll and block the polling thread for the
/// duration of the file read.
#[derive(Debug, Clone)]
pub struct FsAssetProvider {
    root: PathBuf,
}

impl FsAssetProvider {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an asset reference to a path under the root.
    ///
    /// Absolute references are used as-is.
    #[must_use]
    pub fn resolve(&self, asset: &AssetRef) -> PathBuf {
        let path = Path::new(asset.as_str());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AssetProvider for FsAssetProvider {
    fn load(&self, movie_id: MovieId, kind: MediaKind, asset: &AssetRef) -> LocalBoxFuture<'static, LoadResult> {
        read_clip(self.resolve(asset), movie_id, kind).boxed_local()
    }
}

/// Reads the whole clip synchronously once polled.
async fn read_clip(path: PathBuf, movie_id: MovieId, kind: MediaKind) -> LoadResult {
    tracing::debug!(movie_id = %movie_id, kind = %kind, path = %path.display(), "loading clip");

    let bytes = std::fs::read(&path).map_err(|e| KinotekaError::MediaLoad {
        movie_id,
        reason: format!("{}: {e}", path.display()),
    })?;

    if bytes.is_empty() {
        return Err(KinotekaError::MediaLoad {
            movie_id,
            reason: format!("{} is empty", path.display()),
        });
    }

    Ok(Box::new(ClipBuffer {
        path,
        kind,
        bytes,
        playing: false,
    }))
}

/// In-memory clip loaded by [`FsAssetProvider`].
pub struct ClipBuffer {
    path: PathBuf,
    kind: MediaKind,
    bytes: Vec<u8>,
    playing: bool,
}

impl ClipBuffer {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }
}

impl MediaResource for ClipBuffer {
    fn start(&mut self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), kind = %self.kind, bytes = self.bytes.len(), "clip started");
        self.playing = true;
        Ok(())
    }

    fn release(self: Box<Self>) -> Result<()> {
        tracing::debug!(path = %self.path.display(), was_playing = self.playing, "clip released");
        Ok(())
    }
}

impl fmt::Debug for ClipBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipBuffer")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .field("playing", &self.playing)
            .finish()
    }
}
