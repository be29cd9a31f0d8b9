//! Media playback: the single-resource session and the asset-provider seam.
//!
//! # Modules
//!
//! - [`provider`]: `AssetProvider` / `MediaResource` traits and the filesystem provider
//! - [`session`]: token-based playback state machine

pub mod provider;
pub mod session;

pub use provider::{AssetProvider, ClipBuffer, FsAssetProvider, LoadResult, MediaResource};
pub use session::{LoadOutcome, LoadRequest, LoadToken, PlaybackPhase, PlaybackSession};
