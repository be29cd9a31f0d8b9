//! Presentation-facing snapshots computed from session state.

pub mod snapshot;

pub use snapshot::{MovieCard, PlaybackStatus, SessionSnapshot};
