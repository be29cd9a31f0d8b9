//! Domain layer for the catalog session.
//!
//! Core types shared by every other layer, independent of the presentation
//! collaborator and the asset provider.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie record model, identifiers and asset references
//!
//! # Examples
//!
//! ```
//! use kinoteka::domain::{MovieRecord, Result};
//!
//! fn beekeeper() -> Result<MovieRecord> {
//!     Ok(MovieRecord::new(1, "Пчеловод", "Драма", "images/bee.jpg"))
//! }
//! ```

pub mod error;
pub mod movie;

pub use error::{KinotekaError, Result};
pub use movie::{AssetRef, MediaKind, MovieId, MovieRecord};
