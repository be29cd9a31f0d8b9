//! Catalog Store and Filter Engine.
//!
//! - [`store`]: the immutable, ordered [`Catalog`]
//! - [`filter`](mod@filter): stateless derivation of the visible subset
//! - `source`: built-in catalog and TOML catalog files

pub mod filter;
mod source;
pub mod store;

pub use filter::{filter, FilterCriteria, GenreFilter};
pub use store::Catalog;
