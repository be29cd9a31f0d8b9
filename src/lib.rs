//! Kinoteka: session core for a movie catalog screen.
//!
//! Kinoteka keeps the state behind a catalog browsing screen and nothing
//! else. Rendering belongs to an external presentation collaborator and
//! asset loading to an asset provider. It provides:
//! - Title and genre filtering derived on demand from the current criteria
//! - A detail view ("modal") opened for at most one movie at a time
//! - An in-memory favorites set independent of filtering
//! - Audio/video playback with at most one live resource and stale-load
//!   cancellation by token

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Headless shim (main.rs)                            │  ← JSON intents in,
//! └─────────────────────────────────────────────────────┘    snapshots out
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Executes actions,
//! │  - SessionDriver                                    │    polls pending loads
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Intent handling, actions                         │
//! │  - Selection, favorites, color scheme               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Media         │   │ View          │
//! │ (catalog/)    │   │ (media/)      │   │ (view/)       │
//! │ - Store       │   │ - Playback    │   │ - Snapshots   │
//! │ - Filter      │   │ - Providers   │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types, movie model (domain/)               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← JSON log file
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: session state machine with the intent/action model
//! - [`catalog`]: catalog store, filter engine and catalog files
//! - [`domain`]: movie model and errors
//! - [`infrastructure`]: platform paths
//! - [`media`]: playback session and asset providers
//! - [`observability`]: tracing setup
//! - [`runtime`]: single-threaded driver for asynchronous loads
//! - [`view`]: render-ready snapshots
//!
//! # Configuration
//!
//! The binary takes `key=value` arguments:
//!
//! ```text
//! kinoteka catalog_file=~/movies.toml asset_root=~/kinoteka/assets color_scheme=dark trace_level=debug
//! ```
//!
//! # Examples
//!
//! ```rust
//! use kinoteka::{initialize, Config, FsAssetProvider, Intent, MovieId, SessionDriver};
//!
//! let state = initialize(&Config::default())?;
//! let mut driver = SessionDriver::new(state, FsAssetProvider::new("assets"));
//!
//! driver.dispatch(Intent::SetTitleQuery { text: "револ".into() })?;
//! driver.dispatch(Intent::SelectMovie { id: MovieId(2) })?;
//!
//! let snapshot = driver.snapshot();
//! assert_eq!(snapshot.visible_movies.len(), 1);
//! assert!(snapshot.selected_movie.is_some());
//! # Ok::<(), kinoteka::KinotekaError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Derived Visible Set
//!
//! The filtered list is recomputed from the catalog and the criteria whenever
//! it is read, so it can never drift from either.
//!
//! ## Close Before Open
//!
//! Any transition away from an open movie stops its playback first. The
//! playback session's source movie is always the open movie or none.
//!
//! ## Staleness Instead of Interruption
//!
//! Loads are never cancelled mid-flight. Each `play` takes a fresh token and
//! completions carrying an old token are discarded, with their resource
//! released on arrival.

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod media;
pub mod observability;
pub mod runtime;
pub mod view;

pub use app::{handle_event, Action, AppState, ColorScheme, Event, Intent};
pub use catalog::{Catalog, FilterCriteria, GenreFilter};
pub use domain::{AssetRef, KinotekaError, MediaKind, MovieId, MovieRecord, Result};
pub use media::{AssetProvider, FsAssetProvider, MediaResource};
pub use runtime::SessionDriver;
pub use view::SessionSnapshot;

use std::collections::BTreeMap;

/// Default directory asset references are resolved against.
pub const DEFAULT_ASSET_ROOT: &str = "assets";

/// Session configuration.
///
/// # Example
///
/// ```text
/// catalog_file=~/movies.toml
/// asset_root=/srv/kinoteka
/// color_scheme=dark
/// trace_level=debug
/// log_file=/tmp/kinoteka.log
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TOML catalog file. The built-in catalog is used when unset.
    pub catalog_file: Option<String>,

    /// Directory for relative asset references. Default: `"assets"`
    pub asset_root: String,

    /// Initial color scheme. Default: light
    pub color_scheme: ColorScheme,

    /// Log level directive for the subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log file path. Default: `kinoteka.log` in the data directory.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: None,
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            color_scheme: ColorScheme::default(),
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `catalog_file`: `Option<String>` (empty values ignored)
    /// - `asset_root`: `String` (falls back to `"assets"` when empty)
    /// - `color_scheme`: `"light"`/`"dark"` (falls back to light on anything else)
    /// - `trace_level`: `Option<String>`
    /// - `log_file`: `Option<String>`
    ///
    /// Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use kinoteka::{ColorScheme, Config};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("color_scheme".to_string(), "dark".to_string());
    /// map.insert("asset_root".to_string(), "/srv/kinoteka".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.color_scheme, ColorScheme::Dark);
    /// assert_eq!(config.asset_root, "/srv/kinoteka");
    /// assert!(config.catalog_file.is_none());
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let color_scheme = config.get("color_scheme").map_or_else(ColorScheme::default, |name| {
            ColorScheme::from_name(name).unwrap_or_else(|| {
                tracing::debug!(color_scheme = %name, "unknown color scheme, using default");
                ColorScheme::default()
            })
        });

        for key in config.keys() {
            if !matches!(
                key.as_str(),
                "catalog_file" | "asset_root" | "color_scheme" | "trace_level" | "log_file"
            ) {
                tracing::debug!(key = %key, "ignoring unknown configuration key");
            }
        }

        Self {
            catalog_file: non_empty("catalog_file"),
            asset_root: non_empty("asset_root").unwrap_or_else(|| DEFAULT_ASSET_ROOT.to_string()),
            color_scheme,
            trace_level: non_empty("trace_level"),
            log_file: non_empty("log_file"),
        }
    }
}

/// Builds the initial session state from configuration.
///
/// Loads the catalog file if one is configured, otherwise the built-in
/// catalog, and applies the configured color scheme. The session starts with
/// default criteria, nothing open, no favorites and no playback.
///
/// # Errors
///
/// Returns catalog loading errors ([`KinotekaError::Io`],
/// [`KinotekaError::CatalogFormat`], [`KinotekaError::DuplicateMovieId`]).
///
/// # Example
///
/// ```rust
/// use kinoteka::{initialize, Config};
///
/// let state = initialize(&Config::default())?;
/// assert_eq!(state.catalog().len(), 5);
/// assert!(!state.playback_active());
/// # Ok::<(), kinoteka::KinotekaError>(())
/// ```
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!("initializing kinoteka session");

    let catalog = match config.catalog_file.as_deref() {
        Some(path) => Catalog::from_file(infrastructure::expand_tilde(path))?,
        None => Catalog::builtin(),
    };

    tracing::info!(
        movie_count = catalog.len(),
        color_scheme = ?config.color_scheme,
        "session initialized"
    );

    Ok(AppState::new(catalog, config.color_scheme))
}
