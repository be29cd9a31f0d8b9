//! Catalog sources: the built-in movie list and TOML catalog files.
//!
//! # File Format
//!
//! ```toml
//! [[movie]]
//! id = 1
//! title = "Пчеловод"
//! genre = "Драма"
//! image = "images/bee.jpg"
//! video = "videos/beekeeper.mp4"
//! audio = "audio/beekeeper.mp3"
//! ```

use super::store::Catalog;
use crate::domain::{MovieRecord, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "movie", default)]
    movies: Vec<MovieRecord>,
}

impl Catalog {
    /// The static catalog shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            records: builtin_movies(),
        }
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`KinotekaError::CatalogFormat`](crate::KinotekaError::CatalogFormat)
    /// for malformed TOML and
    /// [`KinotekaError::DuplicateMovieId`](crate::KinotekaError::DuplicateMovieId)
    /// for repeated ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinoteka::catalog::Catalog;
    ///
    /// let catalog = Catalog::from_toml_str(r#"
    ///     [[movie]]
    ///     id = 2
    ///     title = "Револьвер"
    ///     genre = "Экшн"
    ///     image = "images/revol.jpg"
    /// "#)?;
    /// assert_eq!(catalog.len(), 1);
    /// # Ok::<(), kinoteka::KinotekaError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.movies)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// I/O errors, plus everything [`Catalog::from_toml_str`] can return.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("load_catalog", path = %path.display()).entered();

        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&text)?;

        tracing::debug!(movie_count = catalog.len(), "catalog file loaded");
        Ok(catalog)
    }
}

fn builtin_movies() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new(1, "Пчеловод", "Драма", "images/bee.jpg")
            .with_video("videos/beekeeper.mp4")
            .with_audio("audio/beekeeper.mp3"),
        MovieRecord::new(2, "Револьвер", "Экшн", "images/revol.jpg")
            .with_video("videos/revolver.mp4")
            .with_audio("audio/revolver.mp3"),
        MovieRecord::new(3, "Шальная карта", "Комедия", "images/card.jpg"),
        MovieRecord::new(4, "Большой куш", "Криминал", "images/snatch.jpg"),
        MovieRecord::new(5, "Перевозчик", "Экшн", "images/perevoz.jpg"),
    ]
}
