//! Catalog Store: the immutable, ordered source list of movie records.

use crate::domain::{KinotekaError, MovieId, MovieRecord, Result};
use std::collections::HashSet;

/// Ordered, immutable sequence of [`MovieRecord`]s.
///
/// Insertion order is the display order of the unfiltered view. Identifiers are
/// unique; there are no add/remove/edit operations after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub(super) records: Vec<MovieRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`KinotekaError::DuplicateMovieId`] for the first repeated id.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinoteka::catalog::Catalog;
    /// use kinoteka::domain::MovieRecord;
    ///
    /// let catalog = Catalog::new(vec![
    ///     MovieRecord::new(1, "Пчеловод", "Драма", "bee.jpg"),
    ///     MovieRecord::new(2, "Револьвер", "Экшн", "revol.jpg"),
    /// ])?;
    /// assert_eq!(catalog.len(), 2);
    /// # Ok::<(), kinoteka::KinotekaError>(())
    /// ```
    pub fn new(records: Vec<MovieRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(KinotekaError::DuplicateMovieId(record.id));
            }
        }

        tracing::debug!(movie_count = records.len(), "catalog created");
        Ok(Self { records })
    }

    /// All records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: MovieId) -> Option<&MovieRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: MovieId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct genres in order of first appearance.
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = Vec::new();
        for record in &self.records {
            if !genres.contains(&record.genre.as_str()) {
                genres.push(&record.genre);
            }
        }
        genres
    }
}
