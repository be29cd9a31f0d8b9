//! Filter Engine: stateless derivation of the visible subset of a catalog.
//!
//! A record matches when
//!
//! 1. the title query is empty, or the case-folded title contains the
//!    case-folded query as a substring, **and**
//! 2. the genre filter is [`GenreFilter::All`] or equals the record's genre
//!    exactly (case-sensitive).
//!
//! The query is used literally: no trimming, no tokenization. A whitespace-only
//! query therefore matches only titles containing that whitespace.

use crate::domain::MovieRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Genre selector: every genre, or one exact genre name.
///
/// Converts from and to the string form used by the presentation layer, where
/// `"all"` is the catch-all sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    /// Sentinel string for [`GenreFilter::All`].
    pub const ALL: &'static str = "all";

    #[must_use]
    pub fn accepts(&self, genre: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == genre,
        }
    }
}

impl From<&str> for GenreFilter {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<String> for GenreFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<GenreFilter> for String {
    fn from(value: GenreFilter) -> Self {
        match value {
            GenreFilter::All => GenreFilter::ALL.to_string(),
            GenreFilter::Only(genre) => genre,
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Only(genre) => f.write_str(genre),
        }
    }
}

/// Criteria for one filter pass. Replaced as a whole on each filter intent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub title_query: String,
    pub genre: GenreFilter,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(title_query: impl Into<String>, genre: impl Into<GenreFilter>) -> Self {
        Self {
            title_query: title_query.into(),
            genre: genre.into(),
        }
    }

    /// Whether both fields are at their defaults (empty query, every genre).
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.title_query.is_empty() && self.genre == GenreFilter::All
    }

    /// Per-record predicate.
    #[must_use]
    pub fn matches(&self, record: &MovieRecord) -> bool {
        self.matcher().matches(record)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            folded_query: self.title_query.to_lowercase(),
            genre: &self.genre,
        }
    }
}

/// Criteria with the query case-folded once, reused across a filter pass.
struct Matcher<'c> {
    folded_query: String,
    genre: &'c GenreFilter,
}

impl Matcher<'_> {
    fn matches(&self, record: &MovieRecord) -> bool {
        self.matches_title(&record.title) && self.genre.accepts(&record.genre)
    }

    fn matches_title(&self, title: &str) -> bool {
        self.folded_query.is_empty() || title.to_lowercase().contains(&self.folded_query)
    }
}

/// Returns the records matching `criteria`, in catalog order.
///
/// Pure: no state is kept between calls, so it is safe to run on every
/// keystroke.
///
/// # Examples
///
/// ```
/// use kinoteka::catalog::{filter, FilterCriteria};
/// use kinoteka::domain::MovieRecord;
///
/// let movies = vec![
///     MovieRecord::new(1, "Пчеловод", "Драма", "bee.jpg"),
///     MovieRecord::new(2, "Револьвер", "Экшн", "revol.jpg"),
/// ];
/// let visible = filter(&movies, &FilterCriteria::new("рево", "all"));
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].id.0, 2);
/// ```
#[must_use]
pub fn filter<'a>(catalog: &'a [MovieRecord], criteria: &FilterCriteria) -> Vec<&'a MovieRecord> {
    let _span = tracing::trace_span!(
        "filter",
        total_movies = catalog.len(),
        query_len = criteria.title_query.len(),
        genre = %criteria.genre
    )
    .entered();

    if criteria.is_default() {
        return catalog.iter().collect();
    }

    let matcher = criteria.matcher();
    let visible: Vec<&MovieRecord> = catalog
        .iter()
        .filter(|record| matcher.matches(record))
        .collect();

    tracing::trace!(visible_count = visible.len(), "filter applied");
    visible
}
