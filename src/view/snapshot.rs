//! Render-ready snapshot of the session.
//!
//! A [`SessionSnapshot`] is computed from [`AppState`] after each event and
//! handed to the presentation layer. It contains no logic, only display-ready
//! data: the derived visible and favorite lists with membership flags, the
//! open movie, and the playback status.
//!
//! # Example
//!
//! ```rust
//! use kinoteka::app::{AppState, ColorScheme};
//! use kinoteka::catalog::Catalog;
//! use kinoteka::view::SessionSnapshot;
//!
//! let state = AppState::new(Catalog::builtin(), ColorScheme::Dark);
//! let snapshot = SessionSnapshot::capture(&state);
//! assert_eq!(snapshot.visible_movies.len(), 5);
//! assert!(!snapshot.playback_active);
//! ```

use crate::app::{AppState, ColorScheme, Selection};
use crate::catalog::FilterCriteria;
use crate::domain::{MediaKind, MovieId, MovieRecord, Result};
use crate::media::PlaybackPhase;
use serde::Serialize;

/// Complete view of the session for one render.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Records matching the current criteria, in catalog order.
    pub visible_movies: Vec<MovieCard>,

    /// Favorites in insertion order, regardless of the filter.
    pub favorite_movies: Vec<MovieCard>,

    pub selection: Selection,

    /// Full record of the open movie, for the detail view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_movie: Option<MovieRecord>,

    /// `true` while a clip is loading or playing.
    pub playback_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback: Option<PlaybackStatus>,

    pub filter: FilterCriteria,

    /// Distinct catalog genres for the genre selector.
    pub genres: Vec<String>,

    pub color_scheme: ColorScheme,
}

/// One movie row or tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: MovieRecord,
    pub is_favorite: bool,
}

/// Details of the loading or playing clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackStatus {
    pub movie_id: MovieId,
    pub kind: MediaKind,
    pub phase: PlaybackPhase,
    /// RFC 3339 time the phase was entered.
    pub since: String,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(state: &AppState) -> Self {
        let card = |movie: &MovieRecord| MovieCard {
            movie: movie.clone(),
            is_favorite: state.favorites().contains(movie.id),
        };

        let playback = state.playback();
        let playback = match (playback.source_movie(), playback.kind(), playback.since()) {
            (Some(movie_id), Some(kind), Some(since)) => Some(PlaybackStatus {
                movie_id,
                kind,
                phase: playback.phase(),
                since: since.to_rfc3339(),
            }),
            _ => None,
        };

        Self {
            visible_movies: state.visible_movies().into_iter().map(card).collect(),
            favorite_movies: state.favorite_movies().into_iter().map(card).collect(),
            selection: state.selection(),
            selected_movie: state.selected_movie().cloned(),
            playback_active: state.playback_active(),
            playback,
            filter: state.criteria().clone(),
            genres: state.catalog().genres().into_iter().map(String::from).collect(),
            color_scheme: state.color_scheme(),
        }
    }

    /// Encodes the snapshot as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns [`KinotekaError::Json`](crate::domain::KinotekaError::Json) if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
