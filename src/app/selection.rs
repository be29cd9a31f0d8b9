//! Selection/Modal Controller.
//!
//! Tracks which movie, if any, has its detail view open. There is no terminal
//! state: the controller cycles between `Closed` and `Open` for the lifetime of
//! the session. Playback teardown on close is the caller's job and must happen
//! before the transition; see [`AppState::close_detail`](super::AppState::close_detail).

use crate::catalog::Catalog;
use crate::domain::MovieId;
use serde::Serialize;

/// Detail-view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "movie_id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Closed,
    Open(MovieId),
}

impl Selection {
    #[must_use]
    pub const fn open_movie(self) -> Option<MovieId> {
        match self {
            Self::Closed => None,
            Self::Open(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Result of a `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The movie is now open; `previous` was open before and is now closed.
    Opened { previous: Option<MovieId> },
    /// The movie was already open.
    Unchanged,
    /// The id is not in the catalog; nothing changed.
    Unknown,
}

/// Two-state machine over [`Selection`].
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    current: Selection,
}

impl SelectionController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Selection::Closed,
        }
    }

    #[must_use]
    pub const fn current(&self) -> Selection {
        self.current
    }

    /// Opens `movie_id` if the catalog knows it.
    pub fn select(&mut self, catalog: &Catalog, movie_id: MovieId) -> SelectOutcome {
        if !catalog.contains(movie_id) {
            tracing::debug!(movie_id = %movie_id, "select ignored: unknown movie");
            return SelectOutcome::Unknown;
        }

        let previous = self.current.open_movie();
        if previous == Some(movie_id) {
            return SelectOutcome::Unchanged;
        }

        self.current = Selection::Open(movie_id);
        tracing::debug!(movie_id = %movie_id, previous = ?previous, "detail opened");
        SelectOutcome::Opened { previous }
    }

    /// Closes the detail view, returning the movie that was open.
    pub fn close(&mut self) -> Option<MovieId> {
        let previous = self.current.open_movie();
        self.current = Selection::Closed;
        previous
    }
}
