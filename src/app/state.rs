//! Catalog session state.
//!
//! [`AppState`] is the single owner of everything the screen needs: the
//! catalog, the current filter criteria, the selection, the favorites, the
//! playback session and the color scheme. It replaces scattered per-widget
//! variables with one object whose invariants can be checked without any
//! rendering.
//!
//! # Invariants
//!
//! - The visible set is never stored; [`AppState::visible_movies`] derives it
//!   from the catalog and the criteria on every call.
//! - The playback session's source movie is always the open movie, or none.
//!   Every transition away from an open movie stops playback first.
//! - At most one media resource is held at any time.
//!
//! # Example
//!
//! ```rust
//! use kinoteka::app::{AppState, ColorScheme};
//! use kinoteka::catalog::Catalog;
//! use kinoteka::domain::MovieId;
//!
//! let mut state = AppState::new(Catalog::builtin(), ColorScheme::Light);
//! state.set_title_query("рево");
//! let ids: Vec<_> = state.visible_movies().iter().map(|m| m.id).collect();
//! assert_eq!(ids, vec![MovieId(2), MovieId(5)]);
//! ```

use super::favorites::Favorites;
use super::modes::ColorScheme;
use super::selection::{SelectOutcome, Selection, SelectionController};
use crate::catalog::{filter, Catalog, FilterCriteria, GenreFilter};
use crate::domain::{KinotekaError, MediaKind, MovieId, MovieRecord, Result};
use crate::media::{LoadOutcome, LoadRequest, LoadResult, LoadToken, PlaybackSession};

/// Central session state container.
#[derive(Debug)]
pub struct AppState {
    catalog: Catalog,
    criteria: FilterCriteria,
    selection: SelectionController,
    favorites: Favorites,
    playback: PlaybackSession,
    color_scheme: ColorScheme,
}

impl AppState {
    /// Creates a session over `catalog` with default criteria, nothing open,
    /// no favorites and no playback.
    #[must_use]
    pub fn new(catalog: Catalog, color_scheme: ColorScheme) -> Self {
        Self {
            catalog,
            criteria: FilterCriteria::default(),
            selection: SelectionController::new(),
            favorites: Favorites::new(),
            playback: PlaybackSession::new(),
            color_scheme,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection.current()
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub const fn playback(&self) -> &PlaybackSession {
        &self.playback
    }

    #[must_use]
    pub const fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// Catalog records matching the current criteria, in catalog order.
    #[must_use]
    pub fn visible_movies(&self) -> Vec<&MovieRecord> {
        filter(self.catalog.records(), &self.criteria)
    }

    /// Favorite records in the order they were added.
    #[must_use]
    pub fn favorite_movies(&self) -> Vec<&MovieRecord> {
        self.favorites
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    /// The record whose detail view is open.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieRecord> {
        self.selection
            .current()
            .open_movie()
            .and_then(|id| self.catalog.get(id))
    }

    #[must_use]
    pub const fn playback_active(&self) -> bool {
        self.playback.is_active()
    }

    /// Replaces the title query, keeping the genre. Returns `true` if it changed.
    pub fn set_title_query(&mut self, text: impl Into<String>) -> bool {
        let next = FilterCriteria {
            title_query: text.into(),
            genre: self.criteria.genre.clone(),
        };
        self.replace_criteria(next)
    }

    /// Replaces the genre filter, keeping the query. Returns `true` if it changed.
    pub fn set_genre(&mut self, genre: impl Into<GenreFilter>) -> bool {
        let next = FilterCriteria {
            title_query: self.criteria.title_query.clone(),
            genre: genre.into(),
        };
        self.replace_criteria(next)
    }

    /// Resets the criteria to show the whole catalog.
    pub fn clear_filters(&mut self) -> bool {
        self.replace_criteria(FilterCriteria::default())
    }

    fn replace_criteria(&mut self, next: FilterCriteria) -> bool {
        if self.criteria == next {
            return false;
        }
        tracing::debug!(title_query = %next.title_query, genre = %next.genre, "filter criteria replaced");
        self.criteria = next;
        true
    }

    /// Opens the detail view for `movie_id`.
    ///
    /// A different movie that is already open is closed first, which stops its
    /// playback. Re-selecting the open movie is a no-op.
    ///
    /// # Errors
    ///
    /// [`KinotekaError::UnknownMovieId`] if the catalog lacks the id; the state
    /// is unchanged.
    pub fn select_movie(&mut self, movie_id: MovieId) -> Result<bool> {
        if !self.catalog.contains(movie_id) {
            return Err(KinotekaError::UnknownMovieId(movie_id));
        }

        if let Some(open) = self.selection.current().open_movie() {
            if open == movie_id {
                return Ok(false);
            }
            self.close_detail();
        }

        match self.selection.select(&self.catalog, movie_id) {
            SelectOutcome::Opened { .. } => Ok(true),
            SelectOutcome::Unchanged => Ok(false),
            SelectOutcome::Unknown => Err(KinotekaError::UnknownMovieId(movie_id)),
        }
    }

    /// Closes the detail view, stopping its playback before the transition.
    ///
    /// Returns `true` if a movie was open.
    pub fn close_detail(&mut self) -> bool {
        let Some(open) = self.selection.current().open_movie() else {
            return false;
        };

        if let Some(source) = self.playback.source_movie() {
            debug_assert_eq!(source, open, "playback must belong to the open movie");
            tracing::debug!(movie_id = %open, "closing detail with active playback");
            self.playback.stop();
        }

        self.selection.close();
        tracing::debug!(movie_id = %open, "detail closed");
        true
    }

    /// Flips favorite membership of `movie_id`. Returns the new membership.
    ///
    /// # Errors
    ///
    /// [`KinotekaError::UnknownMovieId`] if the catalog lacks the id.
    pub fn toggle_favorite(&mut self, movie_id: MovieId) -> Result<bool> {
        if !self.catalog.contains(movie_id) {
            return Err(KinotekaError::UnknownMovieId(movie_id));
        }
        let member = self.favorites.toggle(movie_id);
        tracing::debug!(movie_id = %movie_id, favorite = member, "favorite toggled");
        Ok(member)
    }

    /// Starts loading a clip of the open movie.
    ///
    /// `kind` defaults to audio, then video. Any active or pending playback is
    /// stopped first; the returned request must be passed to the asset provider.
    ///
    /// # Errors
    ///
    /// - [`KinotekaError::UnknownMovieId`] if the catalog lacks the id
    /// - [`KinotekaError::NotOpen`] if the movie's detail view is not open
    /// - [`KinotekaError::MediaUnavailable`] if the movie has no clip of the requested kind
    /// - [`KinotekaError::NoPlayableMedia`] if no kind was requested and the movie has no clip
    ///
    /// None of these change the state.
    pub fn play_media(&mut self, movie_id: MovieId, kind: Option<MediaKind>) -> Result<LoadRequest> {
        let movie = self
            .catalog
            .get(movie_id)
            .ok_or(KinotekaError::UnknownMovieId(movie_id))?;

        if self.selection.current().open_movie() != Some(movie_id) {
            return Err(KinotekaError::NotOpen(movie_id));
        }

        let (kind, asset) = match kind {
            Some(kind) => movie
                .asset(kind)
                .map(|asset| (kind, asset))
                .ok_or(KinotekaError::MediaUnavailable { movie_id, kind })?,
            None => movie
                .default_media()
                .ok_or(KinotekaError::NoPlayableMedia(movie_id))?,
        };

        let asset = asset.clone();
        Ok(self.playback.play(movie_id, kind, asset))
    }

    /// Stops playback. Returns `true` if anything was loading or playing.
    pub fn stop_media(&mut self) -> bool {
        self.playback.stop()
    }

    /// Applies an asynchronous load completion.
    pub fn complete_load(&mut self, token: LoadToken, result: LoadResult) -> LoadOutcome {
        self.playback.complete(token, result)
    }

    pub fn toggle_color_scheme(&mut self) -> ColorScheme {
        self.color_scheme = self.color_scheme.toggled();
        self.color_scheme
    }

    /// Failures recorded by the playback session since the last call.
    pub fn drain_failures(&mut self) -> Vec<KinotekaError> {
        self.playback.drain_failures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaResource, PlaybackPhase};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct CountingClip(Rc<Cell<i32>>);

    impl CountingClip {
        fn boxed(live: &Rc<Cell<i32>>) -> Box<dyn MediaResource> {
            live.set(live.get() + 1);
            Box::new(Self(Rc::clone(live)))
        }
    }

    impl MediaResource for CountingClip {
        fn start(&mut self) -> Result<()> {
            Ok(())
        }

        fn release(self: Box<Self>) -> Result<()> {
            self.0.set(self.0.get() - 1);
            Ok(())
        }
    }

    fn state() -> AppState {
        let catalog = Catalog::new(vec![
            MovieRecord::new(1, "Пчеловод", "Драма", "bee.jpg").with_audio("bee.mp3"),
            MovieRecord::new(2, "Револьвер", "Экшн", "revol.jpg").with_video("revolver.mp4"),
            MovieRecord::new(3, "Шальная карта", "Комедия", "card.jpg"),
        ])
        .unwrap();
        AppState::new(catalog, ColorScheme::Light)
    }

    fn ids(movies: &[&MovieRecord]) -> Vec<u32> {
        movies.iter().map(|m| m.id.0).collect()
    }

    #[test]
    fn criteria_fields_are_replaced_independently() {
        let mut state = state();
        assert!(state.set_genre("Экшн"));
        assert!(state.set_title_query("рево"));
        assert_eq!(state.criteria(), &FilterCriteria::new("рево", "Экшн"));
        assert_eq!(ids(&state.visible_movies()), vec![2]);

        assert!(!state.set_title_query("рево"));
        assert!(state.clear_filters());
        assert_eq!(ids(&state.visible_movies()), vec![1, 2, 3]);
    }

    #[test]
    fn favorites_survive_filtering() {
        let mut state = state();
        state.toggle_favorite(MovieId(1)).unwrap();
        state.set_genre("Экшн");
        assert_eq!(ids(&state.visible_movies()), vec![2]);
        assert_eq!(ids(&state.favorite_movies()), vec![1]);
    }

    #[test]
    fn unknown_ids_leave_state_untouched() {
        let mut state = state();
        state.select_movie(MovieId(1)).unwrap();
        assert!(matches!(state.select_movie(MovieId(9)), Err(KinotekaError::UnknownMovieId(_))));
        assert!(matches!(state.toggle_favorite(MovieId(9)), Err(KinotekaError::UnknownMovieId(_))));
        assert!(matches!(state.play_media(MovieId(9), None), Err(KinotekaError::UnknownMovieId(_))));
        assert_eq!(state.selection(), Selection::Open(MovieId(1)));
        assert!(state.favorites().is_empty());
        assert!(!state.playback_active());
    }

    #[test]
    fn play_requires_the_movie_to_be_open() {
        let mut state = state();
        assert!(matches!(state.play_media(MovieId(1), None), Err(KinotekaError::NotOpen(MovieId(1)))));
        state.select_movie(MovieId(2)).unwrap();
        assert!(matches!(state.play_media(MovieId(1), None), Err(KinotekaError::NotOpen(MovieId(1)))));
    }

    #[test]
    fn play_picks_available_clip() {
        let mut state = state();
        state.select_movie(MovieId(2)).unwrap();
        let request = state.play_media(MovieId(2), None).unwrap();
        assert_eq!(request.kind, MediaKind::Video);

        assert!(matches!(
            state.play_media(MovieId(2), Some(MediaKind::Audio)),
            Err(KinotekaError::MediaUnavailable { kind: MediaKind::Audio, .. })
        ));
        assert_eq!(state.playback().current_token(), Some(request.token));
    }

    #[test]
    fn movie_without_clips_has_nothing_to_play() {
        let mut state = state();
        state.select_movie(MovieId(3)).unwrap();

        let err = state.play_media(MovieId(3), None).unwrap_err();
        assert!(matches!(err, KinotekaError::NoPlayableMedia(MovieId(3))));
        assert_eq!(err.to_string(), "Movie 3 has no playable clip");

        assert!(matches!(
            state.play_media(MovieId(3), Some(MediaKind::Video)),
            Err(KinotekaError::MediaUnavailable { kind: MediaKind::Video, .. })
        ));
        assert!(!state.playback_active());
    }

    #[test]
    fn close_stops_playing_media() {
        let live = Rc::new(Cell::new(0));
        let mut state = state();
        state.select_movie(MovieId(1)).unwrap();
        let request = state.play_media(MovieId(1), None).unwrap();
        assert_eq!(state.complete_load(request.token, Ok(CountingClip::boxed(&live))), LoadOutcome::Activated);
        assert_eq!(state.playback().phase(), PlaybackPhase::Playing);

        assert!(state.close_detail());
        assert!(!state.playback_active());
        assert_eq!(state.playback().active_resources(), 0);
        assert_eq!(live.get(), 0);
        assert_eq!(state.selection(), Selection::Closed);
    }

    #[test]
    fn switching_movies_invalidates_pending_load() {
        let live = Rc::new(Cell::new(0));
        let mut state = state();
        state.select_movie(MovieId(1)).unwrap();
        let stale = state.play_media(MovieId(1), None).unwrap();

        state.select_movie(MovieId(2)).unwrap();
        assert!(!state.playback_active());

        assert_eq!(state.complete_load(stale.token, Ok(CountingClip::boxed(&live))), LoadOutcome::Stale);
        assert_eq!(live.get(), 0);
        assert_eq!(state.selection(), Selection::Open(MovieId(2)));
        assert!(!state.playback_active());
    }

    #[test]
    fn reselecting_open_movie_keeps_playback() {
        let live = Rc::new(Cell::new(0));
        let mut state = state();
        state.select_movie(MovieId(1)).unwrap();
        let request = state.play_media(MovieId(1), None).unwrap();
        state.complete_load(request.token, Ok(CountingClip::boxed(&live)));

        assert!(!state.select_movie(MovieId(1)).unwrap());
        assert!(state.playback_active());
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn color_scheme_toggles() {
        let mut state = state();
        assert_eq!(state.toggle_color_scheme(), ColorScheme::Dark);
        assert_eq!(state.toggle_color_scheme(), ColorScheme::Light);
    }
}
