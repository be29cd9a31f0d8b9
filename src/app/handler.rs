//! Intent handling and state transition logic.
//!
//! The presentation layer translates user gestures into [`Intent`]s. The
//! runtime wraps them, together with asynchronous load completions, into
//! [`Event`]s and passes each one to [`handle_event`].
//!
//! # Flow
//!
//! 1. An event arrives from the presentation layer or from the asset provider
//! 2. [`handle_event`] matches it and calls the `AppState` transition
//! 3. Recoverable failures become [`Action::ReportFailure`]
//! 4. The render flag and actions are returned for the runtime to execute
//!
//! Rejected intents (unknown ids, playback for a closed movie, missing clips)
//! leave the state unchanged and are reported, never propagated as `Err`.
//!
//! # Example
//!
//! ```rust
//! use kinoteka::app::{handle_event, AppState, ColorScheme, Event, Intent};
//! use kinoteka::catalog::Catalog;
//!
//! let mut state = AppState::new(Catalog::builtin(), ColorScheme::default());
//! let intent = Intent::SetGenre { genre: "Экшн".into() };
//! let (render, actions) = handle_event(&mut state, Event::Intent(intent))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), kinoteka::domain::KinotekaError>(())
//! ```

use crate::app::{Action, AppState};
use crate::catalog::GenreFilter;
use crate::domain::{MediaKind, MovieId, Result};
use crate::media::{LoadOutcome, LoadResult, LoadToken};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-originated request, as emitted by the presentation layer.
///
/// Serialized with an `intent` tag, for example
/// `{"intent":"select_movie","id":2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Replaces the title query; the genre filter is kept.
    SetTitleQuery { text: String },
    /// Replaces the genre filter; `"all"` disables it. The query is kept.
    SetGenre { genre: GenreFilter },
    /// Resets both criteria.
    ClearFilters,
    /// Opens the detail view of a movie.
    SelectMovie { id: MovieId },
    /// Closes the detail view and stops its playback.
    CloseDetail,
    /// Flips favorite membership.
    ToggleFavorite { id: MovieId },
    /// Plays a clip of the open movie; `kind` defaults to audio, then video.
    PlayMedia {
        id: MovieId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<MediaKind>,
    },
    /// Stops the active clip.
    StopMedia,
    /// Switches between light and dark.
    ToggleColorScheme,
}

/// Everything the handler reacts to.
pub enum Event {
    Intent(Intent),

    /// Completion of the load started by [`Action::LoadMedia`].
    MediaLoaded { token: LoadToken, result: LoadResult },
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intent(intent) => f.debug_tuple("Intent").field(intent).finish(),
            Self::MediaLoaded { token, result } => f
                .debug_struct("MediaLoaded")
                .field("token", token)
                .field("ok", &result.is_ok())
                .finish(),
        }
    }
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        Self::Intent(intent)
    }
}

/// Processes an event, mutates the session state and returns the actions to run.
///
/// The boolean is `true` when the state changed and the presentation should
/// re-render.
///
/// # Errors
///
/// Currently every session failure is recoverable and reported through
/// [`Action::ReportFailure`]; the `Result` is kept for handler-level faults.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event = ?event).entered();

    let mut actions = Vec::new();

    let render = match event {
        Event::Intent(Intent::SetTitleQuery { text }) => {
            tracing::trace!(query = %text, "title query updated");
            state.set_title_query(text)
        }
        Event::Intent(Intent::SetGenre { genre }) => state.set_genre(genre),
        Event::Intent(Intent::ClearFilters) => state.clear_filters(),
        Event::Intent(Intent::SelectMovie { id }) => match state.select_movie(id) {
            Ok(changed) => changed,
            Err(e) => {
                tracing::debug!(error = %e, "select rejected");
                actions.push(Action::ReportFailure(e));
                false
            }
        },
        Event::Intent(Intent::CloseDetail) => state.close_detail(),
        Event::Intent(Intent::ToggleFavorite { id }) => match state.toggle_favorite(id) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "favorite toggle rejected");
                actions.push(Action::ReportFailure(e));
                false
            }
        },
        Event::Intent(Intent::PlayMedia { id, kind }) => match state.play_media(id, kind) {
            Ok(request) => {
                actions.push(Action::LoadMedia(request));
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "playback rejected");
                actions.push(Action::ReportFailure(e));
                false
            }
        },
        Event::Intent(Intent::StopMedia) => state.stop_media(),
        Event::Intent(Intent::ToggleColorScheme) => {
            let scheme = state.toggle_color_scheme();
            tracing::debug!(color_scheme = ?scheme, "color scheme toggled");
            true
        }
        Event::MediaLoaded { token, result } => match state.complete_load(token, result) {
            LoadOutcome::Activated | LoadOutcome::Failed => true,
            LoadOutcome::Stale => false,
        },
    };

    for failure in state.drain_failures() {
        tracing::warn!(error = %failure, "media failure");
        actions.push(Action::ReportFailure(failure));
    }

    Ok((render, actions))
}
