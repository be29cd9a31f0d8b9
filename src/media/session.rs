//! Media Playback Session: at most one active audio/video resource.
//!
//! # State Machine
//!
//! ```text
//!            play()                     complete(token, Ok)
//!   Idle ─────────────▶ Loading(token) ─────────────────────▶ Playing(token)
//!    ▲                    │    │  ▲                               │
//!    │   stop() /         │    │  │ play(): stop, then new token  │
//!    │   complete(Err)    │    └──┘                               │
//!    └────────────────────┴───────────────────────────────────────┘
//!                              stop() releases the resource
//! ```
//!
//! Every `play` draws a fresh [`LoadToken`] from a monotonically increasing
//! counter. A completion is applied only while the session is still `Loading`
//! with that exact token; anything else is stale and is dropped, releasing
//! the orphaned resource if the load succeeded. Cancellation is therefore by
//! staleness, never by interrupting the load.
//!
//! Release and load failures never leave a handle referenced by the session.
//! They are queued and drained by the caller with
//! [`PlaybackSession::drain_failures`].

use super::provider::{LoadResult, MediaResource};
use crate::domain::{AssetRef, KinotekaError, MediaKind, MovieId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Identifies one `play` call. Later calls always carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LoadToken(u64);

impl LoadToken {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Work order for the asset provider, produced by [`PlaybackSession::play`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub movie_id: MovieId,
    pub kind: MediaKind,
    pub asset: AssetRef,
}

/// What a load completion did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The resource was started and is now the active one.
    Activated,
    /// The load (or the start) failed; the session is idle.
    Failed,
    /// The completion belonged to a superseded or stopped load and was ignored.
    Stale,
}

/// Coarse playback phase exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    Idle,
    Loading,
    Playing,
}

enum Phase {
    Idle,
    Loading {
        token: LoadToken,
        movie_id: MovieId,
        kind: MediaKind,
        since: DateTime<Utc>,
    },
    Playing {
        token: LoadToken,
        movie_id: MovieId,
        kind: MediaKind,
        since: DateTime<Utc>,
        resource: Box<dyn MediaResource>,
    },
}

/// Owner of the single active media resource.
pub struct PlaybackSession {
    phase: Phase,
    last_token: u64,
    failures: Vec<KinotekaError>,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_token: 0,
            failures: Vec::new(),
        }
    }

    /// Stops whatever is active, then enters `Loading` under a fresh token.
    ///
    /// The returned request must be handed to the asset provider; its outcome
    /// comes back through [`PlaybackSession::complete`]. A second `play` before
    /// that completion restarts the sequence and makes the first one stale.
    pub fn play(&mut self, movie_id: MovieId, kind: MediaKind, asset: AssetRef) -> LoadRequest {
        self.stop();

        self.last_token += 1;
        let token = LoadToken(self.last_token);

        tracing::debug!(token = %token, movie_id = %movie_id, kind = %kind, asset = %asset, "media load requested");

        self.phase = Phase::Loading {
            token,
            movie_id,
            kind,
            since: Utc::now(),
        };

        LoadRequest {
            token,
            movie_id,
            kind,
            asset,
        }
    }

    /// Releases the active resource (or abandons a pending load).
    ///
    /// The session is idle afterwards regardless of whether the release
    /// succeeded. Returns `true` if anything was loading or playing.
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => false,
            Phase::Loading { token, movie_id, .. } => {
                tracing::debug!(token = %token, movie_id = %movie_id, "pending media load abandoned");
                true
            }
            Phase::Playing {
                token,
                movie_id,
                resource,
                ..
            } => {
                tracing::debug!(token = %token, movie_id = %movie_id, "stopping media");
                self.release(resource);
                true
            }
        }
    }

    /// Applies the outcome of the load identified by `token`.
    pub fn complete(&mut self, token: LoadToken, result: LoadResult) -> LoadOutcome {
        let is_current = matches!(&self.phase, Phase::Loading { token: current, .. } if *current == token);

        if !is_current {
            tracing::debug!(token = %token, current = ?self.current_token(), "stale media load completion ignored");
            if let Ok(orphan) = result {
                self.release(orphan);
            }
            return LoadOutcome::Stale;
        }

        let Phase::Loading { movie_id, kind, .. } = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return LoadOutcome::Stale;
        };

        match result {
            Ok(mut resource) => {
                if let Err(e) = resource.start() {
                    tracing::warn!(token = %token, movie_id = %movie_id, error = %e, "media failed to start");
                    self.release(resource);
                    self.failures.push(KinotekaError::MediaLoad {
                        movie_id,
                        reason: e.to_string(),
                    });
                    return LoadOutcome::Failed;
                }

                tracing::debug!(token = %token, movie_id = %movie_id, kind = %kind, "media playing");
                self.phase = Phase::Playing {
                    token,
                    movie_id,
                    kind,
                    since: Utc::now(),
                    resource,
                };
                LoadOutcome::Activated
            }
            Err(e) => {
                tracing::warn!(token = %token, movie_id = %movie_id, error = %e, "media load failed");
                let failure = match e {
                    KinotekaError::MediaLoad { .. } => e,
                    other => KinotekaError::MediaLoad {
                        movie_id,
                        reason: other.to_string(),
                    },
                };
                self.failures.push(failure);
                LoadOutcome::Failed
            }
        }
    }

    /// Movie the session is loading or playing for.
    #[must_use]
    pub const fn source_movie(&self) -> Option<MovieId> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading { movie_id, .. } | Phase::Playing { movie_id, .. } => Some(*movie_id),
        }
    }

    /// Token of the load in flight or of the playing resource.
    #[must_use]
    pub const fn current_token(&self) -> Option<LoadToken> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading { token, .. } | Phase::Playing { token, .. } => Some(*token),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Option<MediaKind> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading { kind, .. } | Phase::Playing { kind, .. } => Some(*kind),
        }
    }

    /// When the current phase was entered.
    #[must_use]
    pub const fn since(&self) -> Option<DateTime<Utc>> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading { since, .. } | Phase::Playing { since, .. } => Some(*since),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> PlaybackPhase {
        match &self.phase {
            Phase::Idle => PlaybackPhase::Idle,
            Phase::Loading { .. } => PlaybackPhase::Loading,
            Phase::Playing { .. } => PlaybackPhase::Playing,
        }
    }

    /// Whether a clip is loading or playing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Number of resources the session holds: always 0 or 1.
    #[must_use]
    pub const fn active_resources(&self) -> usize {
        match self.phase {
            Phase::Playing { .. } => 1,
            Phase::Idle | Phase::Loading { .. } => 0,
        }
    }

    /// Takes the failures recorded since the last call.
    pub fn drain_failures(&mut self) -> Vec<KinotekaError> {
        std::mem::take(&mut self.failures)
    }

    fn release(&mut self, resource: Box<dyn MediaResource>) {
        if let Err(e) = resource.release() {
            tracing::warn!(error = %e, "media release failed; treating resource as released");
            let failure = match e {
                KinotekaError::MediaRelease(_) => e,
                other => KinotekaError::MediaRelease(other.to_string()),
            };
            self.failures.push(failure);
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        if self.stop() {
            tracing::debug!("playback session dropped while active");
        }
    }
}

impl fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("phase", &self.phase())
            .field("source_movie", &self.source_movie())
            .field("token", &self.current_token())
            .field("pending_failures", &self.failures.len())
            .finish()
    }
}
