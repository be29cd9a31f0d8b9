//! Single-threaded session driver.
//!
//! [`SessionDriver`] owns the [`AppState`] and an [`AssetProvider`]. It feeds
//! intents to [`handle_event`], runs the returned actions and keeps every
//! in-flight load in a [`FuturesUnordered`] set. Completions come back as
//! [`Event::MediaLoaded`] and go through the same handler, so all state
//! transitions happen on the caller's thread, one event at a time.
//!
//! A load started for a movie that has since been closed still completes; the
//! session recognises its stale token and releases the resource.

use crate::app::{handle_event, Action, AppState, Event, Intent};
use crate::domain::{KinotekaError, Result};
use crate::media::{AssetProvider, LoadRequest};
use crate::view::SessionSnapshot;
use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::fmt;

pub struct SessionDriver<P> {
    state: AppState,
    provider: P,
    pending: FuturesUnordered<LocalBoxFuture<'static, Event>>,
    failures: Vec<KinotekaError>,
}

impl<P: AssetProvider> SessionDriver<P> {
    #[must_use]
    pub fn new(state: AppState, provider: P) -> Self {
        Self {
            state,
            provider,
            pending: FuturesUnordered::new(),
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Applies one intent. Returns `true` if the presentation should re-render.
    ///
    /// Loads requested by the intent are started but not awaited; use
    /// [`SessionDriver::poll_ready`] or [`SessionDriver::settle`] to apply
    /// their completions.
    ///
    /// # Errors
    ///
    /// Propagates handler-level faults. Rejected intents are not errors; they
    /// are collected for [`SessionDriver::take_failures`].
    pub fn dispatch(&mut self, intent: Intent) -> Result<bool> {
        self.apply(Event::Intent(intent))
    }

    /// Applies every load completion that is ready without waiting.
    ///
    /// # Errors
    ///
    /// Propagates handler-level faults.
    pub fn poll_ready(&mut self) -> Result<bool> {
        let mut render = false;
        loop {
            let Some(Some(event)) = self.pending.next().now_or_never() else {
                break;
            };
            render |= self.apply(event)?;
        }
        Ok(render)
    }

    /// Waits for every in-flight load and applies its completion.
    ///
    /// # Errors
    ///
    /// Propagates handler-level faults.
    pub async fn settle(&mut self) -> Result<bool> {
        let mut render = false;
        while let Some(event) = self.pending.next().await {
            render |= self.apply(event)?;
        }
        Ok(render)
    }

    /// Number of loads whose completion has not been applied yet.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Takes the failures reported since the last call.
    pub fn take_failures(&mut self) -> Vec<KinotekaError> {
        std::mem::take(&mut self.failures)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state)
    }

    fn apply(&mut self, event: Event) -> Result<bool> {
        let (render, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(render)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute(&mut self, action: Action) {
        match action {
            Action::LoadMedia(LoadRequest {
                token,
                movie_id,
                kind,
                asset,
            }) => {
                tracing::debug!(token = %token, pending = self.pending.len(), "starting media load");
                let load = self
                    .provider
                    .load(movie_id, kind, &asset)
                    .map(move |result| Event::MediaLoaded { token, result });
                self.pending.push(load.boxed_local());
            }
            Action::ReportFailure(failure) => {
                self.failures.push(failure);
            }
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for SessionDriver<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionDriver")
            .field("state", &self.state)
            .field("provider", &self.provider)
            .field("pending_loads", &self.pending.len())
            .field("failures", &self.failures.len())
            .finish()
    }
}
