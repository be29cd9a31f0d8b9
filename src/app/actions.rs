//! Side effects requested by the event handler.
//!
//! The handler never touches the asset provider or the presentation layer
//! directly. It returns a `Vec<Action>` after each event and the runtime
//! executes them in order.

use crate::domain::KinotekaError;
use crate::media::LoadRequest;

/// Commands executed by the session runtime.
#[derive(Debug)]
pub enum Action {
    /// Starts an asynchronous clip load.
    ///
    /// The runtime hands the request to the asset provider and feeds the
    /// completion back as [`Event::MediaLoaded`](super::Event::MediaLoaded)
    /// carrying the same token.
    LoadMedia(LoadRequest),

    /// Forwards a recoverable failure to the presentation layer.
    ReportFailure(KinotekaError),
}
