//! Application layer coordinating state, intents and actions.
//!
//! Sits between the runtime (which owns the asset provider) and the
//! catalog/media layers.
//!
//! ```text
//! Intent → Event → handle_event → AppState transitions → Actions → runtime
//!                       ↑                                    ↓
//!                       └──────── MediaLoaded(token) ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`favorites`]: insertion-ordered favorite set
//! - [`handler`]: intent processing
//! - [`modes`]: color scheme
//! - [`selection`]: detail-view state machine
//! - [`state`]: the session state container

pub mod actions;
pub mod favorites;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use favorites::Favorites;
pub use handler::{handle_event, Event, Intent};
pub use modes::ColorScheme;
pub use selection::{SelectOutcome, Selection, SelectionController};
pub use state::AppState;
