//! Presentation mode state.
//!
//! The only mode the session tracks is the light/dark color scheme chosen by
//! the user. No styling lives here; the presentation collaborator maps the
//! scheme to its own palette.
//!
//! # Example
//!
//! ```rust
//! use kinoteka::app::ColorScheme;
//!
//! let scheme = ColorScheme::from_name("dark").unwrap_or_default();
//! assert_eq!(scheme.toggled(), ColorScheme::Light);
//! ```

use serde::{Deserialize, Serialize};

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Parses `"light"` or `"dark"`, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
