//! Platform path helpers.
//!
//! Resolves the per-user data directory used for the log file and expands
//! `~` in paths supplied through configuration.

use std::path::PathBuf;

/// Application directory name under the platform data directory.
const APP_DIR: &str = "kinoteka";

/// Returns the data directory for kinoteka files.
///
/// `$XDG_DATA_HOME/kinoteka` (usually `~/.local/share/kinoteka`) on Linux,
/// the platform equivalent elsewhere, and `<temp>/kinoteka` when no data
/// directory is known.
///
/// # Examples
///
/// ```
/// use kinoteka::infrastructure::data_dir;
///
/// assert!(data_dir().ends_with("kinoteka"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or any path when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use kinoteka::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_eq!(expand_tilde("relative/clip.mp3"), PathBuf::from("relative/clip.mp3"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
