//! Movie record model.
//!
//! A [`MovieRecord`] is immutable once loaded into the catalog. Asset references
//! are opaque: only an [`AssetProvider`](crate::media::AssetProvider) interprets
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u32);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MovieId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Opaque handle to an image, audio or video asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    /// Creates an asset reference from anything string-like.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of playable clip attached to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Audio fragment.
    Audio,
    /// Trailer video.
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// A single catalog entry.
///
/// # Fields
///
/// - `id`: unique within a catalog instance
/// - `title`: display title, matched case-insensitively by the filter engine
/// - `genre`: matched exactly (case-sensitive) by the genre filter
/// - `image`: poster asset
/// - `audio` / `video`: optional playable clips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub image: AssetRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AssetRef>,
}

impl MovieRecord {
    /// Creates a record without playable clips.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinoteka::domain::{MovieId, MovieRecord};
    ///
    /// let movie = MovieRecord::new(1, "Пчеловод", "Драма", "bee.jpg");
    /// assert_eq!(movie.id, MovieId(1));
    /// assert!(movie.audio.is_none());
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<MovieId>,
        title: impl Into<String>,
        genre: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genre: genre.into(),
            image: AssetRef::new(image),
            video: None,
            audio: None,
        }
    }

    /// Attaches an audio clip.
    #[must_use]
    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = Some(AssetRef::new(audio));
        self
    }

    /// Attaches a video clip.
    #[must_use]
    pub fn with_video(mut self, video: impl Into<String>) -> Self {
        self.video = Some(AssetRef::new(video));
        self
    }

    /// Returns the clip of the given kind, if the movie has one.
    #[must_use]
    pub const fn asset(&self, kind: MediaKind) -> Option<&AssetRef> {
        match kind {
            MediaKind::Audio => self.audio.as_ref(),
            MediaKind::Video => self.video.as_ref(),
        }
    }

    /// Picks the clip played when no kind is requested: audio first, then video.
    #[must_use]
    pub fn default_media(&self) -> Option<(MediaKind, &AssetRef)> {
        self.audio
            .as_ref()
            .map(|a| (MediaKind::Audio, a))
            .or_else(|| self.video.as_ref().map(|v| (MediaKind::Video, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_media_prefers_audio() {
        let movie = MovieRecord::new(1, "Пчеловод", "Драма", "bee.jpg")
            .with_video("beekeeper.mp4")
            .with_audio("beekeeper.mp3");
        let (kind, asset) = movie.default_media().unwrap();
        assert_eq!(kind, MediaKind::Audio);
        assert_eq!(asset.as_str(), "beekeeper.mp3");
    }

    #[test]
    fn default_media_falls_back_to_video() {
        let movie = MovieRecord::new(2, "Револьвер", "Экшн", "revol.jpg").with_video("revolver.mp4");
        assert_eq!(movie.default_media().map(|(k, _)| k), Some(MediaKind::Video));
        assert!(movie.asset(MediaKind::Audio).is_none());
    }

    #[test]
    fn record_serializes_without_missing_clips() {
        let movie = MovieRecord::new(3, "Шальная карта", "Комедия", "card.jpg");
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json.get("audio").is_none());
    }
}
