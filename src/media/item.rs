//! Media item model

use serde::{Deserialize, Serialize};

/// File extensions treated as video sources
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "webm", "mov", "m4v", "ogv"];

/// Kind of media behind a source URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Playable video; may report a duration once metadata is loaded
    Video,
    /// Still image; always uses the default auto-advance delay
    Image,
}

impl MediaKind {
    /// Guess the kind from the extension of a source URL or path
    ///
    /// Query strings and fragments are ignored. Anything that is not a known
    /// video extension is treated as an image.
    pub fn from_source(source: &str) -> Self {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// One entry of a carousel or gallery
///
/// Immutable after construction and owned by the component that loaded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Ordinal position inside the owning collection
    pub id: usize,
    /// Candidate number the item was discovered under (1-based); equals `id + 1`
    /// for static lists
    pub source_index: usize,
    /// URL or path of the media
    pub source_url: String,
    /// Video or image
    pub kind: MediaKind,
    /// Optional caption
    pub title: Option<String>,
}

impl MediaItem {
    /// Create an item, inferring its kind from the source extension
    pub fn new(id: usize, source_url: impl Into<String>) -> Self {
        let source_url = source_url.into();
        Self {
            id,
            source_index: id + 1,
            kind: MediaKind::from_source(&source_url),
            source_url,
            title: None,
        }
    }

    /// Attach a caption
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the candidate number
    #[must_use]
    pub fn with_source_index(mut self, source_index: usize) -> Self {
        self.source_index = source_index;
        self
    }

    /// Whether this item is a video
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
