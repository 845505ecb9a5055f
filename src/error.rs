//! Error types for `MapleCarousel`
//!
//! This module defines all error types used throughout the crate,
//! providing clear error messages and proper error propagation.
//!
//! None of these errors is fatal to a running carousel: discovery misses are
//! filtered silently, playback rejections are reported as
//! [`PlaybackOutcome::Suppressed`](crate::media::PlaybackOutcome::Suppressed),
//! and late load failures only degrade the affected slot.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `MapleCarousel`
#[derive(Debug, Error)]
pub enum CarouselError {
    /// A jump target outside `0..len`
    #[error("Index {index} is out of range for {len} item(s)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of items in the collection
        len: usize,
    },

    /// Source template is malformed
    #[error("Invalid source pattern: {0}")]
    InvalidSourcePattern(String),

    /// A probe could not be carried out at all (as opposed to "source missing")
    #[error("Probe failed: {0}")]
    ProbeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The component has been torn down
    #[error("Carousel has been disposed")]
    Disposed,

    /// The host side of an event or snapshot channel went away
    #[error("Event channel closed")]
    ChannelClosed,

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `MapleCarousel` operations
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Convert an error to a user-friendly message
///
/// Used by the driver binary when reporting startup failures.
pub fn get_user_friendly_error(error: &CarouselError) -> String {
    match error {
        CarouselError::IndexOutOfRange { index, len } => {
            format!(
                "There is no item #{index}.\n\n\
                 This carousel currently holds {len} item(s)."
            )
        }
        CarouselError::InvalidSourcePattern(pattern) => {
            format!(
                "The media source pattern \"{pattern}\" is not usable.\n\n\
                 Patterns must contain exactly one {{n}} placeholder,\n\
                 e.g. resources/carousel-videos/{{n}}.mp4"
            )
        }
        CarouselError::ProbeFailed(_) => "Unable to check media sources.\n\n\
             Please ensure:\n\
             - The media host is reachable\n\
             - The resources directory exists"
            .to_string(),
        CarouselError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Default carousel settings will be used.\n\
             Check that MAPLECAROUSEL_HOME points to a writable directory."
            .to_string(),
        CarouselError::Disposed => "The carousel was already closed.".to_string(),
        CarouselError::ChannelClosed => "The carousel stopped receiving input.".to_string(),
        CarouselError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        CarouselError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
