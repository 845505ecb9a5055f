//! Host element traits
//!
//! The engine issues playback and styling commands through these traits only,
//! so a carousel can be exercised without a live page.

use crate::engine::Role;
use std::time::Duration;

/// Result of a best-effort playback start
///
/// Hosts commonly refuse to start playback (autoplay policy, media not ready).
/// The engine never treats that as an error, but it keeps the outcome so
/// callers can tell the two paths apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Playback began
    Started,
    /// The host refused to start playback; the element stays paused
    Suppressed(String),
}

impl PlaybackOutcome {
    /// Whether playback actually began
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Handle to one rendered media slot owned by the host
pub trait MediaElement {
    /// Replace the slot's role class (`active`, `prev`, `next` or `hidden`)
    fn apply_role(&mut self, role: Role);

    /// Seek back to the start
    fn rewind(&mut self);

    /// Try to start playback
    fn play(&mut self) -> PlaybackOutcome;

    /// Pause playback (no-op for images)
    fn pause(&mut self);

    /// Known, loaded duration of the media, if any
    fn duration(&self) -> Option<Duration>;

    /// Swap the slot's content for a placeholder background after a load failure
    fn show_placeholder(&mut self);

    /// Ask the host to load the source again
    fn reload(&mut self);
}

/// A single player whose source is swapped at runtime (used by the lightbox)
pub trait SourcePlayer: MediaElement {
    /// Point the player at a new source and start loading it
    fn set_source(&mut self, source: &str);

    /// Drop the current source
    fn clear_source(&mut self);

    /// Whether the player is currently paused
    fn is_paused(&self) -> bool;
}
