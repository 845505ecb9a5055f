//! In-memory media element
//!
//! Keeps the observable state of a slot (role class, playing flag, source,
//! placeholder) behind an `Arc<Mutex<_>>` so a clone of the element can be
//! inspected while the engine owns the original.

use crate::engine::Role;
use crate::media::element::{MediaElement, PlaybackOutcome, SourcePlayer};
use crate::media::item::MediaItem;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Observable state of a [`HeadlessElement`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessState {
    /// Label used in log lines
    pub label: String,
    /// Currently loaded source
    pub source: Option<String>,
    /// Last role class applied
    pub role: Option<Role>,
    /// Whether playback is running
    pub playing: bool,
    /// Number of times the position was reset to the start
    pub rewinds: usize,
    /// Number of playback attempts
    pub play_attempts: usize,
    /// Whether the placeholder background is showing
    pub placeholder: bool,
    /// Number of reload requests
    pub reloads: usize,
    /// Loaded duration, if metadata is available
    pub duration: Option<Duration>,
    /// When false, every playback attempt is suppressed
    pub autoplay_allowed: bool,
}

/// Media element that records commands instead of rendering
#[derive(Debug, Clone)]
pub struct HeadlessElement {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessElement {
    /// Create an element with the given log label and autoplay allowed
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessState {
                label: label.into(),
                autoplay_allowed: true,
                ..HeadlessState::default()
            })),
        }
    }

    /// Create an element already pointed at an item's source
    pub fn for_item(item: &MediaItem) -> Self {
        let element = Self::new(format!("item {}", item.id));
        element.state.lock().source = Some(item.source_url.clone());
        element
    }

    /// Pretend metadata has loaded with the given duration
    #[must_use]
    pub fn with_duration(self, duration: Duration) -> Self {
        self.state.lock().duration = Some(duration);
        self
    }

    /// Make every playback attempt fail as if blocked by autoplay policy
    #[must_use]
    pub fn with_autoplay_blocked(self) -> Self {
        self.state.lock().autoplay_allowed = false;
        self
    }

    /// Set or clear the loaded duration
    pub fn set_duration(&self, duration: Option<Duration>) {
        self.state.lock().duration = duration;
    }

    /// Snapshot of the current state
    pub fn snapshot(&self) -> HeadlessState {
        self.state.lock().clone()
    }
}

impl MediaElement for HeadlessElement {
    fn apply_role(&mut self, role: Role) {
        self.state.lock().role = Some(role);
    }

    fn rewind(&mut self) {
        self.state.lock().rewinds += 1;
    }

    fn play(&mut self) -> PlaybackOutcome {
        let mut state = self.state.lock();
        state.play_attempts += 1;
        if state.autoplay_allowed {
            state.playing = true;
            debug!("{}: playing", state.label);
            PlaybackOutcome::Started
        } else {
            state.playing = false;
            PlaybackOutcome::Suppressed("autoplay blocked".to_string())
        }
    }

    fn pause(&mut self) {
        self.state.lock().playing = false;
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().duration
    }

    fn show_placeholder(&mut self) {
        let mut state = self.state.lock();
        state.placeholder = true;
        state.playing = false;
        debug!("{}: showing placeholder", state.label);
    }

    fn reload(&mut self) {
        let mut state = self.state.lock();
        state.reloads += 1;
        state.placeholder = false;
    }
}

impl SourcePlayer for HeadlessElement {
    fn set_source(&mut self, source: &str) {
        let mut state = self.state.lock();
        state.source = Some(source.to_string());
        state.duration = None;
    }

    fn clear_source(&mut self) {
        let mut state = self.state.lock();
        state.source = None;
        state.playing = false;
    }

    fn is_paused(&self) -> bool {
        !self.state.lock().playing
    }
}
