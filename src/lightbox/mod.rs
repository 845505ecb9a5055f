//! Video lightbox
//!
//! A single overlay player that shows one entry of a list at a time. Navigation
//! is clamped at both ends, unlike the carousel which wraps.

use crate::error::{CarouselError, Result};
use crate::input::NavKey;
use crate::media::{MediaItem, PlaybackOutcome, SourcePlayer};
use tracing::{debug, info};

/// One entry the lightbox can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxEntry {
    /// Caption shown above the player
    pub title: String,
    /// Source loaded into the player
    pub src: String,
}

impl LightboxEntry {
    /// Create an entry
    pub fn new(title: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            src: src.into(),
        }
    }
}

impl From<&MediaItem> for LightboxEntry {
    fn from(item: &MediaItem) -> Self {
        let title = item
            .title
            .clone()
            .unwrap_or_else(|| format!("Order #{}", item.source_index));
        Self::new(title, item.source_url.clone())
    }
}

/// Enabled state of the navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    /// "Previous" is disabled on the first entry
    pub prev_disabled: bool,
    /// "Next" is disabled on the last entry
    pub next_disabled: bool,
}

/// Overlay player over a list of entries
#[derive(Debug)]
pub struct Lightbox<P: SourcePlayer> {
    entries: Vec<LightboxEntry>,
    player: P,
    current_index: usize,
    open: bool,
    title: Option<String>,
}

impl<P: SourcePlayer> Lightbox<P> {
    /// Create a closed lightbox
    pub fn new(entries: Vec<LightboxEntry>, player: P) -> Self {
        Self {
            entries,
            player,
            current_index: 0,
            open: false,
            title: None,
        }
    }

    /// Show entry `index` and try to start it
    pub fn open(&mut self, index: usize) -> Result<PlaybackOutcome> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get(index)
            .ok_or(CarouselError::IndexOutOfRange { index, len })?;

        self.current_index = index;
        self.open = true;
        self.title = Some(entry.title.clone());

        self.player.pause();
        self.player.rewind();
        self.player.set_source(&entry.src);
        let outcome = self.player.play();

        info!("Lightbox opened on {} ({})", index, entry.src);
        if let PlaybackOutcome::Suppressed(reason) = &outcome {
            debug!("Lightbox playback suppressed: {}", reason);
        }
        Ok(outcome)
    }

    /// Hide the overlay and unload the source
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.player.pause();
        self.player.rewind();
        self.player.clear_source();
        debug!("Lightbox closed");
    }

    /// Show the following entry; stays put on the last one
    pub fn next(&mut self) -> Option<usize> {
        let target = self.current_index + 1;
        if target >= self.entries.len() {
            return None;
        }
        self.open(target).ok().map(|_| target)
    }

    /// Show the preceding entry; stays put on the first one
    pub fn previous(&mut self) -> Option<usize> {
        let target = self.current_index.checked_sub(1)?;
        self.open(target).ok().map(|_| target)
    }

    /// Play if paused, pause if playing. Ignored while closed.
    pub fn toggle_play_pause(&mut self) -> Option<PlaybackOutcome> {
        if !self.open {
            return None;
        }
        if self.player.is_paused() {
            Some(self.player.play())
        } else {
            self.player.pause();
            None
        }
    }

    /// Keyboard handling while open. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        if !self.open {
            return false;
        }
        match key {
            NavKey::Escape => self.close(),
            NavKey::ArrowLeft => {
                self.previous();
            }
            NavKey::ArrowRight => {
                self.next();
            }
            NavKey::Space => {
                self.toggle_play_pause();
            }
            NavKey::Other => return false,
        }
        true
    }

    /// Which navigation buttons are disabled
    pub fn nav_state(&self) -> NavState {
        NavState {
            prev_disabled: self.current_index == 0,
            next_disabled: self.current_index + 1 >= self.entries.len(),
        }
    }

    /// Whether the overlay is visible
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Caption of the entry last opened
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Index of the entry last opened
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Underlying player
    pub fn player(&self) -> &P {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::HeadlessElement;

    fn lightbox(len: usize) -> (Lightbox<HeadlessElement>, HeadlessElement) {
        let entries = (1..=len)
            .map(|n| LightboxEntry::new(format!("Order {n}"), format!("resources/recent-orders/{n}.mp4")))
            .collect();
        let player = HeadlessElement::new("lightbox");
        (Lightbox::new(entries, player.clone()), player)
    }

    #[test]
    fn test_open_loads_and_plays() {
        let (mut lightbox, player) = lightbox(3);
        let outcome = lightbox.open(1).unwrap();

        assert!(outcome.is_started());
        assert!(lightbox.is_open());
        assert_eq!(lightbox.title(), Some("Order 2"));
        let state = player.snapshot();
        assert_eq!(state.source.as_deref(), Some("resources/recent-orders/2.mp4"));
        assert!(state.playing);
        assert_eq!(state.rewinds, 1);
    }

    #[test]
    fn test_open_out_of_range() {
        let (mut lightbox, _) = lightbox(2);
        assert!(matches!(
            lightbox.open(2),
            Err(CarouselError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let (mut lightbox, _) = lightbox(3);
        lightbox.open(0).unwrap();
        assert_eq!(
            lightbox.nav_state(),
            NavState {
                prev_disabled: true,
                next_disabled: false
            }
        );
        assert_eq!(lightbox.previous(), None);
        assert_eq!(lightbox.current_index(), 0);

        assert_eq!(lightbox.next(), Some(1));
        assert_eq!(lightbox.next(), Some(2));
        assert_eq!(lightbox.next(), None);
        assert!(lightbox.nav_state().next_disabled);
        assert!(!lightbox.nav_state().prev_disabled);
    }

    #[test]
    fn test_close_unloads_source() {
        let (mut lightbox, player) = lightbox(2);
        lightbox.open(0).unwrap();
        lightbox.close();

        assert!(!lightbox.is_open());
        let state = player.snapshot();
        assert!(!state.playing);
        assert_eq!(state.source, None);
    }

    #[test]
    fn test_keys_only_while_open() {
        let (mut lightbox, player) = lightbox(3);
        assert!(!lightbox.handle_key(NavKey::ArrowRight));
        assert_eq!(lightbox.current_index(), 0);

        lightbox.open(0).unwrap();
        assert!(lightbox.handle_key(NavKey::ArrowRight));
        assert_eq!(lightbox.current_index(), 1);

        assert!(lightbox.handle_key(NavKey::Space));
        assert!(!player.snapshot().playing);
        assert!(lightbox.handle_key(NavKey::Space));
        assert!(player.snapshot().playing);

        assert!(!lightbox.handle_key(NavKey::Other));
        assert!(lightbox.handle_key(NavKey::Escape));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_blocked_autoplay_is_not_an_error() {
        let player = HeadlessElement::new("lightbox").with_autoplay_blocked();
        let mut lightbox = Lightbox::new(vec![LightboxEntry::new("a", "a.mp4")], player);
        let outcome = lightbox.open(0).unwrap();
        assert!(!outcome.is_started());
        assert!(lightbox.is_open());
    }

    #[test]
    fn test_entry_from_item() {
        let item = MediaItem::new(0, "resources/recent-orders/4.mp4").with_source_index(4);
        assert_eq!(LightboxEntry::from(&item).title, "Order #4");
        let titled = item.with_title("Velvet Touch Cards");
        assert_eq!(LightboxEntry::from(&titled).title, "Velvet Touch Cards");
    }
}
