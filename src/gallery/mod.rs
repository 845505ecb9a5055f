//! Hover-to-play gallery
//!
//! A grid of discovered items. Videos play while the pointer is over them and
//! open in a [`Lightbox`](crate::lightbox::Lightbox) on click; images are static.

use crate::lightbox::LightboxEntry;
use crate::media::{MediaElement, MediaItem, PlaybackOutcome};
use tracing::debug;

/// One gallery cell
#[derive(Debug)]
struct Tile<E> {
    item: MediaItem,
    label: String,
    element: E,
    playing: bool,
}

/// Grid of items with hover playback
#[derive(Debug)]
pub struct HoverGallery<E: MediaElement> {
    tiles: Vec<Tile<E>>,
}

impl<E: MediaElement> HoverGallery<E> {
    /// Build from discovered items and their elements
    pub fn new(tiles: impl IntoIterator<Item = (MediaItem, E)>) -> Self {
        let tiles = tiles
            .into_iter()
            .map(|(item, element)| Tile {
                label: item
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Order #{}", item.source_index)),
                item,
                element,
                playing: false,
            })
            .collect();
        Self { tiles }
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the gallery is empty
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Caption under tile `index`
    pub fn label(&self, index: usize) -> Option<&str> {
        self.tiles.get(index).map(|tile| tile.label.as_str())
    }

    /// Item behind tile `index`
    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.tiles.get(index).map(|tile| &tile.item)
    }

    /// Pointer entered a tile: start its video
    ///
    /// A refused start is retried once after reloading the source.
    pub fn pointer_enter(&mut self, index: usize) -> Option<PlaybackOutcome> {
        let tile = self.tiles.get_mut(index).filter(|tile| tile.item.is_video())?;

        let mut outcome = tile.element.play();
        if !outcome.is_started() {
            debug!("Gallery tile {} refused to play, reloading", index);
            tile.element.reload();
            outcome = tile.element.play();
        }
        tile.playing = outcome.is_started();
        Some(outcome)
    }

    /// Pointer left a tile: stop and rewind its video
    pub fn pointer_leave(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index).filter(|tile| tile.item.is_video()) {
            tile.element.pause();
            tile.element.rewind();
            tile.playing = false;
        }
    }

    /// Tap on a touch screen toggles playback
    pub fn touch(&mut self, index: usize) -> Option<PlaybackOutcome> {
        let tile = self.tiles.get_mut(index).filter(|tile| tile.item.is_video())?;
        if tile.playing {
            tile.element.pause();
            tile.playing = false;
            None
        } else {
            let outcome = tile.element.play();
            tile.playing = outcome.is_started();
            Some(outcome)
        }
    }

    /// Clicked tile: the index to open in the lightbox, for videos only
    pub fn click(&self, index: usize) -> Option<usize> {
        self.tiles
            .get(index)
            .filter(|tile| tile.item.is_video())
            .map(|_| index)
    }

    /// Entries for a lightbox over this gallery, in tile order
    pub fn lightbox_entries(&self) -> Vec<LightboxEntry> {
        self.tiles
            .iter()
            .map(|tile| LightboxEntry::new(tile.label.clone(), tile.item.source_url.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::HeadlessElement;

    fn gallery() -> (HoverGallery<HeadlessElement>, Vec<HeadlessElement>) {
        let items = vec![
            MediaItem::new(0, "resources/recent-orders/2.mp4").with_source_index(2),
            MediaItem::new(1, "resources/recent-orders/5.mp4").with_source_index(5),
            MediaItem::new(2, "resources/hero-cards.jpg").with_title("Multi-finish Showcase"),
        ];
        let elements: Vec<HeadlessElement> = items.iter().map(HeadlessElement::for_item).collect();
        (HoverGallery::new(items.into_iter().zip(elements.clone())), elements)
    }

    #[test]
    fn test_labels_use_candidate_numbers() {
        let (gallery, _) = gallery();
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.label(0), Some("Order #2"));
        assert_eq!(gallery.label(1), Some("Order #5"));
        assert_eq!(gallery.label(2), Some("Multi-finish Showcase"));
        assert_eq!(gallery.label(3), None);
    }

    #[test]
    fn test_hover_plays_and_leave_rewinds() {
        let (mut gallery, elements) = gallery();
        assert!(gallery.pointer_enter(1).unwrap().is_started());
        assert!(elements[1].snapshot().playing);

        gallery.pointer_leave(1);
        let state = elements[1].snapshot();
        assert!(!state.playing);
        assert_eq!(state.rewinds, 1);
    }

    #[test]
    fn test_images_ignore_hover_and_click() {
        let (mut gallery, elements) = gallery();
        assert!(gallery.pointer_enter(2).is_none());
        assert_eq!(elements[2].snapshot().play_attempts, 0);
        assert_eq!(gallery.click(2), None);
        assert_eq!(gallery.click(0), Some(0));
    }

    #[test]
    fn test_refused_hover_reloads_once() {
        let element = HeadlessElement::new("tile").with_autoplay_blocked();
        let mut gallery = HoverGallery::new([(MediaItem::new(0, "a.mp4"), element.clone())]);

        let outcome = gallery.pointer_enter(0).unwrap();
        assert!(!outcome.is_started());
        let state = element.snapshot();
        assert_eq!(state.reloads, 1);
        assert_eq!(state.play_attempts, 2);
    }

    #[test]
    fn test_touch_toggles() {
        let (mut gallery, elements) = gallery();
        assert!(gallery.touch(0).is_some());
        assert!(elements[0].snapshot().playing);
        assert!(gallery.touch(0).is_none());
        assert!(!elements[0].snapshot().playing);
    }

    #[test]
    fn test_lightbox_entries() {
        let (gallery, _) = gallery();
        let entries = gallery.lightbox_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], LightboxEntry::new("Order #5", "resources/recent-orders/5.mp4"));
    }
}
