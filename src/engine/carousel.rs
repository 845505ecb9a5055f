//! Carousel state machine
//!
//! Owns the item collection, the current index and the single pending
//! auto-advance. All index mutation goes through [`Carousel::advance`] or
//! [`Carousel::jump_to`], and each mutation is followed by a full, synchronous
//! role recomputation.

use crate::config::CarouselConfig;
use crate::engine::roles::{Role, RoleMap, assign_roles, role_for};
use crate::engine::timer::{AutoAdvanceTimer, PendingAdvance};
use crate::error::{CarouselError, Result};
use crate::input::Direction;
use crate::media::{MediaElement, MediaItem, PlaybackOutcome};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Timing knobs of one carousel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Delay used for images and for videos without a known duration
    pub default_delay: Duration,
    /// Whether a known video duration replaces the default delay
    pub duration_aware: bool,
    /// Added to a known video duration before advancing
    pub duration_buffer: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_delay: Duration::from_millis(8000),
            duration_aware: true,
            duration_buffer: Duration::from_millis(500),
        }
    }
}

impl From<&CarouselConfig> for EngineSettings {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            default_delay: Duration::from_millis(config.default_delay_ms),
            duration_aware: config.duration_aware,
            duration_buffer: Duration::from_millis(config.duration_buffer_ms),
        }
    }
}

/// One item together with the host element rendering it
#[derive(Debug)]
struct Slot<E> {
    item: MediaItem,
    element: E,
    /// Set after a late load failure; cleared when the slot is reloaded on activation
    degraded: bool,
}

/// Generic media carousel
#[derive(Debug)]
pub struct Carousel<E: MediaElement> {
    id: Uuid,
    name: String,
    settings: EngineSettings,
    slots: Vec<Slot<E>>,
    current_index: usize,
    timer: AutoAdvanceTimer,
    started: bool,
    hovered: bool,
    disposed: bool,
    last_playback: Option<PlaybackOutcome>,
}

impl<E: MediaElement> Carousel<E> {
    /// Create a carousel over pre-built `(item, element)` pairs
    ///
    /// Nothing is rendered until [`Carousel::start`] is called.
    pub fn new(
        name: impl Into<String>,
        settings: EngineSettings,
        slots: impl IntoIterator<Item = (MediaItem, E)>,
    ) -> Self {
        let slots: Vec<Slot<E>> = slots
            .into_iter()
            .map(|(item, element)| Slot {
                item,
                element,
                degraded: false,
            })
            .collect();
        let name = name.into();
        let id = Uuid::new_v4();

        debug!("Created carousel '{}' ({}) with {} item(s)", name, id, slots.len());

        Self {
            id,
            name,
            settings,
            slots,
            current_index: 0,
            timer: AutoAdvanceTimer::new(),
            started: false,
            hovered: false,
            disposed: false,
            last_playback: None,
        }
    }

    /// Render the initial state and schedule the first advance
    pub fn start(&mut self, now: Instant) {
        self.started = true;
        if self.is_inert() {
            debug!("Carousel '{}' has no items; staying inert", self.name);
            return;
        }
        info!(
            "Starting carousel '{}' with {} item(s)",
            self.name,
            self.slots.len()
        );
        self.recompute(now);
    }

    /// Step one item forward or backward, wrapping
    ///
    /// Returns the new index, or `None` when the carousel is inert.
    pub fn advance(&mut self, direction: Direction, now: Instant) -> Option<usize> {
        if self.is_inert() {
            return None;
        }

        let previous = self.current_index;
        self.current_index = direction.apply(previous, self.slots.len());
        debug!(
            "Carousel '{}' {:?}: {} -> {}",
            self.name, direction, previous, self.current_index
        );

        self.recompute(now);
        Some(self.current_index)
    }

    /// Make `index` the active item
    pub fn jump_to(&mut self, index: usize, now: Instant) -> Result<usize> {
        if self.disposed {
            return Err(CarouselError::Disposed);
        }
        let len = self.slots.len();
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }

        debug!("Carousel '{}' jump: {} -> {}", self.name, self.current_index, index);
        self.current_index = index;
        self.recompute(now);
        Ok(index)
    }

    /// Fire the pending auto-advance if its deadline has passed
    ///
    /// Returns the new index when an advance happened.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if self.is_inert() {
            return None;
        }
        let fired = self.timer.fire_if_due(now)?;
        debug!(
            "Carousel '{}' auto-advance fired (generation {})",
            self.name, fired.generation
        );
        self.advance(Direction::Forward, now)
    }

    /// Pointer entered the container: suspend auto-advance and pause the active item
    pub fn pointer_enter(&mut self) {
        if self.is_inert() || self.hovered {
            return;
        }
        self.hovered = true;
        self.timer.cancel();
        let current = self.current_index;
        self.slots[current].element.pause();
        debug!("Carousel '{}' suspended on hover", self.name);
    }

    /// Pointer left the container: resume playback and restart the full delay
    pub fn pointer_leave(&mut self, now: Instant) {
        if self.is_inert() {
            return;
        }
        self.hovered = false;
        let current = self.current_index;
        let outcome = self.slots[current].element.play();
        self.record_playback(outcome);
        self.schedule_auto_advance(now);
        debug!("Carousel '{}' resumed after hover", self.name);
    }

    /// An admitted item failed to load: show a placeholder, keep it in rotation
    pub fn mark_failed(&mut self, index: usize) -> Result<()> {
        if self.disposed {
            return Err(CarouselError::Disposed);
        }
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(CarouselError::IndexOutOfRange { index, len })?;

        warn!(
            "Carousel '{}': item {} ({}) failed to load, showing placeholder",
            self.name, index, slot.item.source_url
        );
        slot.element.show_placeholder();
        slot.degraded = true;
        Ok(())
    }

    /// Metadata for `index` became available; start it if it is the visible item
    pub fn metadata_loaded(&mut self, index: usize) -> Option<PlaybackOutcome> {
        if self.is_inert() || self.hovered || index != self.current_index {
            return None;
        }
        let outcome = self.slots[index].element.play();
        self.record_playback(outcome.clone());
        Some(outcome)
    }

    /// Add an item discovered after construction
    ///
    /// The first item appended to a started, empty carousel brings it to life.
    /// Later appends only refresh role classes so the active item keeps playing.
    pub fn append(&mut self, mut item: MediaItem, element: E, now: Instant) -> Result<usize> {
        if self.disposed {
            return Err(CarouselError::Disposed);
        }
        let was_empty = self.slots.is_empty();
        item.id = self.slots.len();
        self.slots.push(Slot {
            item,
            element,
            degraded: false,
        });

        if self.started {
            if was_empty {
                self.recompute(now);
            } else {
                self.refresh_role_classes();
            }
        }
        Ok(self.slots.len())
    }

    /// Tear down: clear the pending advance and ignore all further input
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timer.cancel();
        if let Some(slot) = self.slots.get_mut(self.current_index) {
            slot.element.pause();
        }
        self.disposed = true;
        info!("Carousel '{}' disposed", self.name);
    }

    /// Instance identifier used in logs
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Configured name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no items
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether transitions are disabled (no items, or disposed)
    pub fn is_inert(&self) -> bool {
        self.slots.is_empty() || self.disposed
    }

    /// Whether the pointer is over the container
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether [`Carousel::dispose`] has been called
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Index of the active item (always 0 when empty)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The active item, if any
    pub fn active_item(&self) -> Option<&MediaItem> {
        self.slots.get(self.current_index).map(|slot| &slot.item)
    }

    /// Item at `index`
    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.slots.get(index).map(|slot| &slot.item)
    }

    /// All items in order
    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.slots.iter().map(|slot| &slot.item)
    }

    /// Whether the item at `index` is showing a placeholder
    pub fn is_degraded(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.degraded)
    }

    /// Current role of every item; empty while inert
    pub fn roles(&self) -> RoleMap {
        if self.is_inert() {
            RoleMap::new()
        } else {
            assign_roles(self.current_index, self.slots.len())
        }
    }

    /// Deadline of the pending auto-advance
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// The pending auto-advance
    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.timer.pending()
    }

    /// Outcome of the most recent playback attempt on an active item
    pub fn last_playback(&self) -> Option<&PlaybackOutcome> {
        self.last_playback.as_ref()
    }

    /// Apply roles and playback side effects for the current index, then reschedule
    fn recompute(&mut self, now: Instant) {
        self.started = true;
        let len = self.slots.len();
        let current = self.current_index;
        let hovered = self.hovered;
        let mut outcome = None;

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let role = role_for(index, current, len);
            slot.element.apply_role(role);

            if role == Role::Active {
                if slot.degraded {
                    debug!("Reloading degraded item {} before activation", index);
                    slot.element.reload();
                    slot.degraded = false;
                }
                slot.element.rewind();
                if hovered {
                    slot.element.pause();
                } else {
                    outcome = Some(slot.element.play());
                }
            } else {
                slot.element.pause();
                slot.element.rewind();
            }
        }

        if let Some(outcome) = outcome {
            self.record_playback(outcome);
        }
        self.schedule_auto_advance(now);
    }

    /// Re-apply role classes without touching the active item's playback
    fn refresh_role_classes(&mut self) {
        let len = self.slots.len();
        let current = self.current_index;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let role = role_for(index, current, len);
            slot.element.apply_role(role);
            if role != Role::Active {
                slot.element.pause();
            }
        }
    }

    fn schedule_auto_advance(&mut self, now: Instant) {
        self.timer.cancel();
        if self.hovered || self.is_inert() {
            return;
        }
        let delay = self.delay_for_active();
        let pending = self.timer.schedule(now, delay);
        debug!(
            "Carousel '{}' next advance in {:?} (generation {})",
            self.name, delay, pending.generation
        );
    }

    fn delay_for_active(&self) -> Duration {
        let slot = &self.slots[self.current_index];
        if self.settings.duration_aware && slot.item.is_video() {
            if let Some(duration) = slot.element.duration().filter(|d| !d.is_zero()) {
                return duration + self.settings.duration_buffer;
            }
        }
        self.settings.default_delay
    }

    fn record_playback(&mut self, outcome: PlaybackOutcome) {
        if let PlaybackOutcome::Suppressed(reason) = &outcome {
            debug!("Carousel '{}' playback suppressed: {}", self.name, reason);
        }
        self.last_playback = Some(outcome);
    }
}
