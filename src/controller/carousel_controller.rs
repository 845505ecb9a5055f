//! Carousel controller implementation
//!
//! Translates host events into engine operations and runs the auto-advance loop.

use crate::config::CarouselConfig;
use crate::engine::{Carousel, RoleMap};
use crate::input::{Direction, NavKey, SwipeTracker};
use crate::media::MediaElement;
use parking_lot::Mutex;
use std::sync::mpsc::{self, RecvTimeoutError, TrySendError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Input delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// "Next" button pressed
    NextClicked,
    /// "Previous" button pressed
    PrevClicked,
    /// Key pressed anywhere on the page
    Key {
        /// Which key
        key: NavKey,
        /// Whether the carousel container is currently on screen
        container_visible: bool,
    },
    /// Touch began at horizontal position `x`
    TouchStart {
        /// Horizontal position in pixels
        x: f32,
    },
    /// Touch ended at horizontal position `x`
    TouchEnd {
        /// Horizontal position in pixels
        x: f32,
    },
    /// Pointer entered the container
    PointerEnter,
    /// Pointer left the container
    PointerLeave,
    /// Indicator dot clicked
    JumpTo(usize),
    /// Element at index failed to load
    MediaFailed(usize),
    /// Element at index has its metadata
    MetadataLoaded(usize),
    /// Tear the carousel down
    Dispose,
}

/// Carousel state for host updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselSnapshot {
    /// Index of the active item
    pub current_index: usize,
    /// Role of every item, by index
    pub roles: RoleMap,
    /// Caption of the active item, if any
    pub active_title: Option<String>,
    /// Whether auto-advance is suspended by hover
    pub hovered: bool,
}

/// Carousel controller
pub struct CarouselController<E: MediaElement> {
    /// Engine
    carousel: Carousel<E>,
    /// Swipe gesture state
    swipe: SwipeTracker,
    /// Ignore arrow keys while the container is off screen
    keyboard_requires_visible: bool,
    /// Event receiver from the host (taken when the event loop starts)
    event_receiver: Option<mpsc::Receiver<CarouselEvent>>,
    /// Snapshot sender to the host
    state_sender: mpsc::SyncSender<CarouselSnapshot>,
}

impl<E: MediaElement> CarouselController<E> {
    /// Create a controller around an engine that has not been started yet
    pub fn new(
        carousel: Carousel<E>,
        config: &CarouselConfig,
        event_receiver: mpsc::Receiver<CarouselEvent>,
        state_sender: mpsc::SyncSender<CarouselSnapshot>,
    ) -> Self {
        Self {
            carousel,
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            keyboard_requires_visible: config.keyboard_requires_visible,
            event_receiver: Some(event_receiver),
            state_sender,
        }
    }

    /// Engine owned by this controller
    pub fn carousel(&self) -> &Carousel<E> {
        &self.carousel
    }

    /// Start the engine and publish the initial state
    pub fn start(&mut self, now: Instant) {
        self.carousel.start(now);
        info!(
            "Controller for carousel '{}' ({}) started",
            self.carousel.name(),
            self.carousel.id()
        );
        self.publish();
    }

    /// Take ownership of the event receiver if it hasn't been taken yet.
    /// Returns None if already taken. Caller should treat None as a no-op.
    fn take_event_receiver(&mut self) -> Option<mpsc::Receiver<CarouselEvent>> {
        self.event_receiver.take()
    }

    /// Run the event loop until `Dispose` arrives or the host hangs up.
    /// Waits for events until the next auto-advance is due.
    pub fn run(&mut self) {
        let Some(event_receiver) = self.take_event_receiver() else {
            warn!("Event loop already running; run() call ignored");
            return;
        };

        info!("Entering carousel event loop for '{}'", self.carousel.name());
        loop {
            let received = match self.carousel.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    event_receiver.recv_timeout(wait)
                }
                None => event_receiver
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(event) => {
                    if !self.handle_event(event, Instant::now()) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => self.handle_tick(Instant::now()),
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Carousel event channel disconnected. Exiting event loop.");
                    break;
                }
            }
        }

        self.dispose();
        info!("Carousel event loop exited");
    }

    /// Handle one host event. Returns `false` once the controller should stop.
    pub fn handle_event(&mut self, event: CarouselEvent, now: Instant) -> bool {
        if self.carousel.is_disposed() {
            debug!("Ignoring {:?} after dispose", event);
            return false;
        }

        let changed = match event {
            CarouselEvent::NextClicked => self.carousel.advance(Direction::Forward, now).is_some(),
            CarouselEvent::PrevClicked => self.carousel.advance(Direction::Backward, now).is_some(),
            CarouselEvent::Key {
                key,
                container_visible,
            } => {
                if self.keyboard_requires_visible && !container_visible {
                    debug!("Ignoring {:?}: carousel not visible", key);
                    false
                } else {
                    key.direction()
                        .and_then(|direction| self.carousel.advance(direction, now))
                        .is_some()
                }
            }
            CarouselEvent::TouchStart { x } => {
                self.swipe.touch_start(x);
                false
            }
            CarouselEvent::TouchEnd { x } => self
                .swipe
                .touch_end(x)
                .and_then(|direction| self.carousel.advance(direction, now))
                .is_some(),
            CarouselEvent::PointerEnter => {
                self.carousel.pointer_enter();
                true
            }
            CarouselEvent::PointerLeave => {
                self.carousel.pointer_leave(now);
                true
            }
            CarouselEvent::JumpTo(index) => match self.carousel.jump_to(index, now) {
                Ok(_) => true,
                Err(e) => {
                    warn!("Jump rejected: {}", e);
                    false
                }
            },
            CarouselEvent::MediaFailed(index) => {
                if let Err(e) = self.carousel.mark_failed(index) {
                    warn!("Failure report rejected: {}", e);
                }
                false
            }
            CarouselEvent::MetadataLoaded(index) => {
                self.carousel.metadata_loaded(index);
                false
            }
            CarouselEvent::Dispose => {
                self.dispose();
                return false;
            }
        };

        if changed {
            self.publish();
        }
        true
    }

    /// Fire the pending advance if it is due
    pub fn handle_tick(&mut self, now: Instant) {
        if self.carousel.tick(now).is_some() {
            self.publish();
        }
    }

    /// Dispose the engine (idempotent)
    pub fn dispose(&mut self) {
        self.carousel.dispose();
    }

    /// Current state as seen by the host
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            current_index: self.carousel.current_index(),
            roles: self.carousel.roles(),
            active_title: self
                .carousel
                .active_item()
                .and_then(|item| item.title.clone()),
            hovered: self.carousel.is_hovered(),
        }
    }

    /// Send the current state to the host without blocking the loop
    fn publish(&self) {
        let snapshot = self.snapshot();
        debug!(
            "Publishing snapshot: index = {}, hovered = {}",
            snapshot.current_index, snapshot.hovered
        );

        match self.state_sender.try_send(snapshot) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("Snapshot channel full; dropping update"),
            Err(TrySendError::Disconnected(_)) => debug!("Snapshot receiver gone"),
        }
    }
}

impl<E: MediaElement + Send + 'static> CarouselController<E> {
    /// Spawn the event loop in a background thread. Only locks the controller while handling
    /// individual events, so the host can inspect it between events.
    ///
    /// Returns `None` if the event loop was already started.
    pub fn spawn_event_loop(
        controller: Arc<Mutex<Self>>,
    ) -> Option<std::thread::JoinHandle<()>> {
        let event_receiver = controller.lock().take_event_receiver()?;

        Some(std::thread::spawn(move || {
            info!("Entering carousel event loop (background)");
            loop {
                let deadline = controller.lock().carousel.next_deadline();
                let received = match deadline {
                    Some(deadline) => {
                        event_receiver.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                    }
                    None => event_receiver
                        .recv()
                        .map_err(|_| RecvTimeoutError::Disconnected),
                };

                match received {
                    Ok(event) => {
                        let mut controller_guard = controller.lock();
                        if !controller_guard.handle_event(event, Instant::now()) {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        controller.lock().handle_tick(Instant::now());
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        warn!("Carousel event channel disconnected. Exiting event loop.");
                        break;
                    }
                }
            }
            controller.lock().dispose();
            info!("Carousel event loop exited");
        }))
    }
}
