//! `MapleCarousel` - media carousel engine for the MaplePrints storefront
//!
//! Drives the hero video carousel, the circular package gallery, the recent-orders
//! hover gallery and the video lightbox from one configurable state machine.
//! Uses a single-threaded event-driven design: the host feeds `CarouselEvent`s
//! into a `CarouselController`, which owns the `Carousel` engine and its one
//! pending auto-advance deadline.
//!
//! # Architecture
//!
//! - `discovery`: probes numbered candidate sources concurrently and keeps the ones that exist
//! - `engine`: role assignment (`active`/`prev`/`next`/`hidden`) and auto-advance scheduling
//! - `controller`: event loop translating clicks, keys, swipes and hover into engine calls
//! - `lightbox` / `gallery`: the overlay player and the hover-to-play grid

// Module declarations
pub mod config;
pub mod controller;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod gallery;
pub mod input;
pub mod lightbox;
pub mod media;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{CarouselError, Result};
