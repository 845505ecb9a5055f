//! Carousel controller module
//!
//! This module connects host input to the carousel engine and reports state
//! back to the host.
//!
//! # Overview
//!
//! The controller is the single owner of a [`Carousel`](crate::engine::Carousel) and:
//! - **Receives input events** (buttons, keys, swipes, hover, load notifications)
//! - **Drives auto-advance** by waiting on the engine's next deadline
//! - **Publishes snapshots** to the host after every state change
//! - **Disposes the engine** on request or when the input side hangs up
//!
//! # Event Flow
//!
//! ```text
//! Host input → CarouselEvent → CarouselController → Carousel (roles, playback, timer)
//!                                      ↓
//!                              CarouselSnapshot → Host
//! ```
//!
//! # Timing
//!
//! The event loop blocks on `recv_timeout` until the pending advance is due.
//! A timeout fires `tick`, which performs at most one advance. Because every
//! navigation replaces the pending advance, at most one advance is ever
//! scheduled per carousel.

pub mod carousel_controller;

pub use carousel_controller::{CarouselController, CarouselEvent, CarouselSnapshot};
