//! Media items and host element handles
//!
//! A [`MediaItem`] is the immutable description of one carousel entry. The
//! engine never touches a page directly; it drives a [`MediaElement`] handle
//! supplied by the host for every item.
//!
//! [`HeadlessElement`] is an in-memory element that records every command it
//! receives. The driver binary renders through it, and tests assert on it.

pub mod element;
pub mod headless;
pub mod item;

pub use element::{MediaElement, PlaybackOutcome, SourcePlayer};
pub use headless::{HeadlessElement, HeadlessState};
pub use item::{MediaItem, MediaKind};
