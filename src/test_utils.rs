#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `MapleCarousel` unit tests.
//!
//! This module provides common test infrastructure used across multiple test modules.
//! It is only compiled during testing (`#[cfg(test)]`).

use crate::discovery::MediaProbe;
use crate::engine::{Carousel, EngineSettings};
use crate::error::{CarouselError, Result, StringError};
use crate::media::{HeadlessElement, MediaItem};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

/// Global mutex to serialize tests that modify the `MAPLECAROUSEL_HOME` environment variable.
static HOME_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Build a started-ready carousel of `len` videos named `1.mp4..`, returning
/// clones of the elements for inspection
pub fn headless_carousel(
    len: usize,
    settings: EngineSettings,
) -> (Carousel<HeadlessElement>, Vec<HeadlessElement>) {
    let items: Vec<MediaItem> = (0..len)
        .map(|i| MediaItem::new(i, format!("resources/carousel-videos/{}.mp4", i + 1)))
        .collect();
    let elements: Vec<HeadlessElement> = items.iter().map(HeadlessElement::for_item).collect();
    let carousel = Carousel::new("test", settings, items.into_iter().zip(elements.clone()));
    (carousel, elements)
}

/// Probe answering from a fixed table, optionally sleeping per URL
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    /// URLs that exist
    pub existing: Vec<String>,
    /// Artificial latency per URL
    pub delays: HashMap<String, Duration>,
    /// URLs whose probe returns an error
    pub failing: Vec<String>,
}

impl MediaProbe for ScriptedProbe {
    fn probe(&self, url: &str) -> Result<bool> {
        if let Some(delay) = self.delays.get(url) {
            std::thread::sleep(*delay);
        }
        if self.failing.iter().any(|u| u == url) {
            return Err(CarouselError::ProbeFailed(StringError::new("scripted failure")));
        }
        Ok(self.existing.iter().any(|u| u == url))
    }
}

/// In-memory log sink for a scoped `tracing` subscriber
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// RAII guard that sets `MAPLECAROUSEL_HOME` for a test scope
/// and restores the original value when dropped.
///
/// The `HOME_LOCK` mutex ensures tests modify the variable serially, and each
/// test gets its own `TempDir`, so parallel tests never share a config path.
pub struct HomeGuard {
    original: Option<String>,
    // Held for the lifetime of the guard to keep access exclusive
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding HOME_LOCK"
)]
impl HomeGuard {
    /// Create a new guard that points `MAPLECAROUSEL_HOME` at the given temp directory.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = HOME_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var(crate::config::HOME_ENV_VAR).ok();
        // SAFETY: access to the variable is serialized by HOME_LOCK and restored on drop.
        unsafe {
            std::env::set_var(crate::config::HOME_ENV_VAR, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding HOME_LOCK"
)]
impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: still holding HOME_LOCK; restores the pre-test state.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(crate::config::HOME_ENV_VAR, original);
            }
        } else {
            unsafe {
                std::env::remove_var(crate::config::HOME_ENV_VAR);
            }
        }
    }
}

#[test]
fn test_headless_carousel_builder() {
    let (carousel, elements) = headless_carousel(3, EngineSettings::default());
    assert_eq!(carousel.len(), 3);
    assert_eq!(elements.len(), 3);
    assert_eq!(
        carousel.item(2).unwrap().source_url,
        "resources/carousel-videos/3.mp4"
    );
}
