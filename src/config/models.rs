//! Configuration data models
//!
//! This module defines the data structures used for carousel configuration.
//! Missing fields fall back to the defaults of the hero carousel.

use crate::discovery::SourcePattern;
use crate::error::{CarouselError, Result, StringError};
use crate::input::DEFAULT_SWIPE_THRESHOLD;
use crate::media::{MediaItem, MediaKind};
use serde::{Deserialize, Serialize};

/// A pre-known carousel entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticItem {
    /// URL or path of the media
    pub src: String,
    /// Optional caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit kind; inferred from the extension when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
}

impl StaticItem {
    /// Entry without a caption
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: None,
            kind: None,
        }
    }

    /// Entry with a caption
    pub fn titled(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::new(src)
        }
    }
}

/// Where a carousel's items come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemSource {
    /// Fixed list known up front
    Static {
        /// Items in display order
        items: Vec<StaticItem>,
    },
    /// Numbered candidates probed at startup
    Probed {
        /// Template with one `{n}` placeholder, e.g. `resources/carousel-videos/{n}.mp4`
        pattern: String,
        /// Highest candidate number to probe
        max_probe: usize,
    },
}

impl ItemSource {
    /// Build the items of a static source; `None` for probed sources
    pub fn static_items(&self) -> Option<Vec<MediaItem>> {
        match self {
            Self::Static { items } => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(id, entry)| {
                        let mut item = MediaItem::new(id, entry.src.clone());
                        if let Some(kind) = entry.kind {
                            item.kind = kind;
                        }
                        item.title.clone_from(&entry.title);
                        item
                    })
                    .collect(),
            ),
            Self::Probed { .. } => None,
        }
    }
}

/// Settings of one carousel instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Instance name used in logs and on the command line
    pub name: String,
    /// Item source
    pub source: ItemSource,
    /// Auto-advance delay in milliseconds when no video duration applies
    pub default_delay_ms: u64,
    /// Use the active video's duration (plus buffer) as the delay when known
    pub duration_aware: bool,
    /// Added to a known video duration, in milliseconds
    pub duration_buffer_ms: u64,
    /// Horizontal travel in pixels before a touch counts as a swipe
    pub swipe_threshold_px: f32,
    /// Upper bound for a single discovery probe, in milliseconds
    pub probe_timeout_ms: u64,
    /// Only react to arrow keys while the container is visible
    pub keyboard_requires_visible: bool,
}

impl CarouselConfig {
    /// Hero carousel: probes up to 20 numbered videos, 8 s default, duration aware
    pub fn hero() -> Self {
        Self {
            name: "hero".to_string(),
            source: ItemSource::Probed {
                pattern: "resources/carousel-videos/{n}.mp4".to_string(),
                max_probe: 20,
            },
            default_delay_ms: 8000,
            duration_aware: true,
            duration_buffer_ms: 500,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD,
            probe_timeout_ms: 3000,
            keyboard_requires_visible: true,
        }
    }

    /// Circular package gallery: five fixed videos rotating every 5 s
    pub fn circular() -> Self {
        Self {
            name: "circular".to_string(),
            source: ItemSource::Static {
                items: (1..=5)
                    .map(|n| StaticItem::new(format!("resources/carousel-videos/{n}.mp4")))
                    .collect(),
            },
            default_delay_ms: 5000,
            duration_aware: false,
            keyboard_requires_visible: false,
            ..Self::hero()
        }
    }

    /// Package page carousel: three titled videos rotating every 5 s
    pub fn package() -> Self {
        Self {
            name: "package".to_string(),
            source: ItemSource::Static {
                items: (1..=3)
                    .map(|n| {
                        StaticItem::titled(
                            format!("resources/carousel-videos/{n}.mp4"),
                            format!("Package Video {n}"),
                        )
                    })
                    .collect(),
            },
            default_delay_ms: 5000,
            duration_aware: false,
            ..Self::hero()
        }
    }

    /// Recent-orders gallery source: probes up to 20 numbered order videos
    pub fn recent_orders() -> Self {
        Self {
            name: "recent_orders".to_string(),
            source: ItemSource::Probed {
                pattern: "resources/recent-orders/{n}.mp4".to_string(),
                max_probe: 20,
            },
            ..Self::hero()
        }
    }

    /// Reject settings the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.default_delay_ms == 0 {
            return Err(CarouselError::ConfigError(StringError::new(format!(
                "carousel '{}': default_delay_ms must be positive",
                self.name
            ))));
        }
        if self.swipe_threshold_px.is_nan() || self.swipe_threshold_px < 0.0 {
            return Err(CarouselError::ConfigError(StringError::new(format!(
                "carousel '{}': swipe_threshold_px must be a non-negative number",
                self.name
            ))));
        }
        if self.probe_timeout_ms == 0 {
            return Err(CarouselError::ConfigError(StringError::new(format!(
                "carousel '{}': probe_timeout_ms must be positive",
                self.name
            ))));
        }
        if let ItemSource::Probed { pattern, max_probe } = &self.source {
            if *max_probe == 0 {
                return Err(CarouselError::ConfigError(StringError::new(format!(
                    "carousel '{}': max_probe must be at least 1",
                    self.name
                ))));
            }
            SourcePattern::parse(pattern)?;
        }
        Ok(())
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// Settings shared by all instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimePreferences {
    /// Host name of the page serving the site; empty-discovery warnings are
    /// suppressed for local development hosts
    pub page_host: Option<String>,
    /// Directory probed sources are resolved against when they are not URLs
    pub media_root: String,
    /// Capacity of the snapshot channel between controller and host
    pub snapshot_buffer: usize,
}

impl Default for RuntimePreferences {
    fn default() -> Self {
        Self {
            page_host: None,
            media_root: ".".to_string(),
            snapshot_buffer: 32,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Carousel instances on the site
    pub carousels: Vec<CarouselConfig>,
    /// Shared settings
    pub preferences: RuntimePreferences,
}

impl AppConfig {
    /// Find an instance by name
    pub fn carousel(&self, name: &str) -> Option<&CarouselConfig> {
        self.carousels.iter().find(|c| c.name == name)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            carousels: vec![
                CarouselConfig::hero(),
                CarouselConfig::circular(),
                CarouselConfig::package(),
                CarouselConfig::recent_orders(),
            ],
            preferences: RuntimePreferences::default(),
        }
    }
}
