//! Configuration management module
//!
//! This module handles loading, saving, and managing carousel configuration.
//! Configuration is stored in `$MAPLECAROUSEL_HOME/maplecarousel/config.json`
//! with atomic writes to prevent corruption. The defaults reproduce the four
//! carousel instances of the storefront.

pub mod manager;
pub mod models;

pub use manager::{ConfigManager, HOME_ENV_VAR};
pub use models::{AppConfig, CarouselConfig, ItemSource, RuntimePreferences, StaticItem};
