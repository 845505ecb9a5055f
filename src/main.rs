//! `MapleCarousel` driver
//!
//! Runs one configured carousel headlessly. Items are discovered (or taken from
//! the static list), the controller runs on a background thread, and line
//! commands read from stdin are translated into carousel events:
//!
//! ```text
//! next | prev | left | right | jump <i> | swipe <x0> <x1>
//! enter | leave | fail <i> | loaded <i> | quit
//! ```
//!
//! Every published snapshot is printed to stdout.

use anyhow::{Context, Result, bail};
use maplecarousel::{
    config::{CarouselConfig, ConfigManager, ItemSource, RuntimePreferences},
    controller::{CarouselController, CarouselEvent, CarouselSnapshot},
    discovery::{self, DiscoveryRequest, FsProbe, HttpProbe, MediaProbe, SourcePattern},
    engine::{Carousel, EngineSettings},
    error::{CarouselError, get_user_friendly_error},
    input::NavKey,
    media::{HeadlessElement, MediaItem},
    utils,
};
use parking_lot::Mutex;
use std::io::BufRead;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Preset used when none is named on the command line
const DEFAULT_PRESET: &str = "hero";

/// One parsed stdin line
#[derive(Debug, PartialEq)]
enum Command {
    Events(Vec<CarouselEvent>),
    Quit,
}

fn main() -> Result<()> {
    utils::init_logging(&ConfigManager::get_data_dir().join("logs"))
        .context("Failed to initialize logging system")?;

    let config = ConfigManager::load().context("Failed to load carousel configuration")?;
    let preset = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PRESET.to_string());
    let Some(carousel_config) = config.carousel(&preset).cloned() else {
        bail!("Unknown carousel '{preset}'");
    };

    let items = match load_items(&carousel_config, &config.preferences) {
        Ok(items) => items,
        Err(e) => {
            error!("Failed to load items for '{}': {}", preset, e);
            eprintln!("{}", get_user_friendly_error(&e));
            return Err(e).context("Failed to load carousel items");
        }
    };
    info!("Carousel '{}' loaded with {} item(s)", preset, items.len());

    let slots: Vec<(MediaItem, HeadlessElement)> = items
        .into_iter()
        .map(|item| {
            let element = HeadlessElement::for_item(&item);
            (item, element)
        })
        .collect();
    let carousel = Carousel::new(
        carousel_config.name.clone(),
        EngineSettings::from(&carousel_config),
        slots,
    );

    let (event_tx, event_rx) = mpsc::sync_channel(32);
    let (state_tx, state_rx) = mpsc::sync_channel(config.preferences.snapshot_buffer.max(1));

    let mut controller = CarouselController::new(carousel, &carousel_config, event_rx, state_tx);
    controller.start(Instant::now());
    let controller = Arc::new(Mutex::new(controller));

    let printer = std::thread::spawn(move || {
        for snapshot in state_rx {
            println!("{}", format_snapshot(&snapshot));
        }
    });
    let event_loop = CarouselController::spawn_event_loop(Arc::clone(&controller))
        .context("Carousel event loop already running")?;

    read_commands(&event_tx)?;

    // Loop exits on Dispose; ignore a loop that is already gone
    let _ = event_tx.send(CarouselEvent::Dispose);
    if event_loop.join().is_err() {
        warn!("Carousel event loop panicked");
    }
    drop(controller);
    if printer.join().is_err() {
        warn!("Snapshot printer panicked");
    }

    info!("MapleCarousel shutting down");
    Ok(())
}

/// Build the item list of a carousel, probing when the source is numbered
fn load_items(
    config: &CarouselConfig,
    preferences: &RuntimePreferences,
) -> maplecarousel::Result<Vec<MediaItem>> {
    let ItemSource::Probed { pattern, max_probe } = &config.source else {
        return Ok(config.source.static_items().unwrap_or_default());
    };

    let pattern = SourcePattern::parse(pattern)?;
    let probe_timeout = Duration::from_millis(config.probe_timeout_ms);
    let probe: Arc<dyn MediaProbe> = if pattern.is_remote() {
        Arc::new(HttpProbe::new(probe_timeout)?)
    } else {
        Arc::new(FsProbe::new(&preferences.media_root))
    };

    let page_host = preferences
        .page_host
        .clone()
        .or_else(|| pattern.host().map(str::to_string));
    let request = DiscoveryRequest {
        pattern,
        max_probe: *max_probe,
        probe_timeout,
        page_host,
    };
    Ok(discovery::discover(&request, probe).items)
}

/// Forward stdin commands until `quit` or end of input
fn read_commands(event_tx: &mpsc::SyncSender<CarouselEvent>) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Events(events)) => {
                for event in events {
                    if event_tx.send(event).is_err() {
                        return Err(CarouselError::ChannelClosed.into());
                    }
                }
            }
            None if line.trim().is_empty() => {}
            None => eprintln!("unknown command: {}", line.trim()),
        }
    }
    Ok(())
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let name = words.next()?;
    let key = |key: NavKey| CarouselEvent::Key {
        key,
        container_visible: true,
    };
    let events = match name {
        "quit" | "exit" => return Some(Command::Quit),
        "next" => vec![CarouselEvent::NextClicked],
        "prev" => vec![CarouselEvent::PrevClicked],
        "left" => vec![key(NavKey::ArrowLeft)],
        "right" => vec![key(NavKey::ArrowRight)],
        "enter" => vec![CarouselEvent::PointerEnter],
        "leave" => vec![CarouselEvent::PointerLeave],
        "jump" => vec![CarouselEvent::JumpTo(words.next()?.parse().ok()?)],
        "fail" => vec![CarouselEvent::MediaFailed(words.next()?.parse().ok()?)],
        "loaded" => vec![CarouselEvent::MetadataLoaded(words.next()?.parse().ok()?)],
        "swipe" => {
            let start = words.next()?.parse::<f32>().ok()?;
            let end = words.next()?.parse::<f32>().ok()?;
            vec![
                CarouselEvent::TouchStart { x: start },
                CarouselEvent::TouchEnd { x: end },
            ]
        }
        _ => return None,
    };
    Some(Command::Events(events))
}

fn format_snapshot(snapshot: &CarouselSnapshot) -> String {
    let roles: Vec<&str> = snapshot.roles.iter().map(|role| role.class_name()).collect();
    let mut line = format!("[{}] {}", snapshot.current_index, roles.join(" "));
    if let Some(title) = &snapshot.active_title {
        line.push_str(&format!(" \"{title}\""));
    }
    if snapshot.hovered {
        line.push_str(" (paused)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplecarousel::engine::assign_roles;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(
            parse_command("  jump 3 "),
            Some(Command::Events(vec![CarouselEvent::JumpTo(3)]))
        );
        assert_eq!(
            parse_command("swipe 200 100"),
            Some(Command::Events(vec![
                CarouselEvent::TouchStart { x: 200.0 },
                CarouselEvent::TouchEnd { x: 100.0 },
            ]))
        );
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command("jump x"), None);
        assert_eq!(parse_command("dance"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_format_snapshot() {
        let snapshot = CarouselSnapshot {
            current_index: 1,
            roles: assign_roles(1, 3),
            active_title: Some("Package Video 2".to_string()),
            hovered: true,
        };
        assert_eq!(
            format_snapshot(&snapshot),
            "[1] prev active next \"Package Video 2\" (paused)"
        );
    }

    #[test]
    fn test_static_items_skip_probing() {
        let items = load_items(&CarouselConfig::package(), &RuntimePreferences::default()).unwrap();
        assert_eq!(items.len(), 3);
    }
}
