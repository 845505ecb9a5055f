//! Media discovery module
//!
//! Finds which numbered candidate sources exist before a carousel is built.
//!
//! # Overview
//!
//! - **Concurrent probing**: every candidate `1..=max_probe` gets its own probe thread
//! - **Shared deadline**: probes still running `probe_timeout` after the start are abandoned
//! - **Quiet locally**: an empty result only warns outside local development
//! - **Wait for all**: a missing candidate never stops the others
//! - **Ordered result**: survivors keep their numeric order regardless of which probe finished first
//!
//! # Example Usage
//!
//! ```no_run
//! use maplecarousel::discovery::{DiscoveryRequest, FsProbe, SourcePattern, discover};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let request = DiscoveryRequest {
//!     pattern: SourcePattern::parse("resources/carousel-videos/{n}.mp4").unwrap(),
//!     max_probe: 20,
//!     probe_timeout: Duration::from_secs(3),
//!     page_host: None,
//! };
//! let discovery = discover(&request, Arc::new(FsProbe::new(".")));
//! println!("found {} video(s)", discovery.items.len());
//! ```

pub mod pattern;
pub mod probe;

pub use pattern::{SourcePattern, is_local_development_host};
pub use probe::{FsProbe, HttpProbe, MediaProbe};

use crate::error::Result;
use crate::media::MediaItem;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What a single probe concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The source exists
    Found,
    /// The source does not exist or could not be loaded
    Missing,
    /// The probe did not answer within the timeout
    TimedOut,
}

/// Outcome of probing one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Candidate number (1-based)
    pub candidate: usize,
    /// Rendered source
    pub url: String,
    /// Verdict
    pub status: ProbeStatus,
}

impl ProbeResult {
    /// Whether the candidate was admitted
    pub fn exists(&self) -> bool {
        self.status == ProbeStatus::Found
    }
}

/// Parameters of one discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    /// Candidate template
    pub pattern: SourcePattern,
    /// Highest candidate number
    pub max_probe: usize,
    /// How long the whole run waits for answers, measured from its start
    pub probe_timeout: Duration,
    /// Host name of the serving page, used to silence warnings during local development
    pub page_host: Option<String>,
}

/// Result of a discovery run
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Admitted items, ids dense from 0, in candidate order
    pub items: Vec<MediaItem>,
    /// Every probe outcome in candidate order
    pub results: Vec<ProbeResult>,
}

/// Probe every candidate and keep the ones that exist
///
/// All probes start together and share one deadline, so a run takes at most
/// `probe_timeout` however many candidates hang.
pub fn discover(request: &DiscoveryRequest, probe: Arc<dyn MediaProbe>) -> Discovery {
    debug!(
        "Probing {} candidate(s) for {}",
        request.max_probe, request.pattern
    );

    let deadline = Instant::now() + request.probe_timeout;
    let pending: Vec<(usize, String, Option<Receiver<Result<bool>>>)> = (1..=request.max_probe)
        .map(|candidate| {
            let url = request.pattern.render(candidate);
            let rx = spawn_probe(Arc::clone(&probe), &url);
            (candidate, url, rx)
        })
        .collect();

    let results: Vec<ProbeResult> = pending
        .into_iter()
        .map(|(candidate, url, rx)| {
            let status = rx.map_or(ProbeStatus::Missing, |rx| {
                await_verdict(&rx, &url, deadline, request.probe_timeout)
            });
            ProbeResult {
                candidate,
                url,
                status,
            }
        })
        .collect();

    let items: Vec<MediaItem> = results
        .iter()
        .filter(|result| result.exists())
        .enumerate()
        .map(|(id, result)| MediaItem::new(id, result.url.clone()).with_source_index(result.candidate))
        .collect();

    if items.is_empty() {
        if is_local_request(request) {
            debug!("No media found for {} (local development)", request.pattern);
        } else {
            warn!("No media found for {}", request.pattern);
        }
    } else {
        info!(
            "Discovered {} of {} candidate(s) for {}",
            items.len(),
            request.max_probe,
            request.pattern
        );
    }

    Discovery { items, results }
}

/// Whether an empty result is expected while developing locally
///
/// Without a page host, a filesystem pattern counts as local.
fn is_local_request(request: &DiscoveryRequest) -> bool {
    match request.page_host.as_deref() {
        Some(host) => is_local_development_host(host),
        None => !request.pattern.is_remote(),
    }
}

/// Start one probe on its own thread
///
/// An abandoned probe thread is detached; its late answer is discarded.
fn spawn_probe(probe: Arc<dyn MediaProbe>, url: &str) -> Option<Receiver<Result<bool>>> {
    let (tx, rx) = mpsc::sync_channel(1);
    let owned_url = url.to_string();

    let spawned = std::thread::Builder::new()
        .name("media-probe".to_string())
        .spawn(move || {
            let verdict = probe.probe(&owned_url);
            // Receiver may have given up already
            let _ = tx.send(verdict);
        });

    match spawned {
        Ok(_) => Some(rx),
        Err(e) => {
            warn!("Failed to spawn probe thread for {}: {}", url, e);
            None
        }
    }
}

/// Wait for a probe's answer until the shared `deadline`
fn await_verdict(
    rx: &Receiver<Result<bool>>,
    url: &str,
    deadline: Instant,
    timeout: Duration,
) -> ProbeStatus {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(Ok(true)) => ProbeStatus::Found,
        Ok(Ok(false)) => ProbeStatus::Missing,
        Ok(Err(e)) => {
            debug!("Probe for {} failed, treating as missing: {}", url, e);
            ProbeStatus::Missing
        }
        Err(RecvTimeoutError::Timeout) => {
            warn!("Probe for {} timed out after {:?}", url, timeout);
            ProbeStatus::TimedOut
        }
        Err(RecvTimeoutError::Disconnected) => {
            warn!("Probe for {} ended without an answer", url);
            ProbeStatus::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CapturedLogs, ScriptedProbe};
    use std::collections::HashMap;

    fn request(max_probe: usize) -> DiscoveryRequest {
        DiscoveryRequest {
            pattern: SourcePattern::parse("v/{n}.mp4").unwrap(),
            max_probe,
            probe_timeout: Duration::from_secs(2),
            page_host: None,
        }
    }

    #[test]
    fn test_discovery_keeps_numeric_order() {
        // Earlier candidates answer last
        let delays = HashMap::from([
            ("v/1.mp4".to_string(), Duration::from_millis(120)),
            ("v/2.mp4".to_string(), Duration::from_millis(60)),
        ]);
        let probe = ScriptedProbe {
            existing: vec!["v/1.mp4".into(), "v/2.mp4".into(), "v/3.mp4".into()],
            delays,
            failing: Vec::new(),
        };

        let discovery = discover(&request(5), Arc::new(probe));
        let urls: Vec<&str> = discovery.items.iter().map(|i| i.source_url.as_str()).collect();
        assert_eq!(urls, ["v/1.mp4", "v/2.mp4", "v/3.mp4"]);
        assert_eq!(discovery.results.len(), 5);
        assert!(!discovery.results[3].exists());
        assert_eq!(discovery.items[2].id, 2);
    }

    #[test]
    fn test_gaps_keep_candidate_numbers() {
        let probe = ScriptedProbe {
            existing: vec!["v/2.mp4".into(), "v/5.mp4".into()],
            ..ScriptedProbe::default()
        };
        let discovery = discover(&request(6), Arc::new(probe));
        assert_eq!(discovery.items.len(), 2);
        assert_eq!(discovery.items[0].id, 0);
        assert_eq!(discovery.items[0].source_index, 2);
        assert_eq!(discovery.items[1].source_index, 5);
    }

    #[test]
    fn test_probe_errors_count_as_missing() {
        let probe = ScriptedProbe {
            existing: vec!["v/1.mp4".into()],
            failing: vec!["v/2.mp4".into()],
            ..ScriptedProbe::default()
        };
        let discovery = discover(&request(2), Arc::new(probe));
        assert_eq!(discovery.items.len(), 1);
        assert_eq!(discovery.results[1].status, ProbeStatus::Missing);
    }

    #[test]
    fn test_hanging_probe_is_bounded() {
        let probe = ScriptedProbe {
            existing: vec!["v/1.mp4".into(), "v/2.mp4".into()],
            delays: HashMap::from([("v/2.mp4".to_string(), Duration::from_secs(5))]),
            failing: Vec::new(),
        };
        let mut req = request(2);
        req.probe_timeout = Duration::from_millis(100);

        let started = Instant::now();
        let discovery = discover(&req, Arc::new(probe));
        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(discovery.items.len(), 1);
        assert_eq!(discovery.results[1].status, ProbeStatus::TimedOut);
    }

    #[test]
    fn test_hanging_candidates_share_one_deadline() {
        // Two workers, eight hanging candidates: the run must not take ceil(8 / 2) timeouts
        let delays = (1..=8)
            .map(|n| (format!("v/{n}.mp4"), Duration::from_secs(5)))
            .collect();
        let probe = ScriptedProbe {
            delays,
            ..ScriptedProbe::default()
        };
        let mut req = request(8);
        req.probe_timeout = Duration::from_millis(200);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap();

        let started = Instant::now();
        let discovery = pool.install(|| discover(&req, Arc::new(probe)));
        assert!(
            started.elapsed() < Duration::from_millis(600),
            "took {:?}",
            started.elapsed()
        );
        assert_eq!(discovery.results.len(), 8);
        assert!(
            discovery
                .results
                .iter()
                .all(|result| result.status == ProbeStatus::TimedOut)
        );
    }

    #[test]
    fn test_empty_discovery_warns_only_for_remote_pages() {
        let cases = [
            ("https://cdn.mapleprints.ca/v/{n}.mp4", None, true),
            ("https://cdn.mapleprints.ca/v/{n}.mp4", Some("localhost"), false),
            ("v/{n}.mp4", None, false),
        ];

        for (pattern, page_host, expect_warning) in cases {
            let logs = CapturedLogs::default();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(logs.clone())
                .with_max_level(tracing::Level::DEBUG)
                .with_ansi(false)
                .finish();
            let req = DiscoveryRequest {
                pattern: SourcePattern::parse(pattern).unwrap(),
                max_probe: 2,
                probe_timeout: Duration::from_secs(2),
                page_host: page_host.map(str::to_string),
            };

            let discovery = tracing::subscriber::with_default(subscriber, || {
                discover(&req, Arc::new(ScriptedProbe::default()))
            });
            assert!(discovery.items.is_empty());

            let output = logs.contents();
            assert!(output.contains("No media found"), "{pattern}: {output}");
            assert_eq!(
                output.contains("WARN"),
                expect_warning,
                "{pattern} with host {page_host:?}: {output}"
            );
        }
    }

    #[test]
    fn test_empty_discovery() {
        let mut req = request(3);
        req.page_host = Some("localhost".to_string());
        let discovery = discover(&req, Arc::new(ScriptedProbe::default()));
        assert!(discovery.items.is_empty());
        assert_eq!(discovery.results.len(), 3);
    }
}
