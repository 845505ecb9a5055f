//! Numbered source templates

use crate::error::{CarouselError, Result};
use std::fmt;

/// Placeholder replaced by the candidate number
pub const PLACEHOLDER: &str = "{n}";

/// Hosts treated as local development
const LOCAL_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "::1", "0.0.0.0"];

/// A URL or path template with exactly one `{n}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePattern {
    prefix: String,
    suffix: String,
}

impl SourcePattern {
    /// Parse a template such as `resources/carousel-videos/{n}.mp4`
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split(PLACEHOLDER);
        let (Some(prefix), Some(suffix), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CarouselError::InvalidSourcePattern(raw.to_string()));
        };
        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Candidate source for number `n`
    pub fn render(&self, n: usize) -> String {
        format!("{}{n}{}", self.prefix, self.suffix)
    }

    /// Whether the pattern is an `http(s)` URL
    pub fn is_remote(&self) -> bool {
        self.prefix.starts_with("http://") || self.prefix.starts_with("https://")
    }

    /// Host part of a remote pattern, without port or brackets
    pub fn host(&self) -> Option<&str> {
        let rest = self
            .prefix
            .strip_prefix("http://")
            .or_else(|| self.prefix.strip_prefix("https://"))?;
        let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
        let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

        if let Some(bracketed) = authority.strip_prefix('[') {
            return bracketed.split_once(']').map(|(host, _)| host);
        }
        let host = authority.split(':').next().unwrap_or(authority);
        (!host.is_empty()).then_some(host)
    }
}

impl fmt::Display for SourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PLACEHOLDER}{}", self.prefix, self.suffix)
    }
}

/// Whether `host` names a local development server
pub fn is_local_development_host(host: &str) -> bool {
    LOCAL_HOSTS.iter().any(|local| host.eq_ignore_ascii_case(local))
}
