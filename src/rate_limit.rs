//! Rate limit metadata reported by the geocoding API.
//!
//! Mapbox reports the caller's quota on every response through the
//! `X-Rate-Limit-*` headers. The raw header bytes are kept as-is; the parsing
//! helpers are best effort and return `None` on anything unexpected.

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub(crate) const HEADER_INTERVAL: &str = "x-rate-limit-interval";
pub(crate) const HEADER_LIMIT: &str = "x-rate-limit-limit";
pub(crate) const HEADER_RESET: &str = "x-rate-limit-reset";

/// Snapshot of the `X-Rate-Limit-*` response headers.
///
/// Missing headers are empty.
///
/// # Examples
///
/// ```
/// use mapbox_geocoding::RateLimit;
/// use http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-rate-limit-limit", "600".parse().unwrap());
/// headers.insert("x-rate-limit-interval", "60".parse().unwrap());
///
/// let rate_limit = RateLimit::from_headers(&headers);
/// assert_eq!(rate_limit.limit, b"600");
/// assert_eq!(rate_limit.limit_value(), Some(600));
/// assert!(rate_limit.reset.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Length of the rate limit window, in seconds.
    pub interval: Vec<u8>,
    /// Number of requests allowed per window.
    pub limit: Vec<u8>,
    /// Unix timestamp at which the current window resets.
    pub reset: Vec<u8>,
}

impl RateLimit {
    /// Copies the rate limit headers out of a response.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            interval: header_bytes(headers, HEADER_INTERVAL),
            limit: header_bytes(headers, HEADER_LIMIT),
            reset: header_bytes(headers, HEADER_RESET),
        }
    }

    /// Returns `true` if none of the headers were present.
    pub fn is_empty(&self) -> bool {
        self.interval.is_empty() && self.limit.is_empty() && self.reset.is_empty()
    }

    /// Requests allowed per window.
    pub fn limit_value(&self) -> Option<u64> {
        parse_u64(&self.limit)
    }

    /// Length of the rate limit window.
    pub fn interval_duration(&self) -> Option<Duration> {
        parse_u64(&self.interval).map(Duration::from_secs)
    }

    /// When the current window resets.
    pub fn reset_at(&self) -> Option<SystemTime> {
        parse_u64(&self.reset).map(|timestamp| UNIX_EPOCH + Duration::from_secs(timestamp))
    }
}

fn header_bytes(headers: &HeaderMap, name: &str) -> Vec<u8> {
    headers
        .get(name)
        .map(|value| value.as_bytes().to_vec())
        .unwrap_or_default()
}

fn parse_u64(bytes: &[u8]) -> Option<u64> {
    std::str::from_utf8(bytes).ok()?.trim().parse().ok()
}
