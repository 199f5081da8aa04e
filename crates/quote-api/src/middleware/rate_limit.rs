//! # Per-IP Rate Limiting
//!
//! Sliding-window limiter keyed by client IP. A request is admitted when
//! the IP has made fewer than `per_minute` requests in the last 60 seconds
//! and fewer than `per_hour` in the last hour. Admitted requests are
//! recorded; rejected ones are not.
//!
//! Stale timestamps are pruned on every check, and IPs with nothing left
//! in their window are dropped, so the table never outgrows one hour of
//! traffic. In-memory only: limits are per process.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;

use crate::error::AppError;
use crate::state::AppState;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);

/// Rate limiter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per IP in any 60-second window.
    pub per_minute: usize,
    /// Maximum admitted requests per IP in any one-hour window.
    pub per_hour: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: 10,
            per_hour: 100,
        }
    }
}

/// Shared rate limiter state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    hits: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Admit or reject a request from `key` now.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Admit or reject a request from `key` at `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut hits = self.hits.lock();
        hits.retain(|_, times| {
            while times
                .front()
                .is_some_and(|t| now.saturating_duration_since(*t) >= HOUR)
            {
                times.pop_front();
            }
            !times.is_empty()
        });

        let times = hits.entry(key.to_string()).or_default();
        let last_minute = times
            .iter()
            .filter(|t| now.saturating_duration_since(**t) < MINUTE)
            .count();
        if last_minute >= self.config.per_minute || times.len() >= self.config.per_hour {
            return false;
        }
        times.push_back(now);
        true
    }

    /// Number of IPs with requests inside the hour window.
    pub fn tracked_keys(&self) -> usize {
        self.hits.lock().len()
    }
}

/// The client IP as reported by the proxy in front of the service.
///
/// Checks `x-forwarded-for` (first entry), then `x-real-ip`, then
/// `cf-connecting-ip`; falls back to `"unknown"`.
pub fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next().map(str::trim) {
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    header("x-real-ip")
        .or_else(|| header("cf-connecting-ip"))
        .unwrap_or("unknown")
        .to_string()
}

/// Middleware that enforces per-IP rate limits.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(request.headers());
    if !state.limiter.check(&ip) {
        tracing::warn!(%ip, "rate limit exceeded");
        return AppError::RateLimited {
            contact: state.config.mail_to.clone(),
        }
        .into_response();
    }
    next.run(request).await
}
