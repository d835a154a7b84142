//! Per-IP sliding-window rate limiting for the thread routes.
//!
//! Every client IP keeps the timestamps of its admitted requests. A request
//! is rejected when the window already holds `limit` entries, or when it
//! arrives sooner than `min_interval_ms` after the last admitted one.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Maximum admitted requests per window.
    pub limit: u32,
    pub window_ms: u64,
    pub min_interval_ms: u64,
    /// Only paths starting with this prefix are limited.
    pub path_prefix: String,
    /// How often `check` sweeps idle IPs out of the map.
    pub cleanup_interval_ms: u64,
    /// Honour X-Forwarded-For / X-Real-IP (only behind a trusted proxy).
    pub trust_proxy_headers: bool,
}

impl RateLimitConfig {
    pub fn new(limit: u32, window_ms: u64) -> Self {
        Self {
            enabled: true,
            limit,
            window_ms,
            min_interval_ms: window_ms / u64::from(limit.max(1)),
            path_prefix: "/threads".to_string(),
            cleanup_interval_ms: 60_000,
            trust_proxy_headers: false,
        }
    }

    pub fn from_api(api: &ApiConfig) -> Self {
        let mut config = Self::new(api.rate_limit_requests, api.rate_limit_window_ms);
        config.enabled = api.enable_rate_limiting;
        if let Some(min_interval) = api.rate_limit_min_interval_ms {
            config.min_interval_ms = min_interval;
        }
        config.path_prefix = api.rate_limit_path_prefix.clone();
        config.cleanup_interval_ms = api.rate_limit_cleanup_interval_secs.saturating_mul(1000);
        config.trust_proxy_headers = api.trust_proxy_headers;
        config
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(90, 60_000)
    }
}

#[derive(Debug, Default)]
struct RateLimitState {
    /// Admitted request times per IP, oldest first.
    requests: HashMap<IpAddr, Vec<u64>>,
    last_cleanup: u64,
}

impl RateLimitState {
    fn cleanup(&mut self, now_ms: u64, window_ms: u64) -> usize {
        let before_count = self.requests.len();
        self.requests.retain(|_, times| {
            times.retain(|&t| now_ms.saturating_sub(t) <= window_ms);
            !times.is_empty()
        });
        self.last_cleanup = now_ms;
        before_count - self.requests.len()
    }
}

/// Shared limiter; one instance per server, held in application state.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Mutex<RateLimitState>,
    started: Instant,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RateLimitState::default()),
            started: Instant::now(),
        }
    }

    /// Milliseconds since the limiter was built. Monotonic, so wall clock
    /// adjustments never shrink the gaps between requests.
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// True when requests to `path` go through the limiter at all.
    pub fn applies_to(&self, path: &str) -> bool {
        self.config.enabled && path.starts_with(&self.config.path_prefix)
    }

    /// Decides whether a request from `ip` to `path` at `now_ms` is admitted,
    /// recording it when it is. Rejected requests leave no trace.
    pub fn check(&self, ip: IpAddr, path: &str, now_ms: u64) -> bool {
        if !self.applies_to(path) {
            return true;
        }

        let window_ms = self.config.window_ms;
        let mut state = self.lock();

        if now_ms.saturating_sub(state.last_cleanup) >= self.config.cleanup_interval_ms {
            let removed = state.cleanup(now_ms, window_ms);
            if removed > 0 {
                debug!("Cleaned up {} idle rate limit entries", removed);
            }
        }

        let times = state.requests.entry(ip).or_default();
        times.retain(|&t| now_ms.saturating_sub(t) <= window_ms);

        if times.len() >= self.config.limit as usize {
            return false;
        }

        if let Some(&last) = times.last() {
            if now_ms.saturating_sub(last) < self.config.min_interval_ms {
                return false;
            }
        }

        times.push(now_ms);
        true
    }

    /// Drops IPs with nothing left inside the window and prunes the rest.
    pub fn cleanup(&self, now_ms: u64) -> usize {
        let window_ms = self.config.window_ms;
        self.lock().cleanup(now_ms, window_ms)
    }

    pub fn reset(&self) {
        let mut state = self.lock();
        state.requests.clear();
        state.last_cleanup = 0;
    }

    /// Number of IPs currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, RateLimitState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limit state was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Axum middleware guarding the configured path prefix.
///
/// An IP that cannot be determined is denied rather than let through.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !limiter.applies_to(&path) {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client_ip = extract_client_ip(request.headers(), peer, limiter.config().trust_proxy_headers);

    let allowed = match client_ip {
        Some(ip) => {
            let allowed = limiter.check(ip, &path, limiter.now_ms());
            if !allowed {
                warn!("Rate limit exceeded for IP: {}", ip);
            }
            allowed
        }
        None => {
            warn!("Could not determine client IP for rate limiting, denying request");
            false
        }
    };

    if !allowed {
        return ApiError::too_many_requests(RATE_LIMIT_MESSAGE).into_response();
    }

    next.run(request).await
}

/// Resolves the client IP. Proxy headers are only consulted when trusted,
/// otherwise the socket peer address is used.
pub fn extract_client_ip(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    trust_proxy_headers: bool,
) -> Option<IpAddr> {
    if trust_proxy_headers {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());
        if forwarded.is_some() {
            return forwarded;
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());
        if real_ip.is_some() {
            return real_ip;
        }
    }

    peer
}
