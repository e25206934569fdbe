use super::clock::{Clock, SystemClock};
use dashmap::DashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_REQUESTS: u32 = 10;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Requests seen from one client since `window_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub count: u32,
    pub window_start: Instant,
}

impl RateWindow {
    fn open(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    fn has_elapsed(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32, reset_in: Duration },
    Rejected { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Fixed-window request counter per client identity, held in memory only.
#[derive(Debug)]
pub struct RateLimiter<C: Clock = SystemClock> {
    windows: DashMap<String, RateWindow>,
    max_requests: u32,
    window: Duration,
    clock: C,
}

impl RateLimiter<SystemClock> {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::with_clock(max_requests, window, SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(max_requests: u32, window: Duration, clock: C) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
            clock,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Counts one request from `client` and decides whether it may proceed.
    ///
    /// Rejected requests are counted too, so a client hammering the endpoint
    /// stays rejected until its window runs out.
    pub fn check(&self, client: &str) -> RateLimitDecision {
        let now = self.clock.now();
        // The entry guard holds the shard lock for the whole read-modify-write.
        let mut entry = self
            .windows
            .entry(client.to_owned())
            .or_insert_with(|| RateWindow::open(now));

        if entry.has_elapsed(now, self.window) {
            *entry = RateWindow::open(now);
        }
        entry.count = entry.count.saturating_add(1);

        let reset_in = self
            .window
            .saturating_sub(now.saturating_duration_since(entry.window_start));

        if entry.count > self.max_requests {
            RateLimitDecision::Rejected {
                retry_after: reset_in,
            }
        } else {
            RateLimitDecision::Allowed {
                remaining: self.max_requests - entry.count,
                reset_in,
            }
        }
    }

    /// Drops every window that has run out. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.windows.len();
        self.windows
            .retain(|_, window| !window.has_elapsed(now, self.window));
        before.saturating_sub(self.windows.len())
    }

    pub fn reset(&self) {
        self.windows.clear();
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
