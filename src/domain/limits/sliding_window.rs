//! Per-client sliding-window rate limiter.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::{Clock, Decision, SystemClock};

type HitLog = Arc<Mutex<VecDeque<Instant>>>;

/// Counts accepted requests per client over a trailing time window.
///
/// Each client owns a timestamp log guarded by its own mutex, so requests
/// from different clients never wait on each other. The map itself is only
/// locked long enough to fetch or insert a client's log handle.
///
/// A `limit` of zero disables enforcement: every request is allowed and no
/// state is recorded.
pub struct SlidingWindowLimiter {
    limit: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
    hits: DashMap<String, HitLog>,
}

impl SlidingWindowLimiter {
    /// Creates a limiter driven by the system clock.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self::with_clock(limit, window, Arc::new(SystemClock))
    }

    /// Creates a limiter reading time from the given clock.
    pub fn with_clock(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            window,
            clock,
            hits: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Evaluates a request from `client` at the clock's current time.
    pub fn evaluate(&self, client: &str) -> Decision {
        self.evaluate_at(client, self.clock.now())
    }

    /// Evaluates a request from `client` at `now`.
    ///
    /// Expired hits are pruned first. A rejected attempt is not recorded.
    pub fn evaluate_at(&self, client: &str, now: Instant) -> Decision {
        if !self.is_enabled() {
            return Decision::Allowed;
        }

        let log = self.log_for(client);
        let mut hits = lock(&log);
        prune(&mut hits, now, self.window);

        if hits.len() >= self.limit as usize {
            return Decision::Rejected {
                reason: format!(
                    "Rate limit {}/{}s exceeded",
                    self.limit,
                    self.window.as_secs()
                ),
            };
        }

        hits.push_back(now);
        Decision::Allowed
    }

    /// Number of hits currently recorded for `client`, without pruning.
    pub fn hit_count(&self, client: &str) -> usize {
        self.hits
            .get(client)
            .map(|entry| lock(entry.value()).len())
            .unwrap_or(0)
    }

    /// Number of clients with a hit log.
    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }

    /// Drops clients with no hits inside the window.
    ///
    /// Logs currently borrowed by an in-flight evaluation are kept.
    pub fn purge_idle(&self) -> usize {
        let now = self.clock.now();
        let before = self.hits.len();

        self.hits.retain(|_, log| {
            let mut hits = lock(log);
            prune(&mut hits, now, self.window);
            !hits.is_empty() || Arc::strong_count(log) > 1
        });

        before.saturating_sub(self.hits.len())
    }

    fn log_for(&self, client: &str) -> HitLog {
        if let Some(entry) = self.hits.get(client) {
            return Arc::clone(entry.value());
        }

        Arc::clone(self.hits.entry(client.to_string()).or_default().value())
    }
}

fn lock(log: &Mutex<VecDeque<Instant>>) -> MutexGuard<'_, VecDeque<Instant>> {
    log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Removes hits older than `window` relative to `now`.
///
/// A clock that moved backwards yields a zero age, so such hits are kept.
fn prune(hits: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&oldest) = hits.front() {
        if now.saturating_duration_since(oldest) > window {
            hits.pop_front();
        } else {
            break;
        }
    }
}
