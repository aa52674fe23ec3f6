//! Simulated latency and time sources
//!
//! Every wait in the application goes through [`Delay`] and every timestamp
//! through [`Clock`], so tests can run without wall-clock sleeps and with
//! fixed announcement times.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::Duration;

/// Something that can wait
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Waits on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

/// Simulated latencies for the mock "network" calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Wait before a login attempt resolves
    pub login: Duration,
    /// Wait before a logout resolves
    pub logout: Duration,
    /// Time a submission stays `submitted` before review starts
    pub review_after: Duration,
    /// Time a submission stays `under_review` before the decision
    pub decision_after: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            logout: Duration::from_millis(500),
            review_after: Duration::from_millis(3000),
            decision_after: Duration::from_millis(5000),
        }
    }
}

impl Latency {
    /// All waits set to zero
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            logout: Duration::ZERO,
            review_after: Duration::ZERO,
            decision_after: Duration::ZERO,
        }
    }
}
