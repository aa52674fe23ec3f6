//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::auth::SessionStore;
use crate::hackathon::HackathonRegistry;
use crate::review::Team;
use std::sync::Arc;
use std::time::Instant;

pub use crate::config::ApiConfig;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The one signed-in identity this local server serves
    pub session: Arc<SessionStore>,
    /// Hackathons and published results
    pub registry: Arc<HackathonRegistry>,
    /// Teams shown to admins for review
    pub teams: Arc<Vec<Team>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        session: Arc<SessionStore>,
        registry: Arc<HackathonRegistry>,
        teams: Vec<Team>,
        config: ApiConfig,
    ) -> Self {
        Self {
            session,
            registry,
            teams: Arc::new(teams),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
