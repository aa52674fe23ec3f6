//! Data Transfer Objects
//!
//! Request and response bodies that are not plain domain types.

use crate::auth::{AuthState, Role, Session};
use crate::hackathon::{Hackathon, Winner};
use crate::review::{Team, WinnerPick};
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// `loading`, `unauthenticated` or `authenticated`
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Session>,
    /// A login or logout is in flight
    pub pending: bool,
    /// Where the login page would send this visitor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<&'static str>,
}

impl SessionResponse {
    pub fn new(state: &AuthState, pending: bool) -> Self {
        let label = match state {
            AuthState::Loading => "loading",
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::Authenticated(_) => "authenticated",
        };
        Self {
            state: label,
            user: state.session().cloned(),
            pending,
            dashboard: state.role().map(|r| r.dashboard().path()),
        }
    }
}

// ============================================================================
// Hackathon DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HackathonListResponse {
    pub hackathons: Vec<Hackathon>,
    pub total: usize,
}

/// Either explicit winners or picks from the review table
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishResultsRequest {
    pub winners: Vec<Winner>,
    pub picks: Vec<WinnerPick>,
}

// ============================================================================
// Team DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamQuery {
    pub search: String,
    /// `all` or one team status
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    pub teams: Vec<Team>,
    pub total: usize,
}

impl From<Vec<&Team>> for TeamListResponse {
    fn from(teams: Vec<&Team>) -> Self {
        let teams: Vec<Team> = teams.into_iter().cloned().collect();
        Self {
            total: teams.len(),
            teams,
        }
    }
}

// ============================================================================
// Page DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub route: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_hackathon: Option<Hackathon>,
}

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub session: String,
    pub hackathons: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
