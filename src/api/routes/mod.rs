//! API Routes
//!
//! Route handlers organized by functionality.

pub mod auth;
pub mod hackathons;
pub mod health;
pub mod pages;
pub mod results;
pub mod teams;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::{guard, GuardDecision, Role, Route, Session};

/// Resolve the session for an API call that needs one
///
/// Maps the guard's answer to an error: pending is 503, a missing session
/// is 401, a role mismatch is 403.
pub(crate) fn require(state: &AppState, role: Option<Role>) -> ApiResult<Session> {
    let auth = state.session.state();
    match guard(&auth, role) {
        GuardDecision::Pending => Err(ApiError::Pending),
        GuardDecision::Redirect(Route::Login) => {
            Err(ApiError::Unauthorized("Sign in first".to_string()))
        }
        GuardDecision::Redirect(_) => Err(ApiError::Forbidden(format!(
            "Requires the {} role",
            role.map(Role::as_str).unwrap_or("matching")
        ))),
        GuardDecision::Render => auth
            .session()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Sign in first".to_string())),
    }
}
