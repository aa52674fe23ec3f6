//! Auth Routes
//!
//! - POST /api/v1/login - Sign in with a demo account
//! - POST /api/v1/logout - Sign out
//! - GET /api/v1/session - Current session

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{LoginRequest, SessionResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/v1/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.session.login(&req.email, &req.password, req.role).await?;
    tracing::info!(user_id = %session.id, role = %session.role, "Signed in");

    Ok(Json(SessionResponse::new(
        &state.session.state(),
        state.session.is_pending(),
    )))
}

/// POST /api/v1/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.session.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/session
pub async fn current_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    Json(SessionResponse::new(
        &state.session.state(),
        state.session.is_pending(),
    ))
}
