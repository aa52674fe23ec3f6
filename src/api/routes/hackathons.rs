//! Hackathon Routes
//!
//! - GET /api/v1/hackathons - List all hackathons
//! - POST /api/v1/hackathons - Create a hackathon (admin)
//! - GET /api/v1/hackathons/current - The active hackathon
//! - PATCH /api/v1/hackathons/:id - Partial update (admin)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::HackathonListResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::require;
use crate::api::state::AppState;
use crate::auth::Role;
use crate::hackathon::{Hackathon, HackathonUpdate, NewHackathon};

/// GET /api/v1/hackathons
pub async fn list_hackathons(State(state): State<Arc<AppState>>) -> Json<HackathonListResponse> {
    let hackathons = state.registry.hackathons();
    Json(HackathonListResponse {
        total: hackathons.len(),
        hackathons,
    })
}

/// GET /api/v1/hackathons/current
pub async fn current_hackathon(State(state): State<Arc<AppState>>) -> ApiResult<Json<Hackathon>> {
    state
        .registry
        .current_hackathon()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No active hackathon".to_string()))
}

/// POST /api/v1/hackathons
///
/// Applies the create-form rules before anything is stored.
pub async fn create_hackathon(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewHackathon>,
) -> ApiResult<(StatusCode, Json<Hackathon>)> {
    require(&state, Some(Role::Admin))?;

    let created = state.registry.add_hackathon(req.validated()?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/v1/hackathons/:id
pub async fn update_hackathon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<HackathonUpdate>,
) -> ApiResult<Json<Hackathon>> {
    require(&state, Some(Role::Admin))?;

    let updated = state.registry.update_hackathon(&id, update).await?;
    Ok(Json(updated))
}
