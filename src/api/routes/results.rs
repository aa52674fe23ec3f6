//! Results Routes
//!
//! - GET /api/v1/hackathons/:id/results - Published results
//! - POST /api/v1/hackathons/:id/results - Announce winners (admin)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::PublishResultsRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::require;
use crate::api::state::AppState;
use crate::auth::Role;
use crate::hackathon::HackathonResults;
use crate::review::{ReviewBoard, ReviewError};

/// GET /api/v1/hackathons/:id/results
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<HackathonResults>> {
    state
        .registry
        .results(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No results for hackathon {}", id)))
}

/// POST /api/v1/hackathons/:id/results
///
/// The hackathon must exist. Picks go through the review board and are
/// resolved against the review teams; explicit winners are stored as given.
pub async fn publish_results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PublishResultsRequest>,
) -> ApiResult<(StatusCode, Json<HackathonResults>)> {
    require(&state, Some(Role::Admin))?;

    if state.registry.hackathon(&id).is_none() {
        return Err(ApiError::NotFound(format!("Hackathon {}", id)));
    }

    if !req.picks.is_empty() {
        let mut board = ReviewBoard::new(Arc::clone(&state.registry), state.teams.to_vec());
        for pick in &req.picks {
            board.select_winner(&pick.team_id, pick.place)?;
        }
        let published = board.announce(&id).await?;
        return Ok((StatusCode::CREATED, Json(published)));
    }

    if req.winners.is_empty() {
        return Err(ReviewError::NoWinnersSelected.into());
    }
    if req.winners.iter().any(|w| w.place == 0) {
        return Err(ReviewError::InvalidPlace.into());
    }

    let published = state.registry.publish_results(&id, req.winners).await?;
    Ok((StatusCode::CREATED, Json(published)))
}
