//! Team Routes
//!
//! - GET /api/v1/teams - Search and filter teams (admin)
//! - GET /api/v1/teams/shortlist - Shortlisted teams by score (admin)

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{TeamListResponse, TeamQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::require;
use crate::api::state::AppState;
use crate::auth::Role;
use crate::review::{filter_teams, shortlist, StatusFilter};

/// GET /api/v1/teams?search=&status=
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TeamQuery>,
) -> ApiResult<Json<TeamListResponse>> {
    require(&state, Some(Role::Admin))?;

    let status = match query.status.as_deref() {
        Some(raw) => raw.parse::<StatusFilter>().map_err(ApiError::Validation)?,
        None => StatusFilter::All,
    };

    Ok(Json(filter_teams(&state.teams, &query.search, status).into()))
}

/// GET /api/v1/teams/shortlist
pub async fn shortlisted_teams(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TeamListResponse>> {
    require(&state, Some(Role::Admin))?;
    Ok(Json(shortlist(&state.teams).into()))
}
