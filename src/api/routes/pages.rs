//! Page Routes
//!
//! Every path outside `/api` and `/health` is treated as an app page and run
//! through the route guard:
//!
//! - render: 200 with the page context
//! - pending: 204, nothing to show yet
//! - redirect: 303 to the login page or the signed-in role's dashboard
//! - unknown path: 404

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::PageResponse;
use crate::api::state::AppState;
use crate::auth::{check_route, login_redirect, GuardDecision, Route};

fn see_other(route: Route) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, route.path())]).into_response()
}

/// Fallback handler for page paths
pub async fn page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let route = Route::from_path(uri.path());
    if route == Route::NotFound {
        return (StatusCode::NOT_FOUND, Json(PageResponse {
            route: route.path(),
            user: None,
            current_hackathon: None,
        }))
            .into_response();
    }

    let auth = state.session.state();

    if route == Route::Login {
        if let Some(dashboard) = login_redirect(&auth) {
            return see_other(dashboard);
        }
    }

    match check_route(&auth, route) {
        GuardDecision::Pending => StatusCode::NO_CONTENT.into_response(),
        GuardDecision::Redirect(to) => {
            tracing::debug!(from = route.path(), to = to.path(), "Page redirect");
            see_other(to)
        }
        GuardDecision::Render => Json(PageResponse {
            route: route.path(),
            user: auth.session().cloned(),
            current_hackathon: state.registry.current_hackathon(),
        })
        .into_response(),
    }
}
