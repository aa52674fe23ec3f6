//! HackTrack REST API
//!
//! Local, single-session HTTP front-end over the stores, built with Axum.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/v1/login` - Sign in with a demo account
//! - `POST /api/v1/logout` - Sign out
//! - `GET /api/v1/session` - Current session
//!
//! ## Hackathons
//! - `GET /api/v1/hackathons` - List hackathons
//! - `POST /api/v1/hackathons` - Create a hackathon (admin)
//! - `GET /api/v1/hackathons/current` - The active hackathon
//! - `PATCH /api/v1/hackathons/:id` - Update a hackathon (admin)
//!
//! ## Results
//! - `GET /api/v1/hackathons/:id/results` - Published results
//! - `POST /api/v1/hackathons/:id/results` - Announce winners (admin)
//!
//! ## Teams
//! - `GET /api/v1/teams` - Search and filter teams (admin)
//! - `GET /api/v1/teams/shortlist` - Shortlisted teams (admin)
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! ## Pages
//! Any other path is an app page checked by the route guard
//! (render 200, pending 204, redirect 303, unknown 404).
//!
//! # Example
//!
//! ```rust,ignore
//! use hacktrack::api::{serve, ApiConfig, AppState};
//!
//! let state = AppState::new(session, registry, mock_teams(), ApiConfig::default());
//! serve(state, &ApiConfig::default()).await?;
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Auth routes
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/session", get(routes::auth::current_session))
        // Hackathon routes
        .route(
            "/hackathons",
            get(routes::hackathons::list_hackathons).post(routes::hackathons::create_hackathon),
        )
        .route("/hackathons/current", get(routes::hackathons::current_hackathon))
        .route(
            "/hackathons/:id",
            axum::routing::patch(routes::hackathons::update_hackathon),
        )
        // Results routes
        .route(
            "/hackathons/:id/results",
            get(routes::results::get_results).post(routes::results::publish_results),
        )
        // Team routes
        .route("/teams", get(routes::teams::list_teams))
        .route("/teams/shortlist", get(routes::teams::shortlisted_teams));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .fallback(routes::pages::page)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("HackTrack API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("HackTrack API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStore;
    use crate::hackathon::HackathonRegistry;
    use crate::review::mock_teams;
    use crate::storage::MemoryStore;
    use crate::timing::{Latency, NoDelay, SystemClock};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app(restored: bool) -> Router {
        let storage = Arc::new(MemoryStore::new());
        let session = SessionStore::new(storage.clone(), Arc::new(NoDelay), Latency::none());
        if restored {
            session.restore();
        }
        let registry = HackathonRegistry::initialize(storage, Arc::new(SystemClock)).unwrap();

        let state = AppState::new(
            Arc::new(session),
            Arc::new(registry),
            mock_teams(),
            ApiConfig::default(),
        );
        build_router(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    async fn login_as(app: &Router, email: &str, password: &str, role: &str) -> Response {
        let body = format!(
            r#"{{"email": "{}", "password": "{}", "role": "{}"}}"#,
            email, password, role
        );
        send(app, "POST", "/api/v1/login", Some(&body)).await
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(true);
        let response = send(&app, "GET", "/health/live", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "GET", "/health", None).await;
        let body = json_body(response).await;
        assert_eq!(body["session"], "signed_out");
        assert_eq!(body["hackathons"], 1);
    }

    #[tokio::test]
    async fn test_list_and_current_hackathon() {
        let app = create_test_app(true);

        let body = json_body(send(&app, "GET", "/api/v1/hackathons", None).await).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["hackathons"][0]["startDate"], "2023-12-01");

        let response = send(&app, "GET", "/api/v1/hackathons/current", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["title"], "AI for Good Hackathon");
    }

    #[tokio::test]
    async fn test_login_and_session() {
        let app = create_test_app(true);

        let response = login_as(&app, "participant@example.com", "wrong", "participant").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");

        let response = login_as(&app, "participant@example.com", "password", "participant").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(send(&app, "GET", "/api/v1/session", None).await).await;
        assert_eq!(body["state"], "authenticated");
        assert_eq!(body["user"]["id"], "participant-123");
        assert_eq!(body["dashboard"], "/participant-dashboard");

        let response = send(&app, "POST", "/api/v1/logout", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = json_body(send(&app, "GET", "/api/v1/session", None).await).await;
        assert_eq!(body["state"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_page_guard() {
        let app = create_test_app(true);

        let response = send(&app, "GET", "/admin-dashboard", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");

        let response = send(&app, "GET", "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        login_as(&app, "participant@example.com", "password", "participant").await;

        let response = send(&app, "GET", "/participant-dashboard", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["user"]["role"], "participant");
        assert_eq!(body["current_hackathon"]["id"], "1");

        let response = send(&app, "GET", "/admin-dashboard", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/participant-dashboard");

        let response = send(&app, "GET", "/login", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/participant-dashboard");

        let response = send(&app, "GET", "/no-such-page", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_page_pending_before_restore() {
        let app = create_test_app(false);

        let response = send(&app, "GET", "/participant-dashboard", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, "GET", "/api/v1/teams", None).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_hackathon_requires_admin() {
        let app = create_test_app(true);
        let body = r#"{
            "title": "Climate Hack",
            "description": "Tools for climate resilience",
            "startDate": "2024-03-01",
            "endDate": "2024-03-03",
            "registrationDeadline": "2024-02-20",
            "submissionDeadline": "2024-03-03",
            "location": "Berlin",
            "prizes": ["$3,000", " "]
        }"#;

        let response = send(&app, "POST", "/api/v1/hackathons", Some(body)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        login_as(&app, "participant@example.com", "password", "participant").await;
        let response = send(&app, "POST", "/api/v1/hackathons", Some(body)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        login_as(&app, "admin@example.com", "adminpass", "admin").await;
        let response = send(&app, "POST", "/api/v1/hackathons", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["title"], "Climate Hack");
        assert_eq!(created["prizes"].as_array().unwrap().len(), 1);

        let body = json_body(send(&app, "GET", "/api/v1/hackathons", None).await).await;
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_create_hackathon_validation() {
        let app = create_test_app(true);
        login_as(&app, "admin@example.com", "adminpass", "admin").await;

        let body = r#"{
            "title": "",
            "description": "No title",
            "startDate": "2024-03-01",
            "endDate": "2024-03-03",
            "registrationDeadline": "2024-02-20",
            "submissionDeadline": "2024-03-03",
            "location": "Berlin"
        }"#;
        let response = send(&app, "POST", "/api/v1/hackathons", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_hackathon() {
        let app = create_test_app(true);
        login_as(&app, "admin@example.com", "adminpass", "admin").await;

        let response = send(
            &app,
            "PATCH",
            "/api/v1/hackathons/404",
            Some(r#"{"isActive": false}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            "PATCH",
            "/api/v1/hackathons/1",
            Some(r#"{"isActive": false}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "GET", "/api/v1/hackathons/current", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_publish_results() {
        let app = create_test_app(true);

        let response = send(&app, "GET", "/api/v1/hackathons/1/results", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        login_as(&app, "admin@example.com", "adminpass", "admin").await;

        let response = send(&app, "POST", "/api/v1/hackathons/1/results", Some("{}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let picks = r#"{"picks": [{"teamId": "2", "place": 2}, {"teamId": "1", "place": 1}]}"#;
        let response = send(&app, "POST", "/api/v1/hackathons/1/results", Some(picks)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(send(&app, "GET", "/api/v1/hackathons/1/results", None).await).await;
        assert_eq!(body["hackathonId"], "1");
        assert_eq!(body["winners"][0]["teamName"], "Innovators");
        assert_eq!(body["winners"][1]["place"], 2);
    }

    #[tokio::test]
    async fn test_publish_results_rejects_place_zero() {
        let app = create_test_app(true);
        login_as(&app, "admin@example.com", "adminpass", "admin").await;

        let picks = r#"{"picks": [{"teamId": "1", "place": 0}]}"#;
        let response = send(&app, "POST", "/api/v1/hackathons/1/results", Some(picks)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let winners = r#"{"winners": [{"id": "1", "teamName": "Innovators", "place": 0,
            "projectTitle": "Smart city", "projectDescription": "Traffic"}]}"#;
        let response = send(&app, "POST", "/api/v1/hackathons/1/results", Some(winners)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "GET", "/api/v1/hackathons/1/results", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_publish_results_unknown_hackathon() {
        let app = create_test_app(true);
        login_as(&app, "admin@example.com", "adminpass", "admin").await;

        let picks = r#"{"picks": [{"teamId": "1", "place": 1}]}"#;
        let response = send(&app, "POST", "/api/v1/hackathons/no-such-id/results", Some(picks)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "GET", "/api/v1/hackathons/no-such-id/results", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_teams() {
        let app = create_test_app(true);
        login_as(&app, "admin@example.com", "adminpass", "admin").await;

        let body = json_body(send(&app, "GET", "/api/v1/teams?status=not_selected", None).await).await;
        assert_eq!(body["total"], 2);

        let body = json_body(send(&app, "GET", "/api/v1/teams?search=tech", None).await).await;
        assert_eq!(body["teams"][0]["name"], "Tech Wizards");

        let response = send(&app, "GET", "/api/v1/teams?status=bogus", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(send(&app, "GET", "/api/v1/teams/shortlist", None).await).await;
        assert_eq!(body["total"], 4);
        assert_eq!(body["teams"][0]["score"], 87);
    }
}
