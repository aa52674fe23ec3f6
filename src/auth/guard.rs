//! Route guard
//!
//! Pure decision over `(auth state, required role)`; performs no navigation
//! itself. Front-ends turn a [`GuardDecision`] into a redirect, an empty
//! response, or the page.

use crate::auth::session::{AuthState, Role};
use serde::Serialize;

/// Application pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Home,
    Login,
    HackathonInfo,
    ParticipantDashboard,
    AdminDashboard,
    CreateHackathon,
    NotFound,
}

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in user, or only the given role
    Authenticated(Option<Role>),
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Home,
            Route::Login,
            Route::HackathonInfo,
            Route::ParticipantDashboard,
            Route::AdminDashboard,
            Route::CreateHackathon,
            Route::NotFound,
        ]
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::HackathonInfo => "/hackathon-info",
            Route::ParticipantDashboard => "/participant-dashboard",
            Route::AdminDashboard => "/admin-dashboard",
            Route::CreateHackathon => "/create-hackathon",
            Route::NotFound => "/404",
        }
    }

    /// Resolve a request path; unknown paths map to `NotFound`
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Route::all()
            .iter()
            .copied()
            .find(|r| *r != Route::NotFound && r.path() == normalized)
            .unwrap_or(Route::NotFound)
    }

    pub fn access(self) -> Access {
        match self {
            Route::Home | Route::Login | Route::HackathonInfo | Route::NotFound => Access::Public,
            Route::ParticipantDashboard => Access::Authenticated(Some(Role::Participant)),
            Route::AdminDashboard | Route::CreateHackathon => Access::Authenticated(Some(Role::Admin)),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "lowercase")]
pub enum GuardDecision {
    /// Session still restoring: render nothing, decide later
    Pending,
    /// Show the guarded page
    Render,
    /// Send the visitor elsewhere
    Redirect(Route),
}

/// Decide whether a view requiring `required` may render
///
/// `None` means any signed-in role. A role mismatch redirects to the
/// dashboard of the role the visitor actually has, never to an error page.
pub fn guard(state: &AuthState, required: Option<Role>) -> GuardDecision {
    let session = match state {
        AuthState::Loading => return GuardDecision::Pending,
        AuthState::Unauthenticated => return GuardDecision::Redirect(Route::Login),
        AuthState::Authenticated(session) => session,
    };

    match required {
        Some(role) if role != session.role => GuardDecision::Redirect(session.role.dashboard()),
        _ => GuardDecision::Render,
    }
}

/// Guard decision for navigating to `route`
pub fn check_route(state: &AuthState, route: Route) -> GuardDecision {
    match route.access() {
        Access::Public => GuardDecision::Render,
        Access::Authenticated(required) => guard(state, required),
    }
}

/// Where the login page sends someone who is already signed in
pub fn login_redirect(state: &AuthState) -> Option<Route> {
    state.role().map(Role::dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::Session;

    fn participant() -> AuthState {
        AuthState::Authenticated(Session::new(
            "participant-123",
            "participant@example.com",
            "Team Leader",
            Role::Participant,
        ))
    }

    fn admin() -> AuthState {
        AuthState::Authenticated(Session::new(
            "admin-456",
            "admin@example.com",
            "Admin User",
            Role::Admin,
        ))
    }

    #[test]
    fn test_loading_renders_nothing() {
        assert_eq!(guard(&AuthState::Loading, None), GuardDecision::Pending);
        assert_eq!(
            guard(&AuthState::Loading, Some(Role::Admin)),
            GuardDecision::Pending
        );
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        for required in [None, Some(Role::Participant), Some(Role::Admin)] {
            assert_eq!(
                guard(&AuthState::Unauthenticated, required),
                GuardDecision::Redirect(Route::Login)
            );
        }
    }

    #[test]
    fn test_matching_role_renders() {
        assert_eq!(guard(&participant(), Some(Role::Participant)), GuardDecision::Render);
        assert_eq!(guard(&admin(), Some(Role::Admin)), GuardDecision::Render);
        assert_eq!(guard(&admin(), None), GuardDecision::Render);
    }

    #[test]
    fn test_mismatch_redirects_to_own_dashboard() {
        assert_eq!(
            guard(&participant(), Some(Role::Admin)),
            GuardDecision::Redirect(Route::ParticipantDashboard)
        );
        assert_eq!(
            guard(&admin(), Some(Role::Participant)),
            GuardDecision::Redirect(Route::AdminDashboard)
        );
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path("/admin-dashboard/"), Route::AdminDashboard);
        assert_eq!(Route::from_path("/login?type=admin"), Route::Login);
        assert_eq!(Route::from_path("/nope"), Route::NotFound);
        assert_eq!(Route::from_path("/404"), Route::NotFound);

        for route in Route::all().iter().filter(|r| **r != Route::NotFound) {
            assert_eq!(Route::from_path(route.path()), *route);
        }
    }

    #[test]
    fn test_check_route() {
        assert_eq!(
            check_route(&AuthState::Unauthenticated, Route::HackathonInfo),
            GuardDecision::Render
        );
        assert_eq!(
            check_route(&participant(), Route::CreateHackathon),
            GuardDecision::Redirect(Route::ParticipantDashboard)
        );
        assert_eq!(check_route(&admin(), Route::CreateHackathon), GuardDecision::Render);
    }

    #[test]
    fn test_login_redirect() {
        assert_eq!(login_redirect(&AuthState::Unauthenticated), None);
        assert_eq!(login_redirect(&admin()), Some(Route::AdminDashboard));
        assert_eq!(login_redirect(&participant()), Some(Route::ParticipantDashboard));
    }
}
