//! Session types
//!
//! A [`Session`] always carries a [`Role`]; "signed out" is the absence of a
//! session, so an identifier without a role (or the reverse) cannot exist.

use crate::auth::guard::Route;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role of the signed-in user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participant,
    Admin,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::Participant, Role::Admin]
    }

    /// Landing page for this role
    pub fn dashboard(self) -> Route {
        match self {
            Role::Participant => Route::ParticipantDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Participant => "participant",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "participant" => Ok(Role::Participant),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// The signed-in identity, persisted as `{ id, email, name, role }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
        }
    }

    /// Reject snapshots that parse but cannot describe a signed-in user
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("session id is empty".to_string());
        }
        Ok(())
    }
}

/// Observable state of the session store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Restore has not finished yet
    #[default]
    Loading,
    /// Nobody is signed in
    Unauthenticated,
    /// A user is signed in
    Authenticated(Session),
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(|s| s.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    pub fn is_participant(&self) -> bool {
        self.role() == Some(Role::Participant)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("participant".parse::<Role>().unwrap(), Role::Participant);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("judge".parse::<Role>().is_err());
    }

    #[test]
    fn test_session_snapshot_format() {
        let session = Session::new("admin-456", "admin@example.com", "Admin User", Role::Admin);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "admin-456",
                "email": "admin@example.com",
                "name": "Admin User",
                "role": "admin",
            })
        );
    }

    #[test]
    fn test_null_role_does_not_parse() {
        let raw = r#"{"id":"x","email":"e","name":"n","role":null}"#;
        assert!(serde_json::from_str::<Session>(raw).is_err());
    }

    #[test]
    fn test_state_queries() {
        let state = AuthState::Loading;
        assert!(state.is_loading());
        assert!(!state.is_authenticated());

        let state = AuthState::Authenticated(Session::new(
            "participant-123",
            "participant@example.com",
            "Team Leader",
            Role::Participant,
        ));
        assert!(state.is_authenticated());
        assert!(state.is_participant());
        assert!(!state.is_admin());
        assert_eq!(state.role(), Some(Role::Participant));
    }

    #[test]
    fn test_dashboard_per_role() {
        assert_eq!(Role::Participant.dashboard(), Route::ParticipantDashboard);
        assert_eq!(Role::Admin.dashboard(), Route::AdminDashboard);
    }
}
