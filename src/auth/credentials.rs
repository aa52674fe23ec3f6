//! Demo accounts
//!
//! Login checks against exactly two fixed accounts, one per role.

use crate::auth::session::{Role, Session};

/// A hardcoded account
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub id: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub role: Role,
}

impl DemoAccount {
    pub fn session(&self) -> Session {
        Session::new(self.id, self.email, self.name, self.role)
    }
}

pub const PARTICIPANT_ACCOUNT: DemoAccount = DemoAccount {
    id: "participant-123",
    email: "participant@example.com",
    password: "password",
    name: "Team Leader",
    role: Role::Participant,
};

pub const ADMIN_ACCOUNT: DemoAccount = DemoAccount {
    id: "admin-456",
    email: "admin@example.com",
    password: "adminpass",
    name: "Admin User",
    role: Role::Admin,
};

pub fn demo_accounts() -> [DemoAccount; 2] {
    [PARTICIPANT_ACCOUNT, ADMIN_ACCOUNT]
}

/// Account for `role`, used to prefill login forms
pub fn demo_account_for(role: Role) -> DemoAccount {
    match role {
        Role::Participant => PARTICIPANT_ACCOUNT,
        Role::Admin => ADMIN_ACCOUNT,
    }
}

/// Session for the account matching all three of email, password and role
///
/// Comparison is exact: no trimming, no case folding.
pub fn verify(email: &str, password: &str, role: Role) -> Option<Session> {
    demo_accounts()
        .into_iter()
        .find(|a| a.role == role && a.email == email && a.password == password)
        .map(|a| a.session())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_triples() {
        let session = verify("participant@example.com", "password", Role::Participant).unwrap();
        assert_eq!(session.id, "participant-123");
        assert_eq!(session.role, Role::Participant);

        let session = verify("admin@example.com", "adminpass", Role::Admin).unwrap();
        assert_eq!(session.id, "admin-456");
        assert_eq!(session.name, "Admin User");
    }

    #[test]
    fn test_role_must_match_account() {
        assert!(verify("participant@example.com", "password", Role::Admin).is_none());
        assert!(verify("admin@example.com", "adminpass", Role::Participant).is_none());
    }

    #[test]
    fn test_other_triples_rejected() {
        assert!(verify("participant@example.com", "wrong", Role::Participant).is_none());
        assert!(verify("PARTICIPANT@example.com", "password", Role::Participant).is_none());
        assert!(verify("participant@example.com ", "password", Role::Participant).is_none());
        assert!(verify("", "", Role::Admin).is_none());
    }

    #[test]
    fn test_prefill_account() {
        assert_eq!(demo_account_for(Role::Admin).email, "admin@example.com");
    }
}
