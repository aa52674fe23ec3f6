//! Authentication and Authorization
//!
//! - **session**: `Session`, `Role`, `AuthState`
//! - **credentials**: the two demo accounts
//! - **store**: `SessionStore` (restore/login/logout, subscriptions)
//! - **guard**: route table and the pure route guard

pub mod credentials;
pub mod error;
pub mod guard;
pub mod session;
pub mod store;

pub use credentials::{demo_account_for, demo_accounts, DemoAccount};
pub use error::{AuthError, AuthResult};
pub use guard::{check_route, guard, login_redirect, Access, GuardDecision, Route};
pub use session::{AuthState, Role, Session};
pub use store::SessionStore;
