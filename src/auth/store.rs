//! Session Store
//!
//! Owns the signed-in identity. State transitions:
//!
//! ```text
//! Loading ──restore──▶ Unauthenticated ──login──▶ Authenticated(role)
//!    │                        ▲                          │
//!    └──restore (stored)──────┼──────────────────────────┤
//!                             └──────────logout──────────┘
//! ```
//!
//! Consumers observe changes through [`SessionStore::subscribe`].

use crate::auth::credentials;
use crate::auth::error::{AuthError, AuthResult};
use crate::auth::session::{AuthState, Role, Session};
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::storage::{snapshot, KeyValueStore, SESSION_KEY};
use crate::timing::{Delay, Latency};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Authenticated identity plus its persisted copy
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    delay: Arc<dyn Delay>,
    latency: Latency,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<AuthState>,
    pending: watch::Sender<bool>,
    /// Serializes login/logout so one action's write and state change stay together
    ops: Mutex<()>,
}

/// Clears the pending flag even if the operation future is dropped
struct PendingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> PendingGuard<'a> {
    fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl SessionStore {
    /// Create a store in the `Loading` state. Call [`restore`](Self::restore) next.
    pub fn new(storage: Arc<dyn KeyValueStore>, delay: Arc<dyn Delay>, latency: Latency) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        let (pending, _) = watch::channel(false);

        Self {
            storage,
            delay,
            latency,
            notifier: Arc::new(TracingNotifier),
            state,
            pending,
            ops: Mutex::new(()),
        }
    }

    /// Route notices somewhere other than the log
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Adopt the persisted session, if there is a usable one
    ///
    /// Only the first call does any work; later calls return the current
    /// state. A malformed snapshot is removed and treated as "no session".
    pub fn restore(&self) -> AuthState {
        self.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = self.read_persisted();
            true
        });

        let state = self.state();
        tracing::debug!(authenticated = state.is_authenticated(), "Session restored");
        state
    }

    fn read_persisted(&self) -> AuthState {
        let loaded = snapshot::load::<Session>(self.storage.as_ref(), SESSION_KEY).and_then(|s| {
            match s {
                Some(session) => session
                    .validate()
                    .map(|()| Some(session))
                    .map_err(|reason| crate::storage::StorageError::malformed(SESSION_KEY, reason)),
                None => Ok(None),
            }
        });

        match loaded {
            Ok(Some(session)) => {
                tracing::info!(user_id = %session.id, role = %session.role, "Restored saved session");
                AuthState::Authenticated(session)
            }
            Ok(None) => AuthState::Unauthenticated,
            Err(e) if e.is_malformed() => {
                tracing::warn!(error = %e, "Discarding unreadable saved session");
                if let Err(e) = self.storage.remove(SESSION_KEY) {
                    tracing::warn!(error = %e, "Failed to remove unreadable session");
                }
                AuthState::Unauthenticated
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not read saved session");
                AuthState::Unauthenticated
            }
        }
    }

    /// Sign in with one of the demo accounts
    ///
    /// Waits the configured login latency first. On mismatch nothing changes
    /// and `AuthError::InvalidCredentials` is returned.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> AuthResult<Session> {
        let _ops = self.ops.lock().await;
        let _pending = PendingGuard::start(&self.pending);
        self.restore();

        self.delay.wait(self.latency.login).await;

        let Some(session) = credentials::verify(email, password, role) else {
            tracing::warn!(email, role = %role, "Login rejected");
            self.notifier.notify(Notice::destructive(
                "Login failed",
                "Please check your credentials and try again.",
            ));
            return Err(AuthError::InvalidCredentials);
        };

        // Persist before adopting so a failed write leaves the old state intact
        snapshot::save(self.storage.as_ref(), SESSION_KEY, &session)?;
        self.state.send_replace(AuthState::Authenticated(session.clone()));

        tracing::info!(user_id = %session.id, role = %session.role, "Logged in");
        self.notifier
            .notify(Notice::info("Login successful", "Welcome back to HackTrack!"));

        Ok(session)
    }

    /// Sign out, clearing both the in-memory and the persisted session
    ///
    /// If the persisted copy cannot be removed the error is returned and the
    /// session stays in place.
    pub async fn logout(&self) -> AuthResult<()> {
        let _ops = self.ops.lock().await;
        let _pending = PendingGuard::start(&self.pending);
        self.restore();

        self.delay.wait(self.latency.logout).await;

        self.storage.remove(SESSION_KEY)?;
        let previous = self.state.send_replace(AuthState::Unauthenticated);

        if let Some(session) = previous.session() {
            tracing::info!(user_id = %session.id, "Logged out");
        }
        Ok(())
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_participant(&self) -> bool {
        self.state.borrow().is_participant()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// True while a login or logout is in flight
    pub fn is_pending(&self) -> bool {
        *self.pending.borrow()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
