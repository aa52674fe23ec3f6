//! # HackTrack
//!
//! Hackathon management: a demo login with participant and admin roles, a
//! persisted hackathon registry with published results, a simulated
//! submission review, and admin winner selection.
//!
//! ## Modules
//!
//! - [`storage`]: key-value persistence standing in for browser local storage
//! - [`auth`]: session store, demo credentials and the route guard
//! - [`hackathon`]: hackathon registry and results
//! - [`submission`]: submission drafts and the evaluation simulation
//! - [`review`]: team review and winner selection
//! - [`api`]: local REST API with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hacktrack::auth::{Role, SessionStore};
//! use hacktrack::hackathon::HackathonRegistry;
//! use hacktrack::storage::FileStore;
//! use hacktrack::timing::{Latency, SystemClock, TokioDelay};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Arc::new(FileStore::open("./hacktrack_data")?);
//!
//!     let session = SessionStore::new(storage.clone(), Arc::new(TokioDelay), Latency::default());
//!     session.restore();
//!     session.login("admin@example.com", "adminpass", Role::Admin).await?;
//!
//!     let registry = HackathonRegistry::initialize(storage, Arc::new(SystemClock))?;
//!     if let Some(current) = registry.current_hackathon() {
//!         println!("Current hackathon: {}", current.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod hackathon;
pub mod notify;
pub mod review;
pub mod storage;
pub mod submission;
pub mod timing;

// Re-export top-level types for convenience
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use auth::{AuthError, AuthState, GuardDecision, Role, Route, Session, SessionStore};

pub use hackathon::{
    Hackathon, HackathonRegistry, HackathonResults, HackathonUpdate, NewHackathon,
    RegistryError, Winner,
};

pub use submission::{
    EvaluationSimulator, SubmissionDraft, SubmissionError, SubmissionStatus,
};

pub use review::{ReviewBoard, ReviewError, Team, WinnerSelection};

pub use notify::{Notice, Notifier};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
