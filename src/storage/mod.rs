//! HackTrack persistence
//!
//! This module stands in for browser local storage:
//!
//! - **kv**: the `KeyValueStore` trait with file and in-memory backends
//! - **snapshot**: typed whole-snapshot load/save under fixed keys
//! - **error**: error types
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//!   hacktrack_user.json         signed-in session
//!   hacktrack_hackathons.json   ordered hackathon collection
//!   hacktrack_results.json      results keyed by hackathon id
//! ```

pub mod error;
pub mod kv;
pub mod snapshot;

pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use snapshot::{HACKATHONS_KEY, RESULTS_KEY, SESSION_KEY};
