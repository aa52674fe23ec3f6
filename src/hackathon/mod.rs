//! Hackathon events and results
//!
//! - **types**: `Hackathon`, `NewHackathon`, `HackathonUpdate`, `Winner`, `HackathonResults`
//! - **registry**: `HackathonRegistry`, the store owning events and results
//! - **seed**: the built-in "AI for Good Hackathon"
//! - **error**: error types

pub mod error;
pub mod registry;
pub mod seed;
pub mod types;

pub use error::{RegistryError, RegistryResult};
pub use registry::{HackathonRegistry, RegistrySnapshot};
pub use seed::{seed_hackathons, SEED_HACKATHON_ID};
pub use types::{parse_event_date, Hackathon, HackathonResults, HackathonUpdate, NewHackathon, Winner};
