//! Review errors

use crate::hackathon::RegistryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("No winners selected")]
    NoWinnersSelected,

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Place must be 1 or higher")]
    InvalidPlace,

    #[error("No results announced for hackathon {0}")]
    NotAnnounced(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type ReviewResult<T> = Result<T, ReviewError>;
