//! Admin review of submitted teams

pub mod error;
pub mod teams;
pub mod winners;

pub use error::{ReviewError, ReviewResult};
pub use teams::{filter_teams, mock_teams, shortlist, StatusFilter, Team, TeamMember, TeamStatus};
pub use winners::{ordinal_suffix, ReviewBoard, WinnerPick, WinnerSelection};
