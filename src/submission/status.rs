//! Submission status ladder

use serde::{Deserialize, Serialize};

/// Where a team's submission stands
///
/// Statuses only move forward. `Shortlisted` and `NotSelected` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    NotStarted,
    InProgress,
    Submitted,
    UnderReview,
    Shortlisted,
    NotSelected,
}

impl SubmissionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SubmissionStatus::NotStarted => "Not Started",
            SubmissionStatus::InProgress => "In Progress",
            SubmissionStatus::Submitted => "Submitted",
            SubmissionStatus::UnderReview => "Under Review",
            SubmissionStatus::Shortlisted => "Shortlisted",
            SubmissionStatus::NotSelected => "Not Selected",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SubmissionStatus::NotStarted => {
                "Your team has not started the submission process yet."
            }
            SubmissionStatus::InProgress => {
                "Your submission is being prepared but not yet submitted."
            }
            SubmissionStatus::Submitted => {
                "Your submission has been received and is awaiting review."
            }
            SubmissionStatus::UnderReview => {
                "Your submission is currently being evaluated by our AI system."
            }
            SubmissionStatus::Shortlisted => "Congratulations! Your team has been shortlisted.",
            SubmissionStatus::NotSelected => {
                "Unfortunately, your team was not selected for the final round."
            }
        }
    }

    /// Position on the ladder; both terminal states share the last rung
    fn rank(self) -> u8 {
        match self {
            SubmissionStatus::NotStarted => 0,
            SubmissionStatus::InProgress => 1,
            SubmissionStatus::Submitted => 2,
            SubmissionStatus::UnderReview => 3,
            SubmissionStatus::Shortlisted | SubmissionStatus::NotSelected => 4,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionStatus::Shortlisted | SubmissionStatus::NotSelected)
    }

    /// True when `next` is a forward move from `self`
    pub fn can_advance_to(self, next: SubmissionStatus) -> bool {
        !self.is_terminal() && next.rank() > self.rank()
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
