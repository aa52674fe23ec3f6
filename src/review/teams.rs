//! Teams under review

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    Submitted,
    UnderReview,
    Shortlisted,
    NotSelected,
    Winner,
}

impl TeamStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamStatus::Submitted => "submitted",
            TeamStatus::UnderReview => "under_review",
            TeamStatus::Shortlisted => "shortlisted",
            TeamStatus::NotSelected => "not_selected",
            TeamStatus::Winner => "winner",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamStatus::Submitted => "Submitted",
            TeamStatus::UnderReview => "Under Review",
            TeamStatus::Shortlisted => "Shortlisted",
            TeamStatus::NotSelected => "Not Selected",
            TeamStatus::Winner => "Winner",
        }
    }
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TeamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "submitted" => Ok(TeamStatus::Submitted),
            "under_review" => Ok(TeamStatus::UnderReview),
            "shortlisted" => Ok(TeamStatus::Shortlisted),
            "not_selected" => Ok(TeamStatus::NotSelected),
            "winner" => Ok(TeamStatus::Winner),
            other => Err(format!("unknown team status: {}", other)),
        }
    }
}

/// Status filter of the team table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TeamStatus),
}

impl StatusFilter {
    pub fn matches(self, status: TeamStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub members: Vec<TeamMember>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub has_video: bool,
    pub has_github: bool,
    pub status: TeamStatus,
    pub score: u32,
    pub submission_date: NaiveDate,
}

impl Team {
    /// Abstract without its closing period
    pub fn project_title(&self) -> String {
        self.abstract_text.trim().trim_end_matches('.').to_string()
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .members
                .iter()
                .any(|m| m.name.to_lowercase().contains(needle))
    }
}

/// Case-insensitive search on team and member names, then status filter
pub fn filter_teams<'a>(teams: &'a [Team], search: &str, status: StatusFilter) -> Vec<&'a Team> {
    let needle = search.trim().to_lowercase();
    teams
        .iter()
        .filter(|t| t.matches_search(&needle) && status.matches(t.status))
        .collect()
}

/// Shortlisted teams, best score first
pub fn shortlist(teams: &[Team]) -> Vec<&Team> {
    let mut picked: Vec<&Team> = teams
        .iter()
        .filter(|t| t.status == TeamStatus::Shortlisted)
        .collect();
    picked.sort_by(|a, b| b.score.cmp(&a.score));
    picked
}

fn member(name: &str, email: &str, role: &str) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn team(
    id: &str,
    name: &str,
    members: Vec<TeamMember>,
    abstract_text: &str,
    has_video: bool,
    has_github: bool,
    status: TeamStatus,
    score: u32,
    submitted_on: u32,
) -> Team {
    Team {
        id: id.to_string(),
        name: name.to_string(),
        members,
        abstract_text: abstract_text.to_string(),
        has_video,
        has_github,
        status,
        score,
        submission_date: NaiveDate::from_ymd_opt(2023, 10, submitted_on).unwrap_or_default(),
    }
}

/// The fixed set of teams shown on the admin dashboard
pub fn mock_teams() -> Vec<Team> {
    use TeamStatus::*;

    vec![
        team(
            "1",
            "Innovators",
            vec![
                member("John Doe", "john@example.com", "Team Leader"),
                member("Jane Smith", "jane@example.com", "Developer"),
                member("Bob Johnson", "bob@example.com", "Designer"),
            ],
            "AI-powered smart city solution for traffic optimization.",
            true,
            true,
            Shortlisted,
            87,
            28,
        ),
        team(
            "2",
            "Tech Wizards",
            vec![
                member("Alice Brown", "alice@example.com", "Team Leader"),
                member("Charlie Davis", "charlie@example.com", "Developer"),
            ],
            "Machine learning platform for sustainable agriculture.",
            true,
            false,
            Shortlisted,
            85,
            27,
        ),
        team(
            "3",
            "Code Masters",
            vec![
                member("Eve Wilson", "eve@example.com", "Team Leader"),
                member("Frank Miller", "frank@example.com", "Designer"),
                member("Grace Lee", "grace@example.com", "Developer"),
                member("Henry Evans", "henry@example.com", "Developer"),
            ],
            "AI-driven health monitoring system for elderly care.",
            false,
            true,
            NotSelected,
            65,
            30,
        ),
        team(
            "4",
            "Data Pioneers",
            vec![
                member("Ivy Chen", "ivy@example.com", "Team Leader"),
                member("Jack Wang", "jack@example.com", "Developer"),
            ],
            "Renewable energy optimization using predictive analytics.",
            true,
            true,
            Shortlisted,
            82,
            29,
        ),
        team(
            "5",
            "Neural Network",
            vec![
                member("Kelly Zhang", "kelly@example.com", "Team Leader"),
                member("Liam Singh", "liam@example.com", "Developer"),
                member("Mia Johnson", "mia@example.com", "Designer"),
            ],
            "AI-powered water quality monitoring for smart cities.",
            false,
            true,
            NotSelected,
            68,
            26,
        ),
        team(
            "6",
            "Algorithm Aces",
            vec![
                member("Noah Brown", "noah@example.com", "Team Leader"),
                member("Olivia Davis", "olivia@example.com", "Developer"),
                member("Peter Wilson", "peter@example.com", "Developer"),
            ],
            "Smart grid optimization using reinforcement learning.",
            true,
            false,
            Shortlisted,
            81,
            28,
        ),
    ]
}
