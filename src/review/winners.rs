//! Winner selection and announcement

use crate::hackathon::{HackathonRegistry, HackathonResults, Winner};
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::review::error::{ReviewError, ReviewResult};
use crate::review::teams::Team;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// English ordinal suffix for a place number
pub fn ordinal_suffix(place: u32) -> &'static str {
    let (j, k) = (place % 10, place % 100);
    match (j, k) {
        (1, k) if k != 11 => "st",
        (2, k) if k != 12 => "nd",
        (3, k) if k != 13 => "rd",
        _ => "th",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WinnerPick {
    pub team_id: String,
    pub place: u32,
}

/// Places picked so far, at most one team per place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinnerSelection {
    picks: Vec<WinnerPick>,
}

impl WinnerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick `team_id` for `place`, replacing whoever held it
    pub fn select(&mut self, team_id: impl Into<String>, place: u32) {
        self.picks.retain(|p| p.place != place);
        self.picks.push(WinnerPick {
            team_id: team_id.into(),
            place,
        });
    }

    pub fn picks(&self) -> &[WinnerPick] {
        &self.picks
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }

    /// Turn the picks into winners ordered by place
    pub fn announce(&self, teams: &[Team]) -> ReviewResult<Vec<Winner>> {
        if self.picks.is_empty() {
            return Err(ReviewError::NoWinnersSelected);
        }

        let mut picks = self.picks.clone();
        picks.sort_by_key(|p| p.place);

        picks
            .into_iter()
            .map(|pick| {
                let team = teams
                    .iter()
                    .find(|t| t.id == pick.team_id)
                    .ok_or_else(|| ReviewError::UnknownTeam(pick.team_id.clone()))?;
                Ok(Winner {
                    id: team.id.clone(),
                    team_name: team.name.clone(),
                    place: pick.place,
                    project_title: team.project_title(),
                    project_description: team.abstract_text.clone(),
                })
            })
            .collect()
    }
}

/// Admin review session: the team list plus the winners picked from it
pub struct ReviewBoard {
    teams: Vec<Team>,
    selection: WinnerSelection,
    registry: Arc<HackathonRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl ReviewBoard {
    pub fn new(registry: Arc<HackathonRegistry>, teams: Vec<Team>) -> Self {
        Self {
            teams,
            selection: WinnerSelection::new(),
            registry,
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn selection(&self) -> &WinnerSelection {
        &self.selection
    }

    /// Mark a team as the winner of `place`
    pub fn select_winner(&mut self, team_id: &str, place: u32) -> ReviewResult<()> {
        if place == 0 {
            return Err(ReviewError::InvalidPlace);
        }
        let name = self
            .teams
            .iter()
            .find(|t| t.id == team_id)
            .map(|t| t.name.clone())
            .ok_or_else(|| ReviewError::UnknownTeam(team_id.to_string()))?;

        self.selection.select(team_id, place);
        self.notifier.notify(Notice::info(
            format!("Selected {}{} place winner", place, ordinal_suffix(place)),
            format!("{} has been marked as a winner.", name),
        ));
        Ok(())
    }

    /// Publish the picked winners for `hackathon_id`
    pub async fn announce(&self, hackathon_id: &str) -> ReviewResult<HackathonResults> {
        let winners = match self.selection.announce(&self.teams) {
            Ok(winners) => winners,
            Err(ReviewError::NoWinnersSelected) => {
                self.notifier.notify(Notice::destructive(
                    "No winners selected",
                    "Please select at least one winner before announcing results.",
                ));
                return Err(ReviewError::NoWinnersSelected);
            }
            Err(e) => return Err(e),
        };

        Ok(self.registry.publish_results(hackathon_id, winners).await?)
    }

    /// Send certificates to every reviewed team once results are out
    ///
    /// Returns the number of teams reached.
    pub fn send_certificates(&self, hackathon_id: &str) -> ReviewResult<usize> {
        if self.registry.results(hackathon_id).is_none() {
            return Err(ReviewError::NotAnnounced(hackathon_id.to_string()));
        }
        self.notifier.notify(Notice::info(
            "Certificates sent",
            "Participation and winner certificates have been sent to all eligible teams.",
        ));
        Ok(self.teams.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::BroadcastNotifier;
    use crate::review::teams::mock_teams;
    use crate::storage::MemoryStore;
    use crate::timing::SystemClock;

    #[test]
    fn test_ordinal_suffix() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (101, "st"),
            (111, "th"),
        ];
        for (place, suffix) in cases {
            assert_eq!(ordinal_suffix(place), suffix, "place {}", place);
        }
    }

    #[test]
    fn test_select_replaces_place() {
        let mut selection = WinnerSelection::new();
        selection.select("1", 1);
        selection.select("2", 2);
        selection.select("4", 1);

        assert_eq!(selection.picks().len(), 2);
        let winners = selection.announce(&mock_teams()).unwrap();
        assert_eq!(winners[0].team_name, "Data Pioneers");
        assert_eq!(winners[0].place, 1);
        assert_eq!(winners[1].team_name, "Tech Wizards");
    }

    #[test]
    fn test_announce_orders_by_place() {
        let mut selection = WinnerSelection::new();
        selection.select("6", 3);
        selection.select("1", 1);
        selection.select("2", 2);

        let winners = selection.announce(&mock_teams()).unwrap();
        let places: Vec<u32> = winners.iter().map(|w| w.place).collect();
        assert_eq!(places, vec![1, 2, 3]);
        assert_eq!(
            winners[0].project_title,
            "AI-powered smart city solution for traffic optimization"
        );
    }

    #[test]
    fn test_announce_errors() {
        let selection = WinnerSelection::new();
        assert!(matches!(
            selection.announce(&mock_teams()),
            Err(ReviewError::NoWinnersSelected)
        ));

        let mut selection = WinnerSelection::new();
        selection.select("99", 1);
        assert!(matches!(
            selection.announce(&mock_teams()),
            Err(ReviewError::UnknownTeam(id)) if id == "99"
        ));
    }

    #[tokio::test]
    async fn test_board_publishes_into_registry() {
        let registry = Arc::new(
            HackathonRegistry::initialize(Arc::new(MemoryStore::new()), Arc::new(SystemClock))
                .unwrap(),
        );
        let notifier = Arc::new(BroadcastNotifier::default());
        let mut notices = notifier.subscribe();
        let mut board =
            ReviewBoard::new(registry.clone(), mock_teams()).with_notifier(notifier.clone());

        assert!(matches!(
            board.announce("1").await,
            Err(ReviewError::NoWinnersSelected)
        ));
        assert!(notices.try_recv().unwrap().is_destructive());

        assert!(matches!(
            board.select_winner("42", 1),
            Err(ReviewError::UnknownTeam(_))
        ));
        assert!(matches!(
            board.select_winner("1", 0),
            Err(ReviewError::InvalidPlace)
        ));

        board.select_winner("1", 1).unwrap();
        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.title, "Selected 1st place winner");
        assert_eq!(notice.description, "Innovators has been marked as a winner.");

        let published = board.announce("1").await.unwrap();
        assert_eq!(published.winners.len(), 1);
        assert_eq!(registry.results("1").unwrap().winners[0].team_name, "Innovators");
    }

    #[tokio::test]
    async fn test_certificates_follow_announcement() {
        let registry = Arc::new(
            HackathonRegistry::initialize(Arc::new(MemoryStore::new()), Arc::new(SystemClock))
                .unwrap(),
        );
        let notifier = Arc::new(BroadcastNotifier::default());
        let mut notices = notifier.subscribe();
        let mut board =
            ReviewBoard::new(registry.clone(), mock_teams()).with_notifier(notifier.clone());

        assert!(matches!(
            board.send_certificates("1"),
            Err(ReviewError::NotAnnounced(id)) if id == "1"
        ));

        board.select_winner("2", 1).unwrap();
        board.announce("1").await.unwrap();
        while notices.try_recv().is_ok() {}

        assert_eq!(board.send_certificates("1").unwrap(), 6);
        assert_eq!(notices.try_recv().unwrap().title, "Certificates sent");
    }
}
