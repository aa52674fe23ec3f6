//! Hackathon data types
//!
//! - `Hackathon`: one competition with its schedule and prizes
//! - `NewHackathon` / `HackathonUpdate`: create and partial-update payloads
//! - `Winner` / `HackathonResults`: published outcome of a hackathon
//!
//! All types serialize with camelCase field names, matching the persisted
//! snapshots.

use crate::hackathon::error::{RegistryError, RegistryResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One competition instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "event_date")]
    pub start_date: NaiveDate,
    #[serde(with = "event_date")]
    pub end_date: NaiveDate,
    #[serde(with = "event_date")]
    pub registration_deadline: NaiveDate,
    #[serde(with = "event_date")]
    pub submission_deadline: NaiveDate,
    pub location: String,
    /// Prize descriptions, first place first
    #[serde(default)]
    pub prizes: Vec<String>,
    pub is_active: bool,
}

/// Fields for a hackathon that has not been assigned an id yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewHackathon {
    pub title: String,
    pub description: String,
    #[serde(with = "event_date")]
    pub start_date: NaiveDate,
    #[serde(with = "event_date")]
    pub end_date: NaiveDate,
    #[serde(with = "event_date")]
    pub registration_deadline: NaiveDate,
    #[serde(with = "event_date")]
    pub submission_deadline: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub prizes: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewHackathon {
    /// Start a hackathon running from `start` to `end`
    ///
    /// Registration closes at `start` and submissions at `end` unless set
    /// otherwise. The event is active by default.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            start_date: start,
            end_date: end,
            registration_deadline: start,
            submission_deadline: end,
            location: location.into(),
            prizes: Vec::new(),
            is_active: true,
        }
    }

    /// Builder method: set the registration deadline
    pub fn registration_deadline(mut self, date: NaiveDate) -> Self {
        self.registration_deadline = date;
        self
    }

    /// Builder method: set the submission deadline
    pub fn submission_deadline(mut self, date: NaiveDate) -> Self {
        self.submission_deadline = date;
        self
    }

    /// Builder method: append a prize
    pub fn prize(mut self, prize: impl Into<String>) -> Self {
        self.prizes.push(prize.into());
        self
    }

    /// Builder method: create the event inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Apply the create-form rules
    ///
    /// Title, description and location must not be blank. Blank prize lines
    /// are dropped.
    pub fn validated(mut self) -> RegistryResult<Self> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(RegistryError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        self.prizes.retain(|p| !p.trim().is_empty());
        Ok(self)
    }

    pub(crate) fn into_hackathon(self, id: String) -> Hackathon {
        Hackathon {
            id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            registration_deadline: self.registration_deadline,
            submission_deadline: self.submission_deadline,
            location: self.location,
            prizes: self.prizes,
            is_active: self.is_active,
        }
    }
}

/// Partial update; only `Some` fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct HackathonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "event_date_opt", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "event_date_opt", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(with = "event_date_opt", skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<NaiveDate>,
    #[serde(with = "event_date_opt", skip_serializing_if = "Option::is_none")]
    pub submission_deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl HackathonUpdate {
    /// Update that only flips the active flag
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge into `hackathon`
    pub fn apply(&self, hackathon: &mut Hackathon) {
        if let Some(title) = &self.title {
            hackathon.title = title.clone();
        }
        if let Some(description) = &self.description {
            hackathon.description = description.clone();
        }
        if let Some(date) = self.start_date {
            hackathon.start_date = date;
        }
        if let Some(date) = self.end_date {
            hackathon.end_date = date;
        }
        if let Some(date) = self.registration_deadline {
            hackathon.registration_deadline = date;
        }
        if let Some(date) = self.submission_deadline {
            hackathon.submission_deadline = date;
        }
        if let Some(location) = &self.location {
            hackathon.location = location.clone();
        }
        if let Some(prizes) = &self.prizes {
            hackathon.prizes = prizes.clone();
        }
        if let Some(is_active) = self.is_active {
            hackathon.is_active = is_active;
        }
    }
}

/// One placed team in the published results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub id: String,
    pub team_name: String,
    /// 1 for first place
    pub place: u32,
    pub project_title: String,
    pub project_description: String,
}

/// Published outcome of one hackathon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HackathonResults {
    pub hackathon_id: String,
    pub winners: Vec<Winner>,
    /// Set by the registry when the results are published
    pub announcement_date: DateTime<Utc>,
}

impl HackathonResults {
    /// Winners ordered by place, for display
    pub fn podium(&self) -> Vec<&Winner> {
        let mut winners: Vec<&Winner> = self.winners.iter().collect();
        winners.sort_by_key(|w| w.place);
        winners
    }
}

/// Parse a calendar date given as `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| format!("invalid date '{}': expected YYYY-MM-DD or RFC 3339", raw))
}

mod event_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_event_date(&raw).map_err(serde::de::Error::custom)
    }
}

mod event_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::event_date::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|r| super::parse_event_date(&r).map_err(serde::de::Error::custom))
            .transpose()
    }
}
