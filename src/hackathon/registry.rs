//! Hackathon Registry
//!
//! Owns the ordered hackathon collection and the published results, keyed by
//! hackathon id. Every mutation writes the whole affected snapshot first and
//! only then updates the in-memory state, so a failed write changes nothing.
//!
//! The "current" hackathon is the first active event in collection order.

use crate::hackathon::error::{RegistryError, RegistryResult};
use crate::hackathon::seed::seed_hackathons;
use crate::hackathon::types::{Hackathon, HackathonResults, HackathonUpdate, NewHackathon, Winner};
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::storage::{snapshot, KeyValueStore, HACKATHONS_KEY, RESULTS_KEY};
use crate::timing::Clock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Everything the registry holds, as seen by subscribers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub hackathons: Vec<Hackathon>,
    pub results: BTreeMap<String, HackathonResults>,
}

impl RegistrySnapshot {
    /// First active event, if any
    pub fn current_hackathon(&self) -> Option<&Hackathon> {
        self.hackathons.iter().find(|h| h.is_active)
    }

    pub fn hackathon(&self, id: &str) -> Option<&Hackathon> {
        self.hackathons.iter().find(|h| h.id == id)
    }

    /// Most recently announced results across all hackathons
    pub fn latest_results(&self) -> Option<&HackathonResults> {
        self.results.values().max_by_key(|r| r.announcement_date)
    }
}

/// Persisted results: keyed by hackathon id, or a single record written by
/// older versions
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultsSnapshot {
    Keyed(BTreeMap<String, HackathonResults>),
    Single(HackathonResults),
}

impl ResultsSnapshot {
    fn into_map(self) -> BTreeMap<String, HackathonResults> {
        match self {
            ResultsSnapshot::Keyed(map) => map,
            ResultsSnapshot::Single(results) => {
                BTreeMap::from([(results.hackathon_id.clone(), results)])
            }
        }
    }
}

/// Hackathon events and their results
pub struct HackathonRegistry {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<RegistrySnapshot>,
    ops: Mutex<()>,
}

impl HackathonRegistry {
    /// Load persisted state, falling back to the seed event
    ///
    /// A snapshot that exists but does not parse is reported as
    /// `StorageError::Malformed` rather than silently replaced.
    pub fn initialize(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> RegistryResult<Self> {
        let hackathons = match snapshot::load::<Vec<Hackathon>>(storage.as_ref(), HACKATHONS_KEY)? {
            Some(hackathons) => {
                tracing::info!(count = hackathons.len(), "Loaded hackathons");
                hackathons
            }
            None => {
                tracing::info!("No saved hackathons, starting from seed data");
                seed_hackathons()
            }
        };

        let results = snapshot::load::<ResultsSnapshot>(storage.as_ref(), RESULTS_KEY)?
            .map(ResultsSnapshot::into_map)
            .unwrap_or_default();

        let (state, _) = watch::channel(RegistrySnapshot {
            hackathons,
            results,
        });

        Ok(Self {
            storage,
            clock,
            notifier: Arc::new(TracingNotifier),
            state,
            ops: Mutex::new(()),
        })
    }

    /// Route notices somewhere other than the log
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Create a hackathon with a fresh id and append it to the collection
    pub async fn add_hackathon(&self, new: NewHackathon) -> RegistryResult<Hackathon> {
        let _ops = self.ops.lock().await;

        let mut hackathons = self.state.borrow().hackathons.clone();
        let id = self.next_id(&hackathons);
        let hackathon = new.into_hackathon(id);
        hackathons.push(hackathon.clone());

        snapshot::save(self.storage.as_ref(), HACKATHONS_KEY, &hackathons)?;
        self.state.send_modify(|s| s.hackathons = hackathons);

        tracing::info!(id = %hackathon.id, title = %hackathon.title, "Hackathon created");
        self.notifier.notify(Notice::info(
            "Hackathon created",
            "The hackathon has been successfully created and published.",
        ));

        Ok(hackathon)
    }

    /// Shallow-merge `update` into the hackathon with `id`
    pub async fn update_hackathon(
        &self,
        id: &str,
        update: HackathonUpdate,
    ) -> RegistryResult<Hackathon> {
        let _ops = self.ops.lock().await;

        let mut hackathons = self.state.borrow().hackathons.clone();
        let hackathon = hackathons
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        update.apply(hackathon);
        let updated = hackathon.clone();

        snapshot::save(self.storage.as_ref(), HACKATHONS_KEY, &hackathons)?;
        self.state.send_modify(|s| s.hackathons = hackathons);

        tracing::info!(id = %updated.id, active = updated.is_active, "Hackathon updated");
        Ok(updated)
    }

    /// Publish `winners` for a hackathon, stamped with the current time
    ///
    /// Replaces any earlier results for the same hackathon. The winner list is
    /// stored as given; completeness checks belong to the caller.
    pub async fn publish_results(
        &self,
        hackathon_id: &str,
        winners: Vec<Winner>,
    ) -> RegistryResult<HackathonResults> {
        let _ops = self.ops.lock().await;

        let published = HackathonResults {
            hackathon_id: hackathon_id.to_string(),
            winners,
            announcement_date: self.clock.now(),
        };

        let mut results = self.state.borrow().results.clone();
        results.insert(hackathon_id.to_string(), published.clone());

        snapshot::save(self.storage.as_ref(), RESULTS_KEY, &results)?;
        self.state.send_modify(|s| s.results = results);

        tracing::info!(
            hackathon_id,
            winners = published.winners.len(),
            "Results published"
        );
        self.notifier.notify(Notice::info(
            "Winners announced",
            "The hackathon results have been announced and certificates will be sent automatically.",
        ));

        Ok(published)
    }

    /// Millisecond timestamp id, bumped until it is unused
    fn next_id(&self, hackathons: &[Hackathon]) -> String {
        let mut candidate = self.clock.now().timestamp_millis();
        while hackathons.iter().any(|h| h.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.state.borrow().clone()
    }

    pub fn hackathons(&self) -> Vec<Hackathon> {
        self.state.borrow().hackathons.clone()
    }

    pub fn hackathon(&self, id: &str) -> Option<Hackathon> {
        self.state.borrow().hackathon(id).cloned()
    }

    pub fn current_hackathon(&self) -> Option<Hackathon> {
        self.state.borrow().current_hackathon().cloned()
    }

    pub fn results(&self, hackathon_id: &str) -> Option<HackathonResults> {
        self.state.borrow().results.get(hackathon_id).cloned()
    }

    pub fn latest_results(&self) -> Option<HackathonResults> {
        self.state.borrow().latest_results().cloned()
    }

    /// Receive every change to hackathons or results
    pub fn subscribe(&self) -> watch::Receiver<RegistrySnapshot> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FlakyStore;
    use crate::storage::{MemoryStore, StorageError};
    use crate::timing::ManualClock;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        ))
    }

    fn create_test_registry() -> (HackathonRegistry, Arc<MemoryStore>, Arc<ManualClock>) {
        let storage = Arc::new(MemoryStore::new());
        let clock = clock();
        let registry = HackathonRegistry::initialize(storage.clone(), clock.clone()).unwrap();
        (registry, storage, clock)
    }

    fn new_hackathon(title: &str) -> NewHackathon {
        NewHackathon::new(title, "Description", "Virtual", date(2024, 6, 1), date(2024, 6, 3))
            .registration_deadline(date(2024, 5, 20))
            .prize("$500")
    }

    fn winner(id: &str, team: &str, place: u32) -> Winner {
        Winner {
            id: id.to_string(),
            team_name: team.to_string(),
            place,
            project_title: "X".to_string(),
            project_description: "Y".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seed_is_current() {
        let (registry, _storage, _clock) = create_test_registry();

        let current = registry.current_hackathon().unwrap();
        assert_eq!(current.title, "AI for Good Hackathon");
        assert_eq!(registry.hackathons().len(), 1);
        assert!(registry.latest_results().is_none());
    }

    #[tokio::test]
    async fn test_deactivating_seed_clears_current() {
        let (registry, _storage, _clock) = create_test_registry();

        registry
            .update_hackathon("1", HackathonUpdate::active(false))
            .await
            .unwrap();

        assert!(registry.current_hackathon().is_none());
    }

    #[tokio::test]
    async fn test_current_falls_to_next_active() {
        let (registry, _storage, _clock) = create_test_registry();
        let second = registry.add_hackathon(new_hackathon("Second")).await.unwrap();
        let third = registry.add_hackathon(new_hackathon("Third")).await.unwrap();

        assert_eq!(registry.current_hackathon().unwrap().id, "1");

        registry
            .update_hackathon("1", HackathonUpdate::active(false))
            .await
            .unwrap();
        assert_eq!(registry.current_hackathon().unwrap().id, second.id);

        registry
            .update_hackathon(&second.id, HackathonUpdate::active(false))
            .await
            .unwrap();
        assert_eq!(registry.current_hackathon().unwrap().id, third.id);
    }

    #[tokio::test]
    async fn test_add_hackathon() {
        let (registry, storage, _clock) = create_test_registry();
        let before = registry.hackathons().len();

        let created = registry.add_hackathon(new_hackathon("Climate Jam")).await.unwrap();

        let hackathons = registry.hackathons();
        assert_eq!(hackathons.len(), before + 1);
        let stored = hackathons.last().unwrap();
        assert_eq!(stored, &created);
        assert_eq!(stored.title, "Climate Jam");
        assert_eq!(stored.registration_deadline, date(2024, 5, 20));
        assert_eq!(stored.prizes, vec!["$500"]);
        assert!(stored.is_active);

        let saved: Vec<Hackathon> = snapshot::load(storage.as_ref(), HACKATHONS_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(saved, hackathons);
    }

    #[tokio::test]
    async fn test_ids_unique_within_same_millisecond() {
        let (registry, _storage, clock) = create_test_registry();

        let a = registry.add_hackathon(new_hackathon("A")).await.unwrap();
        let b = registry.add_hackathon(new_hackathon("B")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id, clock.now().timestamp_millis().to_string());

        clock.advance(chrono::Duration::milliseconds(1));
        let c = registry.add_hackathon(new_hackathon("C")).await.unwrap();
        assert_ne!(c.id, a.id);
        assert_ne!(c.id, b.id);
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let (registry, _storage, _clock) = create_test_registry();
        let before = registry.snapshot();

        let err = registry
            .update_hackathon("does-not-exist", HackathonUpdate::active(false))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::NotFound(id) if id == "does-not-exist"));
        assert_eq!(registry.snapshot(), before);
    }

    #[tokio::test]
    async fn test_update_merges() {
        let (registry, _storage, _clock) = create_test_registry();

        let updated = registry
            .update_hackathon(
                "1",
                HackathonUpdate {
                    location: Some("Lisbon".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.location, "Lisbon");
        assert_eq!(updated.title, "AI for Good Hackathon");
        assert!(updated.is_active);
    }

    #[tokio::test]
    async fn test_publish_results() {
        let (registry, _storage, clock) = create_test_registry();
        let before_call = clock.now();

        let winners = vec![winner("w1", "Innovators", 1)];
        registry.publish_results("1", winners.clone()).await.unwrap();

        let results = registry.results("1").unwrap();
        assert_eq!(results.winners, winners);
        assert_eq!(results.winners[0].place, 1);
        assert!(results.announcement_date >= before_call);
    }

    #[tokio::test]
    async fn test_publish_preserves_order() {
        let (registry, _storage, _clock) = create_test_registry();
        let winners = vec![
            winner("w3", "Data Pioneers", 3),
            winner("w1", "Innovators", 1),
            winner("w2", "Tech Wizards", 2),
        ];

        let results = registry.publish_results("1", winners.clone()).await.unwrap();
        assert_eq!(results.winners, winners);
    }

    #[tokio::test]
    async fn test_results_keyed_by_hackathon() {
        let (registry, _storage, clock) = create_test_registry();
        let other = registry.add_hackathon(new_hackathon("Other")).await.unwrap();

        registry
            .publish_results("1", vec![winner("w1", "Innovators", 1)])
            .await
            .unwrap();
        clock.advance(chrono::Duration::minutes(5));
        registry
            .publish_results(&other.id, vec![winner("w2", "Tech Wizards", 1)])
            .await
            .unwrap();

        assert_eq!(registry.results("1").unwrap().winners[0].team_name, "Innovators");
        assert_eq!(
            registry.results(&other.id).unwrap().winners[0].team_name,
            "Tech Wizards"
        );
        assert_eq!(registry.latest_results().unwrap().hackathon_id, other.id);

        // Republishing overwrites only that hackathon's entry
        registry
            .publish_results("1", vec![winner("w9", "Code Masters", 1)])
            .await
            .unwrap();
        assert_eq!(registry.results("1").unwrap().winners[0].team_name, "Code Masters");
        assert_eq!(
            registry.results(&other.id).unwrap().winners[0].team_name,
            "Tech Wizards"
        );
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let storage = Arc::new(MemoryStore::new());
        let created_id;
        {
            let registry = HackathonRegistry::initialize(storage.clone(), clock()).unwrap();
            created_id = registry.add_hackathon(new_hackathon("Persisted")).await.unwrap().id;
            registry
                .update_hackathon("1", HackathonUpdate::active(false))
                .await
                .unwrap();
            registry
                .publish_results(&created_id, vec![winner("w1", "Innovators", 1)])
                .await
                .unwrap();
        }

        let registry = HackathonRegistry::initialize(storage, clock()).unwrap();
        assert_eq!(registry.hackathons().len(), 2);
        assert_eq!(registry.current_hackathon().unwrap().id, created_id);
        assert!(registry.results(&created_id).is_some());
    }

    #[tokio::test]
    async fn test_loads_single_slot_results() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                RESULTS_KEY,
                r#"{"hackathonId":"1","winners":[{"id":"w1","teamName":"Innovators","place":1,"projectTitle":"X","projectDescription":"Y"}],"announcementDate":"2023-12-11T10:00:00.000Z"}"#,
            )
            .unwrap();

        let registry = HackathonRegistry::initialize(storage, clock()).unwrap();
        let results = registry.results("1").unwrap();
        assert_eq!(results.winners[0].team_name, "Innovators");
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_reported() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(HACKATHONS_KEY, "[{\"id\":").unwrap();

        let err = HackathonRegistry::initialize(storage, clock()).err().unwrap();
        assert!(matches!(
            err,
            RegistryError::Storage(StorageError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_write_changes_nothing() {
        let storage = Arc::new(FlakyStore::new());
        let registry = HackathonRegistry::initialize(storage.clone(), clock()).unwrap();
        let before = registry.snapshot();
        storage.fail_writes(true);

        let err = registry.add_hackathon(new_hackathon("Lost")).await.unwrap_err();
        assert!(matches!(err, RegistryError::Storage(StorageError::Unavailable(_))));

        assert!(registry
            .update_hackathon("1", HackathonUpdate::active(false))
            .await
            .is_err());
        assert!(registry
            .publish_results("1", vec![winner("w1", "Innovators", 1)])
            .await
            .is_err());

        assert_eq!(registry.snapshot(), before);
    }

    #[tokio::test]
    async fn test_subscribers_notified() {
        let (registry, _storage, _clock) = create_test_registry();
        let mut rx = registry.subscribe();
        rx.borrow_and_update();

        registry
            .update_hackathon("1", HackathonUpdate::active(false))
            .await
            .unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().current_hackathon().is_none());
    }
}
