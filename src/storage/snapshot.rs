//! Typed snapshot access
//!
//! Each logical store owns one key and overwrites its whole JSON snapshot on
//! every mutation. There is no schema version and no partial write.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::kv::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the signed-in session `{ id, email, name, role }`
pub const SESSION_KEY: &str = "hacktrack_user";

/// Key holding the ordered hackathon collection
pub const HACKATHONS_KEY: &str = "hacktrack_hackathons";

/// Key holding published results
pub const RESULTS_KEY: &str = "hacktrack_results";

/// Every key the application writes
pub const ALL_KEYS: [&str; 3] = [SESSION_KEY, HACKATHONS_KEY, RESULTS_KEY];

/// Read and parse the snapshot stored under `key`
///
/// Returns `Ok(None)` when nothing is stored and `StorageError::Malformed`
/// when the stored text does not parse as `T`.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> StorageResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::malformed(key, e))
}

/// Serialize `value` and overwrite the snapshot stored under `key`
pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> StorageResult<()> {
    let content =
        serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &content)
}

/// Remove every application key
pub fn clear_all(store: &dyn KeyValueStore) -> StorageResult<()> {
    for key in ALL_KEYS {
        store.remove(key)?;
    }
    Ok(())
}
