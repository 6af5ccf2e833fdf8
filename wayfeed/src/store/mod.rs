//! Persistent store adapter.
//!
//! Collections are serialized to JSON and written to a [`StoreBackend`]
//! under fixed keys, one write per logical collection. Loads parse the raw
//! payload, revive timestamp strings ([`revive`]) and deserialize into
//! typed collections; any failure along the way falls back to the provided
//! seed collection. Load errors are never surfaced to callers.

use std::collections::BTreeSet;

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::StoreError;

pub mod backend;
pub mod revive;

pub use backend::{FileStore, MemoryStore, StoreBackend};
pub use revive::revive_dates;

/// Key under which the post collection is stored.
pub const POSTS_KEY: &str = "travelPosts";
/// Key under which the user collection is stored.
pub const USERS_KEY: &str = "travelUsers";
/// Key under which the notification collection is stored.
pub const NOTIFICATIONS_KEY: &str = "travelNotifications";
/// Key under which the saved-post-id set is stored.
pub const SAVED_IDS_KEY: &str = "savedPostIds";

/// Typed facade over a [`StoreBackend`].
#[derive(Debug)]
pub struct Store<B> {
    backend: B,
}

impl<B: StoreBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load the collection stored under `key`, falling back to `seed` when
    /// the key is absent or the payload is unreadable.
    pub fn load_collection<T: DeserializeOwned>(&self, key: &str, seed: Vec<T>) -> Vec<T> {
        match self.try_load(key) {
            Ok(Some(items)) => items,
            Ok(None) => seed,
            Err(err) => {
                warn!("discarding stored `{key}` collection: {err}");
                seed
            }
        }
    }

    /// Load the saved-post-id set, stored as an ordered sequence of ids.
    pub fn load_saved_ids(&self) -> BTreeSet<u64> {
        match self.try_load::<u64>(SAVED_IDS_KEY) {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => BTreeSet::new(),
            Err(err) => {
                warn!("discarding stored `{SAVED_IDS_KEY}` set: {err}");
                BTreeSet::new()
            }
        }
    }

    /// Serialize `items` and write them under `key`.
    pub fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(items)?;
        self.backend.write(key, &payload)
    }

    /// Persist the saved-post-id set as an ordered sequence.
    pub fn save_saved_ids(&mut self, ids: &BTreeSet<u64>) -> Result<(), StoreError> {
        let ordered: Vec<u64> = ids.iter().copied().collect();
        self.save_collection(SAVED_IDS_KEY, &ordered)
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StoreError> {
        let Some(payload) = self.backend.read(key)? else {
            return Ok(None);
        };
        let raw: serde_json::Value = serde_json::from_str(&payload)?;
        let revived = revive_dates(raw)?;
        let items = serde_json::from_value(revived)?;
        Ok(Some(items))
    }
}
