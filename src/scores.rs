use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::storage::{to_pretty_json, Storage, StorageError, StorageResult};

/// Points added on top of per-letter points when a round is won.
pub const WIN_BONUS: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub wins: u32,
    pub losses: u32,
    pub score: u32,
}

/// Per-player totals keyed by name, in first-login order.
pub struct ScoreStore {
    players: IndexMap<String, PlayerRecord>,
    storage: Box<dyn Storage>,
}

impl ScoreStore {
    /// Load the score record. A missing or unreadable record gives an empty
    /// store; a record that does not parse is an error.
    pub fn load(storage: Box<dyn Storage>) -> StorageResult<Self> {
        let players = match storage.read() {
            Ok(Some(contents)) => serde_json::from_str::<IndexMap<String, PlayerRecord>>(&contents)
                .map_err(|e| StorageError::malformed(storage.describe(), e))?,
            Ok(None) => {
                info!(record = %storage.describe(), "no score record yet; starting empty");
                IndexMap::new()
            }
            Err(err) => {
                warn!(error = %err, "score record unreadable; starting empty");
                IndexMap::new()
            }
        };
        debug!(players = players.len(), "loaded scores");
        Ok(Self { players, storage })
    }

    pub fn save(&mut self) -> StorageResult<()> {
        let json = to_pretty_json(&self.players)
            .map_err(|e| StorageError::malformed(self.storage.describe(), e))?;
        self.storage.write(&json)
    }

    /// Returns the record and whether it was just created.
    pub fn get_or_create(&mut self, name: &str) -> (&mut PlayerRecord, bool) {
        let created = !self.players.contains_key(name);
        if created {
            info!(player = name, "creating score record");
        }
        (self.players.entry(name.to_string()).or_default(), created)
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.get(name)
    }

    pub fn players(&self) -> impl Iterator<Item = (&str, &PlayerRecord)> {
        self.players.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn award_points(&mut self, name: &str, points: u32) {
        let (record, _) = self.get_or_create(name);
        record.score = record.score.saturating_add(points);
    }

    pub fn record_win(&mut self, name: &str) {
        let (record, _) = self.get_or_create(name);
        record.wins = record.wins.saturating_add(1);
        record.score = record.score.saturating_add(WIN_BONUS);
    }

    pub fn record_loss(&mut self, name: &str) {
        let (record, _) = self.get_or_create(name);
        record.losses = record.losses.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_missing_record_loads_empty() {
        let store = ScoreStore::load(Box::new(MemoryStorage::new())).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        let storage = MemoryStorage::with_contents("{ not json");
        let result = ScoreStore::load(Box::new(storage));
        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_unreadable_record_loads_empty() {
        let storage = MemoryStorage::with_contents(r#"{ "ann": { "wins": 2, "losses": 0, "score": 9 } }"#);
        storage.set_fail_reads(true);
        let store = ScoreStore::load(Box::new(storage)).unwrap();
        assert!(store.is_empty());
        assert!(store.get("ann").is_none());
    }

    #[test]
    fn test_get_or_create_only_creates_once() {
        let mut store = ScoreStore::load(Box::new(MemoryStorage::new())).unwrap();
        let (record, created) = store.get_or_create("ayla");
        assert!(created);
        assert_eq!(*record, PlayerRecord::default());
        record.score = 7;

        let (record, created) = store.get_or_create("ayla");
        assert!(!created);
        assert_eq!(record.score, 7);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = ScoreStore::load(Box::new(MemoryStorage::new())).unwrap();
        store.get_or_create("Sam");
        store.get_or_create("sam");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_win_and_loss_bookkeeping() {
        let mut store = ScoreStore::load(Box::new(MemoryStorage::new())).unwrap();
        store.award_points("kim", 3);
        store.record_win("kim");
        store.record_loss("kim");
        assert_eq!(
            store.get("kim"),
            Some(&PlayerRecord { wins: 1, losses: 1, score: 13 })
        );
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let handle = MemoryStorage::new();
        let mut store = ScoreStore::load(Box::new(handle.clone())).unwrap();
        store.get_or_create("zoe");
        store.get_or_create("adam");
        store.award_points("adam", 4);
        store.save().unwrap();

        let written = handle.contents().unwrap();
        assert!(written.contains("\"wins\": 0"));

        let reloaded = ScoreStore::load(Box::new(handle)).unwrap();
        let names: Vec<&str> = reloaded.players().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zoe", "adam"]);
        assert_eq!(reloaded.get("adam").unwrap().score, 4);
    }

    #[test]
    fn test_reads_record_written_by_hand() {
        let storage = MemoryStorage::with_contents(
            r#"{
    "ann": { "wins": 2, "losses": 1, "score": 25 }
}"#,
        );
        let store = ScoreStore::load(Box::new(storage)).unwrap();
        assert_eq!(
            store.get("ann"),
            Some(&PlayerRecord { wins: 2, losses: 1, score: 25 })
        );
    }

    #[test]
    fn test_totals_saturate_at_max() {
        let storage = MemoryStorage::with_contents(
            r#"{ "max": { "wins": 4294967295, "losses": 4294967295, "score": 4294967290 } }"#,
        );
        let mut store = ScoreStore::load(Box::new(storage)).unwrap();
        store.award_points("max", 3);
        store.record_win("max");
        store.record_loss("max");
        assert_eq!(
            store.get("max"),
            Some(&PlayerRecord { wins: u32::MAX, losses: u32::MAX, score: u32::MAX })
        );
    }
}
