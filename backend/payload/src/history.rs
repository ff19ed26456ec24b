use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    classify::{Category, ClassifiedPayload},
    store::{KeyValueStore, StoreError},
};

pub const HISTORY_KEY: &str = "qrScanHistory";
pub const HISTORY_CAPACITY: usize = 10;
pub const DISPLAY_LIMIT: usize = 100;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub category: Category,
    pub data: String,
    pub display_data: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(payload: &ClassifiedPayload, scanned_at: DateTime<Utc>) -> Self {
        Self {
            id: scanned_at.timestamp_millis(),
            category: payload.category(),
            data: payload.raw_text().to_string(),
            display_data: truncate(payload.display_text()),
            timestamp: scanned_at,
        }
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(DISPLAY_LIMIT) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Most recent scans, newest first, never more than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanHistory {
    entries: VecDeque<HistoryEntry>,
}

impl ScanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing or unreadable history values start a fresh history.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, StoreError> {
        let Some(stored) = store.get(HISTORY_KEY)? else {
            return Ok(Self::new());
        };

        let mut entries: VecDeque<HistoryEntry> = match serde_json::from_str(&stored) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding malformed {HISTORY_KEY} value: {e}");
                VecDeque::new()
            }
        };
        entries.truncate(HISTORY_CAPACITY);

        Ok(Self { entries })
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(HISTORY_KEY, serde_json::to_string(&self.entries)?)
    }

    pub fn record(
        &mut self,
        payload: &ClassifiedPayload,
        scanned_at: DateTime<Utc>,
    ) -> &HistoryEntry {
        self.entries.push_front(HistoryEntry::new(payload, scanned_at));
        self.entries.truncate(HISTORY_CAPACITY);

        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::{DISPLAY_LIMIT, HISTORY_KEY, HistoryEntry, ScanHistory};
    use crate::{
        classify::{Category, classify},
        store::{KeyValueStore, MemoryStore},
    };

    fn at(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 14, 12, 0, 0).unwrap() + Duration::seconds(offset)
    }

    #[test]
    fn test_keeps_ten_most_recent() {
        let mut history = ScanHistory::new();

        for i in 0..11 {
            history.record(&classify(&format!("scan {i}")), at(i));
        }

        let data: Vec<&str> = history.entries().map(|entry| entry.data.as_str()).collect();

        assert_eq!(history.len(), 10);
        assert_eq!(
            data,
            [
                "scan 10", "scan 9", "scan 8", "scan 7", "scan 6", "scan 5", "scan 4", "scan 3",
                "scan 2", "scan 1"
            ]
        );
    }

    #[test]
    fn test_entry_fields() {
        let scanned_at = at(0);
        let entry = HistoryEntry::new(&classify("tel:+593987654321"), scanned_at);

        assert_eq!(entry.id, scanned_at.timestamp_millis());
        assert_eq!(entry.category, Category::Phone);
        assert_eq!(entry.data, "tel:+593987654321");
        assert_eq!(entry.display_data, "+593987654321");
    }

    #[test]
    fn test_display_data_truncated() {
        let exact = "a".repeat(DISPLAY_LIMIT);
        let long = "ñ".repeat(DISPLAY_LIMIT + 1);

        assert_eq!(HistoryEntry::new(&classify(&exact), at(0)).display_data, exact);
        assert_eq!(
            HistoryEntry::new(&classify(&long), at(0)).display_data,
            format!("{}...", "ñ".repeat(DISPLAY_LIMIT))
        );
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut history = ScanHistory::new();
        history.record(&classify("https://utb.edu.ec"), at(0));
        history.record(&classify("WIFI:S:Home;;"), at(1));

        history.save(&mut store).unwrap();
        let loaded = ScanHistory::load(&store).unwrap();

        assert_eq!(loaded, history);
        assert_eq!(loaded.entries().next().unwrap().category, Category::Wifi);
    }

    #[test]
    fn test_stored_format() {
        let mut store = MemoryStore::new();
        let mut history = ScanHistory::new();
        history.record(&classify("hola"), at(0));
        history.save(&mut store).unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&store.get(HISTORY_KEY).unwrap().unwrap()).unwrap();

        assert_eq!(stored[0]["type"], "PLAIN_TEXT");
        assert_eq!(stored[0]["data"], "hola");
        assert_eq!(stored[0]["displayData"], "hola");
        assert_eq!(stored[0]["id"], at(0).timestamp_millis());
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let mut store = MemoryStore::new();
        assert!(ScanHistory::load(&store).unwrap().is_empty());

        store.set(HISTORY_KEY, "{broken".to_string()).unwrap();
        assert!(ScanHistory::load(&store).unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        let mut history = ScanHistory::new();
        history.record(&classify("hola"), at(0));
        history.save(&mut store).unwrap();

        history.clear();
        history.save(&mut store).unwrap();

        assert!(ScanHistory::load(&store).unwrap().is_empty());
    }
}
