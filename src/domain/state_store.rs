//! Process-local state for short URL records.
//!
//! Each short code owns one [`LocalEntry`] holding its URL, click counter and
//! creation time, so all three become visible together. A single
//! [`parking_lot::RwLock`] guards the whole map: lookups take the shared lock,
//! inserts and increments take the exclusive lock.
//!
//! None of the methods are `async`. The lock can therefore never be held across
//! an outbound call, and a cancelled request cannot leave an entry half written.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::entities::{UrlRecord, UrlStats};

/// Local state for a single short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

/// In-process record set. Entries are only ever added, never removed or replaced.
#[derive(Debug, Default)]
pub struct StateStore {
    entries: RwLock<HashMap<String, LocalEntry>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record with a zero click counter.
    ///
    /// The existence check and the insert happen under one exclusive lock.
    /// Returns `false`, leaving the existing entry untouched, if the code is taken.
    pub fn insert_new(&self, record: UrlRecord) -> bool {
        let mut entries = self.entries.write();

        match entries.entry(record.short_code) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(LocalEntry {
                    original_url: record.original_url,
                    click_count: 0,
                    created_at: record.created_at,
                });
                true
            }
        }
    }

    /// Copies a record fetched from the durable store into local state.
    ///
    /// If another task inserted the code first, that entry wins. Returns the URL
    /// now held locally.
    pub fn materialize(&self, record: UrlRecord) -> String {
        let mut entries = self.entries.write();

        entries
            .entry(record.short_code)
            .or_insert_with(|| LocalEntry {
                original_url: record.original_url,
                click_count: 0,
                created_at: record.created_at,
            })
            .original_url
            .clone()
    }

    pub fn get_url(&self, short_code: &str) -> Option<String> {
        self.entries
            .read()
            .get(short_code)
            .map(|entry| entry.original_url.clone())
    }

    /// Increments the click counter and returns the new value.
    ///
    /// Returns `None` for unknown codes; a counter is never created without its URL.
    pub fn increment(&self, short_code: &str) -> Option<i64> {
        let mut entries = self.entries.write();

        entries.get_mut(short_code).map(|entry| {
            entry.click_count += 1;
            entry.click_count
        })
    }

    pub fn stats(&self, short_code: &str) -> Option<UrlStats> {
        self.entries.read().get(short_code).map(|entry| UrlStats {
            short_code: short_code.to_string(),
            click_count: entry.click_count,
            created_at: entry.created_at,
        })
    }

    pub fn contains(&self, short_code: &str) -> bool {
        self.entries.read().contains_key(short_code)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
