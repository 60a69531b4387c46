//! In-memory emotion log store.
//!
//! The store is the single owner of every [`LogEntry`] for the lifetime of the
//! process. It is a plain value: the application constructs one and hands out
//! `&`/`&mut` references. It has no interior locking, so a multi-threaded host
//! has to wrap it (e.g. `Arc<Mutex<EmotionLogStore>>`).
//!
//! Entries are kept newest first. "Calendar day" is evaluated in the store's
//! time zone, which defaults to the local one.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::emotion::Emotion;
use crate::log::{EntryId, LogEntry};
use crate::summary::DailySummary;

/// Per-emotion counts for one day. Always holds every [`Emotion`].
pub type EmotionCounts = BTreeMap<Emotion, usize>;

#[derive(Debug, Clone)]
pub struct EmotionLogStore<Tz: TimeZone = Local> {
    /// Newest first; equal timestamps keep insertion order.
    entries: Vec<LogEntry>,
    next_id: u64,
    tz: Tz,
}

impl EmotionLogStore<Local> {
    /// Empty store using the local calendar.
    pub fn new() -> Self {
        Self::with_timezone(Local)
    }
}

impl Default for EmotionLogStore<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> EmotionLogStore<Tz> {
    /// Empty store whose calendar days are evaluated in `tz`.
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            tz,
        }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Log `emotion` at `timestamp` (now when `None`) and return the new entry.
    pub fn append(&mut self, emotion: Emotion, timestamp: Option<DateTime<Utc>>) -> LogEntry {
        let timestamp = timestamp.unwrap_or_else(Utc::now);
        let id = EntryId(self.next_id);
        self.next_id += 1;

        let entry = LogEntry::new(id, emotion, timestamp);
        // After every entry at the same instant, so ties stay in insertion order.
        let pos = self
            .entries
            .partition_point(|e| e.timestamp() >= timestamp);
        self.entries.insert(pos, entry.clone());

        tracing::debug!(id = %id, emotion = %emotion, %timestamp, "appended log entry");
        entry
    }

    /// Snapshot of every entry, newest first.
    pub fn all(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Calendar day of `instant` in the store's time zone.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Entries falling on `day`, newest first.
    pub fn for_day(&self, day: NaiveDate) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| self.day_of(e.timestamp()) == day)
            .cloned()
            .collect()
    }

    /// Entries on the same calendar day as `instant`.
    pub fn for_day_containing(&self, instant: DateTime<Utc>) -> Vec<LogEntry> {
        self.for_day(self.day_of(instant))
    }

    pub fn total_for_day(&self, day: NaiveDate) -> usize {
        self.entries
            .iter()
            .filter(|e| self.day_of(e.timestamp()) == day)
            .count()
    }

    /// Count of each emotion logged on `day`, zero counts included.
    pub fn summarize(&self, day: NaiveDate) -> EmotionCounts {
        let mut counts: EmotionCounts = Emotion::ALL.iter().map(|e| (*e, 0)).collect();
        for entry in self
            .entries
            .iter()
            .filter(|e| self.day_of(e.timestamp()) == day)
        {
            *counts.entry(entry.emotion()).or_insert(0) += 1;
        }
        counts
    }

    /// Ranked summary rows for `day`.
    pub fn daily_summary(&self, day: NaiveDate) -> DailySummary {
        DailySummary::from_counts(day, &self.summarize(day))
    }

    /// Distinct days that have at least one entry, newest first.
    pub fn unique_days(&self) -> Vec<NaiveDate> {
        let days: BTreeSet<NaiveDate> = self
            .entries
            .iter()
            .map(|e| self.day_of(e.timestamp()))
            .collect();
        days.into_iter().rev().collect()
    }

    /// Remove an entry equal to `entry`. Returns whether one was removed.
    ///
    /// Entries compare by value. Ids restart at 1 in every store, so an entry
    /// taken from another store with the same id, emotion and timestamp counts
    /// as equal and removes the matching entry here.
    pub fn remove(&mut self, entry: &LogEntry) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(pos) => {
                self.entries.remove(pos);
                tracing::debug!(id = %entry.id(), "removed log entry");
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: EntryId) -> Option<LogEntry> {
        let pos = self.entries.iter().position(|e| e.id() == id)?;
        let removed = self.entries.remove(pos);
        tracing::debug!(%id, "removed log entry");
        Some(removed)
    }

    pub fn clear(&mut self) {
        tracing::debug!(count = self.entries.len(), "clearing log store");
        self.entries.clear();
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
