use crate::models::DayKey;
use chrono::NaiveDateTime;
use std::collections::hash_map::{self, Entry};
use std::collections::HashMap;

/// Min/max/first/last summary of the readings seen so far for one `DayKey`.
///
/// First and last carry the timestamp that selected them, so two partials
/// for the same key can be combined by comparing timestamps instead of
/// relying on the order the partials were produced in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartialAggregate {
    pub min_temp: f32,
    pub max_temp: f32,
    pub first_temp: f32,
    pub first_ts: NaiveDateTime,
    pub last_temp: f32,
    pub last_ts: NaiveDateTime,
}

impl PartialAggregate {
    /// Summary of a single reading
    pub fn from_reading(temperature: f32, timestamp: NaiveDateTime) -> Self {
        Self {
            min_temp: temperature,
            max_temp: temperature,
            first_temp: temperature,
            first_ts: timestamp,
            last_temp: temperature,
            last_ts: timestamp,
        }
    }

    /// Fold in a reading that arrived after everything already summarised.
    ///
    /// An equal timestamp keeps the existing first and replaces the last, so
    /// for time-ordered input first/last are the earliest and latest arrivals.
    pub fn absorb(&mut self, temperature: f32, timestamp: NaiveDateTime) {
        self.min_temp = self.min_temp.min(temperature);
        self.max_temp = self.max_temp.max(temperature);

        if timestamp < self.first_ts {
            self.first_temp = temperature;
            self.first_ts = timestamp;
        }

        if timestamp >= self.last_ts {
            self.last_temp = temperature;
            self.last_ts = timestamp;
        }
    }

    /// Combine with a partial built from input that arrived later.
    ///
    /// Ties on `first_ts` keep `self`, ties on `last_ts` take `later`, which
    /// matches what `absorb` would have produced over the concatenated input.
    pub fn combine(&mut self, later: &PartialAggregate) {
        self.min_temp = self.min_temp.min(later.min_temp);
        self.max_temp = self.max_temp.max(later.max_temp);

        if later.first_ts < self.first_ts {
            self.first_temp = later.first_temp;
            self.first_ts = later.first_ts;
        }

        if later.last_ts >= self.last_ts {
            self.last_temp = later.last_temp;
            self.last_ts = later.last_ts;
        }
    }
}

/// Table of partial aggregates keyed by station and day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    entries: HashMap<DayKey, PartialAggregate>,
}

impl AggregateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &DayKey) -> Option<&PartialAggregate> {
        self.entries.get(key)
    }

    /// Add one reading to the summary for `key`
    pub fn record_reading(&mut self, key: DayKey, temperature: f32, timestamp: NaiveDateTime) {
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().absorb(temperature, timestamp),
            Entry::Vacant(entry) => {
                entry.insert(PartialAggregate::from_reading(temperature, timestamp));
            }
        }
    }

    /// Insert `aggregate` for `key`, combining with an existing entry.
    ///
    /// Returns `true` when the key was already present.
    pub fn upsert(&mut self, key: DayKey, aggregate: PartialAggregate) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().combine(&aggregate);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(aggregate);
                false
            }
        }
    }

    /// Consume the table, yielding entries in `DayKey` order
    pub fn into_sorted(self) -> Vec<(DayKey, PartialAggregate)> {
        let mut entries: Vec<_> = self.entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl IntoIterator for AggregateTable {
    type Item = (DayKey, PartialAggregate);
    type IntoIter = hash_map::IntoIter<DayKey, PartialAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(DayKey, PartialAggregate)> for AggregateTable {
    fn from_iter<I: IntoIterator<Item = (DayKey, PartialAggregate)>>(iter: I) -> Self {
        let mut table = AggregateTable::new();
        for (key, aggregate) in iter {
            table.upsert(key, aggregate);
        }
        table
    }
}
