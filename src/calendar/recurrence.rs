use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use super::date_key::DateKey;
use super::event::EventRecord;
use super::store::EventStore;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Yearly entries that fall on `month`/`day` of `year`.
///
/// Entries stored on Feb 29 show up on Feb 28 when `year` is not a leap
/// year. Entries whose text matches case-insensitively after trimming are
/// reported once; the earliest origin key wins.
pub fn birthdays_on(store: &EventStore, year: i32, month: u32, day: u32) -> Vec<EventRecord> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for (key, records) in store.iter() {
        if effective_month_day(*key, year) != (month, day) {
            continue;
        }
        for record in records.iter().filter(|r| r.is_recurring()) {
            if seen.insert(record.normalized_text()) {
                matches.push(record.clone());
            }
        }
    }

    matches
}

fn effective_month_day(origin: DateKey, year: i32) -> (u32, u32) {
    match (origin.month(), origin.day()) {
        (2, 29) if !is_leap_year(year) => (2, 28),
        other => other,
    }
}

/// Everything shown on one day, split by how it is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayEvents {
    /// Non-recurring entries stored under this exact day, in insertion order.
    pub normal: Vec<EventRecord>,
    /// Yearly entries landing on this day.
    pub recurring: Vec<EventRecord>,
}

impl DayEvents {
    pub fn is_empty(&self) -> bool {
        self.normal.is_empty() && self.recurring.is_empty()
    }
}

/// Direct entries of `date` plus the yearly ones that fall on it. A yearly
/// entry whose text repeats a direct entry of the same day is left out.
pub fn events_on(store: &EventStore, date: NaiveDate) -> DayEvents {
    let normal: Vec<EventRecord> = store
        .get(&DateKey::from(date))
        .iter()
        .filter(|r| !r.is_recurring())
        .cloned()
        .collect();

    let direct: HashSet<String> = normal.iter().map(EventRecord::normalized_text).collect();
    let recurring = birthdays_on(store, date.year(), date.month(), date.day())
        .into_iter()
        .filter(|r| !direct.contains(&r.normalized_text()))
        .collect();

    DayEvents { normal, recurring }
}
