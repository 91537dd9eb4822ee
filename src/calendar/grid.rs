//! Grid arithmetic for the month, week and year layouts.
//!
//! Weeks start on Monday: column 0 is Monday, column 6 is Sunday. Months are
//! 1-based throughout, matching chrono.

use chrono::{Datelike, Days, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Column of `date` in a Monday-first week.
pub fn monday_index(date: NaiveDate) -> usize {
    (date.weekday().num_days_from_sunday() as usize + 6) % 7
}

/// Length of `month`, taken from the last day before the next month starts.
/// Zero for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year.saturating_add(1), 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (NaiveDate::from_ymd_opt(year, month, 1), next_first) {
        (Some(_), Some(next)) => next.pred_opt().map(|d| d.day()).unwrap_or(0),
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Row-major cells, `None` for padding. Length is a multiple of 7.
    pub cells: Vec<Option<NaiveDate>>,
}

impl MonthGrid {
    pub fn rows(&self) -> usize {
        self.cells.len() / 7
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[Option<NaiveDate>]> {
        self.cells.chunks(7)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }
}

pub fn month_grid(year: i32, month: u32) -> MonthGrid {
    let mut cells = Vec::with_capacity(42);

    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        let lead = monday_index(first);
        let len = days_in_month(year, month);

        cells.extend(std::iter::repeat(None).take(lead));
        cells.extend((1..=len).map(|day| NaiveDate::from_ymd_opt(year, month, day)));

        let trail = (7 - cells.len() % 7) % 7;
        cells.extend(std::iter::repeat(None).take(trail));
    }

    MonthGrid { year, month, cells }
}

/// Monday of the week containing `reference`.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference
        .checked_sub_days(Days::new(monday_index(reference) as u64))
        .unwrap_or(reference)
}

/// The seven days Monday..Sunday of `reference`'s week.
pub fn week_dates(reference: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(reference);
    std::array::from_fn(|i| start.checked_add_days(Days::new(i as u64)).unwrap_or(start))
}

pub fn year_grid(year: i32) -> Vec<MonthGrid> {
    (1..=12).map(|month| month_grid(year, month)).collect()
}
