//! Turns grids, holidays and stored entries into what the views draw.
//!
//! Everything here is pure: the same inputs always produce the same layout
//! and nothing touches the store beyond reading it.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::event::EventRecord;
use super::grid::{month_grid, week_dates, MonthGrid};
use super::holidays::{holiday_on, Holiday};
use super::recurrence::events_on;
use super::store::EventStore;

/// How the day number itself is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    Plain,
    Today,
    Holiday,
}

/// Dots under the day number. Each is shown at most once per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicators {
    pub holiday: bool,
    pub event: bool,
    pub birthday: bool,
}

impl Indicators {
    pub fn any(&self) -> bool {
        self.holiday || self.event || self.birthday
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDescriptor {
    /// `None` for padding cells.
    pub date: Option<NaiveDate>,
    pub is_today: bool,
    pub is_weekend: bool,
    pub holiday: Option<Holiday>,
    pub normal_events: Vec<EventRecord>,
    pub recurring_events: Vec<EventRecord>,
    pub number_style: NumberStyle,
    pub indicators: Indicators,
}

impl CellDescriptor {
    pub fn blank() -> Self {
        Self {
            date: None,
            is_today: false,
            is_weekend: false,
            holiday: None,
            normal_events: Vec::new(),
            recurring_events: Vec::new(),
            number_style: NumberStyle::Plain,
            indicators: Indicators::default(),
        }
    }

    pub fn for_date(date: NaiveDate, today: NaiveDate, store: &EventStore) -> Self {
        let is_today = date == today;
        let holiday = holiday_on(date);
        let events = events_on(store, date);

        // A holiday that is also today keeps the today highlight and gets a
        // dot instead; otherwise the number itself carries the holiday style.
        let number_style = match (is_today, holiday.is_some()) {
            (true, _) => NumberStyle::Today,
            (false, true) => NumberStyle::Holiday,
            (false, false) => NumberStyle::Plain,
        };
        let indicators = Indicators {
            holiday: is_today && holiday.is_some(),
            event: !events.normal.is_empty(),
            birthday: !events.recurring.is_empty(),
        };

        Self {
            date: Some(date),
            is_today,
            is_weekend: date.weekday().number_from_monday() >= 6,
            holiday,
            normal_events: events.normal,
            recurring_events: events.recurring,
            number_style,
            indicators,
        }
    }

    pub fn day_number(&self) -> Option<u32> {
        self.date.map(|d| d.day())
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }

    /// Entries shown without a time: plain all-day ones, then yearly ones.
    pub fn all_day_events(&self) -> impl Iterator<Item = &EventRecord> {
        self.normal_events
            .iter()
            .filter(|r| r.hour().is_none())
            .chain(self.recurring_events.iter())
    }

    pub fn timed_events(&self) -> impl Iterator<Item = &EventRecord> {
        self.normal_events.iter().filter(|r| r.hour().is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub subtitle: Option<String>,
    /// Row-major, Monday first, padded to whole weeks.
    pub cells: Vec<CellDescriptor>,
}

impl MonthLayout {
    pub fn weeks(&self) -> impl Iterator<Item = &[CellDescriptor]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CellDescriptor> {
        self.cells.iter().find(|c| c.date == Some(date))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekLayout {
    pub title: String,
    pub subtitle: Option<String>,
    pub cells: Vec<CellDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: u8,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout {
    pub title: String,
    pub subtitle: Option<String>,
    pub cell: CellDescriptor,
    /// All 24 hours, in order, each with the timed entries placed in it.
    pub hours: Vec<HourSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearLayout {
    pub year: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub months: Vec<MonthLayout>,
}

pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

fn compose_grid(grid: &MonthGrid, today: NaiveDate, store: &EventStore) -> Vec<CellDescriptor> {
    grid.cells
        .iter()
        .map(|cell| match cell {
            Some(date) => CellDescriptor::for_date(*date, today, store),
            None => CellDescriptor::blank(),
        })
        .collect()
}

pub fn compose_month_view(year: i32, month: u32, today: NaiveDate, store: &EventStore) -> MonthLayout {
    let grid = month_grid(year, month);
    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(month_title)
        .unwrap_or_default();
    debug!(year, month, cells = grid.cells.len(), "composed month view");

    MonthLayout {
        year,
        month,
        title,
        subtitle: None,
        cells: compose_grid(&grid, today, store),
    }
}

pub fn compose_week_view(reference: NaiveDate, today: NaiveDate, store: &EventStore) -> WeekLayout {
    WeekLayout {
        title: month_title(reference),
        subtitle: None,
        cells: week_dates(reference)
            .iter()
            .map(|date| CellDescriptor::for_date(*date, today, store))
            .collect(),
    }
}

pub fn compose_day_view(date: NaiveDate, today: NaiveDate, store: &EventStore) -> DayLayout {
    let cell = CellDescriptor::for_date(date, today, store);
    let hours = (0..24u8)
        .map(|hour| HourSlot {
            hour,
            events: cell
                .timed_events()
                .filter(|r| r.hour() == Some(hour))
                .cloned()
                .collect(),
        })
        .collect();

    DayLayout {
        title: month_title(date),
        subtitle: Some(date.format("%a, %-d %b").to_string()),
        cell,
        hours,
    }
}

pub fn compose_year_view(year: i32, today: NaiveDate, store: &EventStore) -> YearLayout {
    YearLayout {
        year,
        title: year.to_string(),
        subtitle: None,
        months: (1..=12)
            .map(|month| compose_month_view(year, month, today, store))
            .collect(),
    }
}
