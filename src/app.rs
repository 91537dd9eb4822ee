use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::calendar::compose::{
    compose_day_view, compose_month_view, compose_week_view, compose_year_view,
};
use crate::calendar::grid::days_in_month;
use crate::calendar::recurrence::birthdays_on;
use crate::calendar::{
    DateKey, DayLayout, EventRecord, EventStore, HolidayLabels, MonthLayout, WeekLayout,
    YearLayout,
};
use crate::components::event_form::EventFormState;
use crate::components::event_list::EventListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    Month,
    Year,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Year => "Year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EventList,
    Form,
}

/// One interactive session: what is shown, where the user is, and the
/// event store every view reads from.
pub struct App {
    pub running: bool,
    pub view_mode: ViewMode,
    /// Navigation reference; also the highlighted day.
    pub current_date: NaiveDate,
    pub today: NaiveDate,
    pub input_mode: InputMode,
    /// Highlighted hour in the day view; new entries created there use it.
    pub selected_hour: u8,
    pub event_list: Option<EventListState>,
    pub form_state: Option<EventFormState>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub holiday_labels: HolidayLabels,
    store: EventStore,
}

impl App {
    pub fn new(store: EventStore, view_mode: ViewMode, today: NaiveDate, holiday_labels: HolidayLabels) -> Self {
        Self {
            running: true,
            view_mode,
            current_date: today,
            today,
            input_mode: InputMode::Normal,
            selected_hour: 9,
            event_list: None,
            form_state: None,
            status_message: None,
            show_help: false,
            holiday_labels,
            store,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    // ── navigation ──

    pub fn set_view(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            info!(from = self.view_mode.label(), to = mode.label(), "view changed");
        }
        self.view_mode = mode;
    }

    pub fn go_to_previous(&mut self) {
        self.current_date = shift_by_view(self.current_date, self.view_mode, -1);
        debug!(date = %self.current_date, "previous");
    }

    pub fn go_to_next(&mut self) {
        self.current_date = shift_by_view(self.current_date, self.view_mode, 1);
        debug!(date = %self.current_date, "next");
    }

    /// Jump to today and show the month.
    pub fn go_to_today(&mut self) {
        self.current_date = self.today;
        self.set_view(ViewMode::Month);
    }

    pub fn select_next_day(&mut self) {
        self.current_date = add_days(self.current_date, 1);
    }

    pub fn select_prev_day(&mut self) {
        self.current_date = add_days(self.current_date, -1);
    }

    pub fn select_next_hour(&mut self) {
        self.selected_hour = (self.selected_hour + 1).min(23);
    }

    pub fn select_prev_hour(&mut self) {
        self.selected_hour = self.selected_hour.saturating_sub(1);
    }

    /// Called periodically with the wall-clock date. Returns whether the day
    /// changed. A selection sitting on the old today follows it.
    pub fn check_day_rollover(&mut self, now: NaiveDate) -> bool {
        if now == self.today {
            return false;
        }
        info!(from = %self.today, to = %now, "day rolled over");
        if self.current_date == self.today {
            self.current_date = now;
        }
        self.today = now;
        true
    }

    // ── composed views ──

    pub fn month_layout(&self) -> MonthLayout {
        compose_month_view(
            self.current_date.year(),
            self.current_date.month(),
            self.today,
            &self.store,
        )
    }

    pub fn week_layout(&self) -> WeekLayout {
        compose_week_view(self.current_date, self.today, &self.store)
    }

    pub fn day_layout(&self) -> DayLayout {
        compose_day_view(self.current_date, self.today, &self.store)
    }

    pub fn year_layout(&self) -> YearLayout {
        compose_year_view(self.current_date.year(), self.today, &self.store)
    }

    /// Header text for the active view.
    pub fn title(&self) -> (String, Option<String>) {
        match self.view_mode {
            ViewMode::Year => (self.current_date.year().to_string(), None),
            ViewMode::Month | ViewMode::Week => (self.current_date.format("%B %Y").to_string(), None),
            ViewMode::Day => (
                self.current_date.format("%B %Y").to_string(),
                Some(self.current_date.format("%a, %-d %b").to_string()),
            ),
        }
    }

    // ── event list ──

    pub fn open_event_list(&mut self) {
        self.event_list = Some(EventListState::new(self.current_date));
        self.input_mode = InputMode::EventList;
    }

    pub fn close_event_list(&mut self) {
        self.event_list = None;
        self.input_mode = InputMode::Normal;
    }

    /// Stored entries of the day the list is open for.
    pub fn list_records(&self) -> &[EventRecord] {
        match &self.event_list {
            Some(list) => self.store.get(&DateKey::from(list.date)),
            None => &[],
        }
    }

    /// Yearly entries that land on the list's day but are stored elsewhere.
    pub fn list_foreign_birthdays(&self) -> Vec<EventRecord> {
        let Some(list) = &self.event_list else {
            return Vec::new();
        };
        let own = self.store.get(&DateKey::from(list.date));
        birthdays_on(&self.store, list.date.year(), list.date.month(), list.date.day())
            .into_iter()
            .filter(|b| !own.iter().any(|r| r.normalized_text() == b.normalized_text()))
            .collect()
    }

    pub fn list_next(&mut self) {
        let len = self.list_records().len();
        if let Some(list) = &mut self.event_list {
            list.select_next(len);
        }
    }

    pub fn list_prev(&mut self) {
        if let Some(list) = &mut self.event_list {
            list.select_prev();
        }
    }

    pub fn delete_selected_event(&mut self) {
        let Some(list) = &self.event_list else {
            return;
        };
        let key = DateKey::from(list.date);
        let index = list.selected;

        match self.store.delete(key, index) {
            Ok(Some(removed)) => {
                self.status_message = Some(format!("Deleted \"{}\"", removed.text));
            }
            Ok(None) => {
                self.status_message = Some("Nothing to delete".to_string());
            }
            Err(err) => {
                error!(error = ?err, "delete failed to save");
                self.status_message = Some(format!("Save failed: {err}"));
            }
        }

        let len = self.list_records().len();
        if let Some(list) = &mut self.event_list {
            list.clamp(len);
        }
    }

    // ── event form ──

    /// Open the form for the highlighted day. The day view pre-fills its
    /// highlighted hour.
    pub fn open_event_form(&mut self) {
        let hour = (self.view_mode == ViewMode::Day).then_some(self.selected_hour);
        let date = self
            .event_list
            .as_ref()
            .map(|list| list.date)
            .unwrap_or(self.current_date);
        self.form_state = Some(EventFormState::new(date, hour));
        self.input_mode = InputMode::Form;
    }

    pub fn close_event_form(&mut self) {
        self.form_state = None;
        self.input_mode = if self.event_list.is_some() {
            InputMode::EventList
        } else {
            InputMode::Normal
        };
    }

    pub fn submit_event_form(&mut self) {
        let Some(form) = &self.form_state else {
            return;
        };
        let key = DateKey::from(form.date);

        let record = match form.to_record() {
            Ok(record) => record,
            Err(err) => {
                // keep the form open so the input can be fixed
                self.status_message = Some(err.to_string());
                return;
            }
        };

        let text = record.text.clone();
        match self.store.add(key, record) {
            Ok(()) => self.status_message = Some(format!("Added \"{text}\"")),
            Err(err) => {
                error!(error = ?err, "add failed to save");
                self.status_message = Some(format!("Save failed: {err}"));
            }
        }
        self.close_event_form();
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(form) = &mut self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.form_state {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(form) = &mut self.form_state {
            form.active_field = form.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(form) = &mut self.form_state {
            form.active_field = form.active_field.prev();
        }
    }

    pub fn form_toggle(&mut self) {
        if let Some(form) = &mut self.form_state {
            form.toggle_or_space();
        }
    }
}

/// Move `date` one step of `view` forward (`step > 0`) or back.
pub fn shift_by_view(date: NaiveDate, view: ViewMode, step: i32) -> NaiveDate {
    match view {
        ViewMode::Day => add_days(date, i64::from(step)),
        ViewMode::Week => add_days(date, i64::from(step) * 7),
        ViewMode::Month => shift_months(date, step),
        ViewMode::Year => shift_years(date, step),
    }
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Day of month is clamped: Jan 31 + 1 month is the last day of February.
fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year().saturating_add(years);
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}
