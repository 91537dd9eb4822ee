use chrono::NaiveDate;

use kalender_tui::app::{App, ViewMode};
use kalender_tui::calendar::compose::{compose_month_view, NumberStyle};
use kalender_tui::calendar::easter::compute_easter;
use kalender_tui::calendar::holidays::{holiday_on, holidays_for_year};
use kalender_tui::calendar::recurrence::{birthdays_on, events_on};
use kalender_tui::calendar::{
    DateKey, EventRecord, EventStore, HolidayLabels, JsonFileBackend, MemoryBackend,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn key(y: i32, m: u32, d: u32) -> DateKey {
    DateKey::new(y, m, d).expect("valid key")
}

fn texts(records: &[EventRecord]) -> Vec<&str> {
    records.iter().map(|r| r.text.as_str()).collect()
}

#[test]
fn leap_day_birthday_moves_to_feb_28_in_common_years() {
    let mut store = EventStore::in_memory();
    store
        .add(key(1992, 2, 29), EventRecord::birthday("Anna").expect("record"))
        .expect("add");

    assert_eq!(texts(&birthdays_on(&store, 2023, 2, 28)), ["Anna"]);
    assert_eq!(texts(&birthdays_on(&store, 2024, 2, 29)), ["Anna"]);
    assert!(birthdays_on(&store, 2024, 2, 28).is_empty());
    assert!(birthdays_on(&store, 2023, 3, 1).is_empty());
}

#[test]
fn birthday_stored_under_a_day_that_never_existed() {
    let mut store = EventStore::in_memory();
    let origin: DateKey = "1990-2-29".parse().expect("in range");
    store
        .add(origin, EventRecord::birthday("Birthday Anna").expect("record"))
        .expect("add");

    assert_eq!(texts(&birthdays_on(&store, 2023, 2, 28)), ["Birthday Anna"]);
    assert_eq!(texts(&birthdays_on(&store, 2024, 2, 29)), ["Birthday Anna"]);
    assert!(birthdays_on(&store, 2024, 2, 28).is_empty());
}

#[test]
fn same_name_under_two_days_shows_once() {
    let mut store = EventStore::in_memory();
    store
        .add(key(1980, 5, 4), EventRecord::birthday("Max").expect("record"))
        .expect("add");
    store
        .add(key(2001, 5, 4), EventRecord::birthday(" MAX ").expect("record"))
        .expect("add");

    assert_eq!(birthdays_on(&store, 2025, 5, 4).len(), 1);
}

#[test]
fn direct_entry_hides_matching_birthday() {
    let mut store = EventStore::in_memory();
    store
        .add(key(1970, 9, 1), EventRecord::birthday("Lena").expect("record"))
        .expect("add");
    store
        .add(key(2025, 9, 1), EventRecord::timed("lena", 18).expect("record"))
        .expect("add");

    let day = events_on(&store, date(2025, 9, 1));
    assert_eq!(texts(&day.normal), ["lena"]);
    assert!(day.recurring.is_empty());

    let next_year = events_on(&store, date(2026, 9, 1));
    assert!(next_year.normal.is_empty());
    assert_eq!(texts(&next_year.recurring), ["Lena"]);
}

#[test]
fn holidays_of_2025() {
    let holidays = holidays_for_year(2025);
    assert_eq!(holidays.len(), 9);
    assert!(holidays.iter().any(|h| h.date == key(2025, 4, 21)));
    assert_eq!(compute_easter(2025), (4, 20));

    let whit = holiday_on(date(2025, 6, 9)).expect("whit monday");
    assert_eq!(whit.label(HolidayLabels::English), "Whit Monday");
    assert_eq!(whit.label(HolidayLabels::German), "Pfingstmontag");
    assert!(holiday_on(date(2025, 6, 10)).is_none());
}

#[test]
fn october_2024_month_grid() {
    let mut store = EventStore::in_memory();
    store
        .add(key(2024, 10, 15), EventRecord::all_day("Review").expect("record"))
        .expect("add");
    let layout = compose_month_view(2024, 10, date(2024, 10, 10), &store);

    assert_eq!(layout.title, "October 2024");
    // Oct 1 2024 is a Tuesday: one blank before it.
    assert!(layout.cells[0].is_blank());
    assert_eq!(layout.cells[1].day_number(), Some(1));
    assert_eq!(layout.cells.len() % 7, 0);

    let unity = layout.cell(date(2024, 10, 3)).expect("cell");
    assert_eq!(unity.number_style, NumberStyle::Holiday);
    assert!(!unity.indicators.holiday);

    let today = layout.cell(date(2024, 10, 10)).expect("cell");
    assert_eq!(today.number_style, NumberStyle::Today);

    let review = layout.cell(date(2024, 10, 15)).expect("cell");
    assert!(review.indicators.event);
    assert!(!review.indicators.birthday);
}

#[test]
fn app_adds_and_deletes_through_the_file_backend() {
    let dir = tempfile::tempdir().expect("tempdir");
    let backend = JsonFileBackend::open(dir.path()).expect("open");
    let store = EventStore::load(Box::new(backend));
    let mut app = App::new(store, ViewMode::Day, date(2025, 3, 14), HolidayLabels::English);

    app.open_event_form();
    for c in "Dentist".chars() {
        app.form_input_char(c);
    }
    app.submit_event_form();
    assert_eq!(app.status_message.as_deref(), Some("Added \"Dentist\""));

    let reopened = EventStore::load(Box::new(JsonFileBackend::open(dir.path()).expect("open")));
    let stored = reopened.get(&key(2025, 3, 14));
    assert_eq!(texts(stored), ["Dentist"]);
    assert_eq!(stored[0].hour(), Some(9));

    app.open_event_list();
    app.delete_selected_event();
    let reopened = EventStore::load(Box::new(JsonFileBackend::open(dir.path()).expect("open")));
    assert!(reopened.is_empty());
}

#[test]
fn memory_backend_counts_every_write() {
    let backend = MemoryBackend::new();
    let mut store = EventStore::load(Box::new(backend.clone()));

    store
        .add(key(2025, 1, 1), EventRecord::all_day("A").expect("record"))
        .expect("add");
    store
        .add(key(2025, 1, 1), EventRecord::all_day("B").expect("record"))
        .expect("add");
    assert_eq!(store.delete(key(2025, 1, 1), 5).expect("delete"), None);
    store.delete(key(2025, 1, 1), 0).expect("delete");

    assert_eq!(backend.saves(), 3);
    assert_eq!(texts(&backend.snapshot()[&key(2025, 1, 1)]), ["B"]);
}
