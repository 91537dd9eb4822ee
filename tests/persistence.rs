use std::fs;

use kalender_tui::calendar::store::decode_events;
use kalender_tui::calendar::{DateKey, EventKind, EventRecord, EventStore, JsonFileBackend};

fn key(s: &str) -> DateKey {
    s.parse().expect("valid key")
}

fn open_store(dir: &std::path::Path) -> EventStore {
    EventStore::load(Box::new(JsonFileBackend::open(dir).expect("open backend")))
}

#[test]
fn entries_survive_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut store = open_store(dir.path());
    store
        .add(key("2024-10-3"), EventRecord::timed("Dentist", 14).expect("record"))
        .expect("add");
    store
        .add(key("1990-2-29"), EventRecord::birthday("Anna").expect("record"))
        .expect("add");
    store
        .add(key("2024-10-3"), EventRecord::all_day("Day off").expect("record"))
        .expect("add");
    drop(store);

    let store = open_store(dir.path());
    let oct3 = store.get(&key("2024-10-3"));
    assert_eq!(oct3.len(), 2);
    assert_eq!(oct3[0].text, "Dentist");
    assert_eq!(oct3[0].kind, EventKind::Timed { hour: 14 });
    assert_eq!(oct3[1].kind, EventKind::AllDay);
    assert!(store.get(&key("1990-2-29"))[0].is_recurring());
}

#[test]
fn file_uses_unpadded_keys_and_wire_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = open_store(dir.path());
    store
        .add(key("2024-3-5"), EventRecord::timed("Standup", 9).expect("record"))
        .expect("add");
    store
        .add(key("1990-7-1"), EventRecord::birthday("Max").expect("record"))
        .expect("add");

    let raw = fs::read_to_string(dir.path().join("events.json")).expect("read file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");

    assert_eq!(value["2024-3-5"][0]["text"], "Standup");
    assert_eq!(value["2024-3-5"][0]["hour"], 9);
    assert!(value["2024-3-5"][0].get("birthday").is_none());
    assert_eq!(value["1990-7-1"][0]["birthday"], true);
    assert!(value.get("2024-03-05").is_none());
}

#[test]
fn deleting_last_entry_removes_the_day_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = open_store(dir.path());
    store
        .add(key("2025-1-9"), EventRecord::all_day("Only").expect("record"))
        .expect("add");
    let removed = store.delete(key("2025-1-9"), 0).expect("delete");
    assert_eq!(removed.map(|r| r.text), Some("Only".to_string()));

    let reopened = open_store(dir.path());
    assert!(!reopened.contains_key(&key("2025-1-9")));
    assert!(reopened.is_empty());
}

#[test]
fn malformed_file_loads_as_empty_calendar() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("events.json"), "{ not json").expect("write");

    let store = open_store(dir.path());
    assert!(store.is_empty());
}

#[test]
fn missing_file_loads_as_empty_calendar() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(dir.path());
    assert!(store.is_empty());
    assert!(!dir.path().join("events.json").exists());
}

#[test]
fn older_yearly_markers_are_read() {
    let raw = r#"{
        "1985-6-12": [{"text": "Oma", "repeat": "yearly"}],
        "1992-8-30": [{"text": "Paul", "isRecurringYearly": true, "hour": 10}],
        "2024-1-2": [{"text": "Plain"}]
    }"#;
    let events = decode_events(raw);

    assert!(events[&key("1985-6-12")][0].is_recurring());
    let paul = &events[&key("1992-8-30")][0];
    assert!(paul.is_recurring());
    assert_eq!(paul.hour(), None);
    assert_eq!(events[&key("2024-1-2")][0].kind, EventKind::AllDay);
}

#[test]
fn leap_day_key_of_common_year_is_kept() {
    let raw = r#"{"1990-2-29": [{"text": "Birthday Anna", "isRecurringYearly": true}]}"#;
    let events = decode_events(raw);
    let anna = &events[&key("1990-2-29")];
    assert_eq!(anna[0].text, "Birthday Anna");
    assert!(anna[0].is_recurring());
}

#[test]
fn bad_records_are_dropped_but_good_ones_kept() {
    let raw = r#"{
        "2024-13-40": [{"text": "bad key"}],
        "2024-5-5": [{"text": "   "}, {"text": "ok", "hour": 7}, {"text": "late", "hour": 31}]
    }"#;
    let events = decode_events(raw);

    assert_eq!(events.len(), 1);
    let may5 = &events[&key("2024-5-5")];
    assert_eq!(may5.len(), 1);
    assert_eq!(may5[0].text, "ok");
}
