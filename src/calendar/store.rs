use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::date_key::DateKey;
use super::event::EventRecord;

/// Every stored entry, keyed by day. Lists keep insertion order.
pub type EventMap = BTreeMap<DateKey, Vec<EventRecord>>;

/// Where the event map lives between sessions.
///
/// `load` never fails: a missing or unreadable blob is an empty calendar.
/// `save` always receives the complete map.
pub trait Persistence {
    fn load(&self) -> EventMap;
    fn save(&self, events: &EventMap) -> Result<()>;
    fn describe(&self) -> String;
}

// ── JSON file backend ──

/// Key-value directory where each key is one `<key>.json` file.
/// The calendar only ever uses the `events` key.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub const KEY: &'static str = "events";

    #[tracing::instrument(skip(dir))]
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}.json", Self::KEY));
        info!(file = %path.display(), "opened event file");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileBackend {
    fn load(&self) -> EventMap {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_events(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = %self.path.display(), "no event file yet");
                EventMap::new()
            }
            Err(err) => {
                warn!(file = %self.path.display(), error = %err, "unreadable event file, starting empty");
                EventMap::new()
            }
        }
    }

    fn save(&self, events: &EventMap) -> Result<()> {
        let encoded = encode_events(events)?;
        debug!(file = %self.path.display(), days = events.len(), "saving events");

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)
            .wrap_err_with(|| format!("failed to create temp file in {}", dir.display()))?;
        temp.write_all(encoded.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|err| eyre!("failed to persist {}: {}", self.path.display(), err))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ── in-memory backend ──

#[derive(Debug, Default)]
struct MemoryInner {
    events: EventMap,
    saves: usize,
}

/// Backend that keeps the map in memory. Clones share the same contents,
/// so a test can keep a handle after boxing one into a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: EventMap) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryInner { events, saves: 0 })),
        }
    }

    pub fn saves(&self) -> usize {
        self.inner.borrow().saves
    }

    pub fn snapshot(&self) -> EventMap {
        self.inner.borrow().events.clone()
    }
}

impl Persistence for MemoryBackend {
    fn load(&self) -> EventMap {
        self.inner.borrow().events.clone()
    }

    fn save(&self, events: &EventMap) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.events = events.clone();
        inner.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ── wire codec ──

/// Decode an `events.json` blob.
///
/// Anything that is not a JSON object yields an empty map. Inside the object,
/// keys that are not dates and records that fail validation are dropped one
/// by one so a single bad entry does not hide the rest.
pub fn decode_events(raw: &str) -> EventMap {
    let object: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(object) => object,
        Err(err) => {
            warn!(error = %err, "malformed event data, starting empty");
            return EventMap::new();
        }
    };

    let mut events = EventMap::new();
    for (raw_key, value) in object {
        let key: DateKey = match raw_key.parse() {
            Ok(key) => key,
            Err(err) => {
                warn!(key = %raw_key, error = %err, "dropping entries under invalid key");
                continue;
            }
        };
        let serde_json::Value::Array(items) = value else {
            warn!(key = %raw_key, "dropping non-list entry");
            continue;
        };

        let records: Vec<EventRecord> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<EventRecord>(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(key = %raw_key, error = %err, "dropping invalid record");
                    None
                }
            })
            .collect();

        if !records.is_empty() {
            // "2024-3-5" and "2024-03-05" land on the same key
            events.entry(key).or_default().extend(records);
        }
    }
    events
}

pub fn encode_events(events: &EventMap) -> Result<String> {
    serde_json::to_string_pretty(events).wrap_err("failed to encode events")
}

// ── store ──

/// The session's single source of truth for user entries.
///
/// Every mutation writes the whole map back through the backend before
/// returning.
pub struct EventStore {
    events: EventMap,
    backend: Box<dyn Persistence>,
}

impl EventStore {
    pub fn load(backend: Box<dyn Persistence>) -> Self {
        let events = backend.load();
        info!(
            backend = %backend.describe(),
            days = events.len(),
            records = events.values().map(Vec::len).sum::<usize>(),
            "loaded event store"
        );
        Self { events, backend }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryBackend::new()))
    }

    pub fn get(&self, key: &DateKey) -> &[EventRecord] {
        self.events.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &DateKey) -> bool {
        self.events.contains_key(key)
    }

    /// Number of days that have at least one entry.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[EventRecord])> {
        self.events.iter().map(|(key, records)| (key, records.as_slice()))
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }

    #[tracing::instrument(skip(self, record), fields(key = %key, text = %record.text))]
    pub fn add(&mut self, key: DateKey, record: EventRecord) -> Result<()> {
        self.events.entry(key).or_default().push(record);
        self.persist()
    }

    /// Remove the record at `index` under `key`.
    ///
    /// Returns `Ok(None)` without writing anything when there is no such
    /// record.
    #[tracing::instrument(skip(self), fields(key = %key))]
    pub fn delete(&mut self, key: DateKey, index: usize) -> Result<Option<EventRecord>> {
        let Some(records) = self.events.get_mut(&key) else {
            warn!(index, "delete on a day without entries ignored");
            return Ok(None);
        };
        if index >= records.len() {
            warn!(index, len = records.len(), "delete index out of range ignored");
            return Ok(None);
        }

        let removed = records.remove(index);
        if records.is_empty() {
            self.events.remove(&key);
        }
        self.persist()?;
        Ok(Some(removed))
    }

    fn persist(&self) -> Result<()> {
        self.backend
            .save(&self.events)
            .wrap_err_with(|| format!("failed to save events to {}", self.backend.describe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().expect("valid key")
    }

    #[test]
    fn add_appends_and_persists_every_time() {
        let backend = MemoryBackend::new();
        let mut store = EventStore::load(Box::new(backend.clone()));

        store.add(key("2024-3-5"), EventRecord::all_day("First").expect("record")).expect("add");
        store.add(key("2024-3-5"), EventRecord::timed("Second", 9).expect("record")).expect("add");

        let texts: Vec<&str> = store.get(&key("2024-3-5")).iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
        assert_eq!(backend.saves(), 2);
        assert_eq!(backend.snapshot(), *store.events());
    }

    #[test]
    fn delete_removes_exactly_the_indexed_record() {
        let backend = MemoryBackend::new();
        let mut store = EventStore::load(Box::new(backend.clone()));
        let k = key("2024-3-5");
        for text in ["a", "b", "c"] {
            store.add(k, EventRecord::all_day(text).expect("record")).expect("add");
        }

        let removed = store.delete(k, 1).expect("delete");
        assert_eq!(removed.map(|r| r.text), Some("b".to_string()));
        let texts: Vec<&str> = store.get(&k).iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn deleting_last_record_drops_the_key() {
        let mut store = EventStore::in_memory();
        let k = key("2024-3-5");
        store.add(k, EventRecord::all_day("only").expect("record")).expect("add");
        store.delete(k, 0).expect("delete");

        assert!(store.get(&k).is_empty());
        assert!(!store.contains_key(&k));
        assert!(store.is_empty());
    }

    #[test]
    fn out_of_range_delete_is_a_no_op_without_write() {
        let backend = MemoryBackend::new();
        let mut store = EventStore::load(Box::new(backend.clone()));
        let k = key("2024-3-5");
        store.add(k, EventRecord::all_day("keep").expect("record")).expect("add");

        assert_eq!(store.delete(k, 3).expect("delete"), None);
        assert_eq!(store.delete(key("2024-3-6"), 0).expect("delete"), None);
        assert_eq!(store.get(&k).len(), 1);
        assert_eq!(backend.saves(), 1);
    }

    #[test]
    fn load_reads_what_the_backend_holds() {
        let mut seeded = EventMap::new();
        seeded.insert(key("1990-2-29"), vec![EventRecord::birthday("Anna").expect("record")]);
        let backend = MemoryBackend::with_events(seeded.clone());

        let store = EventStore::load(Box::new(backend.clone()));
        assert_eq!(store.events(), &seeded);
        assert_eq!(store.len(), 1);
        assert_eq!(backend.saves(), 0);
    }

    #[test]
    fn malformed_blob_decodes_empty() {
        assert!(decode_events("not json").is_empty());
        assert!(decode_events("[1, 2]").is_empty());
        assert!(decode_events("").is_empty());
    }

    #[test]
    fn decode_skips_bad_keys_and_records() {
        let raw = r#"{
            "2024-3-5": [{"text": "ok"}, {"text": ""}, {"hour": 3}],
            "yesterday": [{"text": "lost"}],
            "2023-2-32": [{"text": "impossible"}],
            "2024-03-05": [{"text": "padded", "hour": 14}],
            "2024-1-1": "not a list"
        }"#;
        let events = decode_events(raw);

        assert_eq!(events.len(), 1);
        // keys are visited in string order, so the padded spelling merges first
        let texts: Vec<&str> = events[&key("2024-3-5")].iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["padded", "ok"]);
    }

    #[test]
    fn encode_uses_unpadded_keys() {
        let mut events = EventMap::new();
        events.insert(key("2024-03-05"), vec![EventRecord::birthday("Anna").expect("record")]);
        let encoded = encode_events(&events).expect("encode");
        assert!(encoded.contains("\"2024-3-5\""));
        assert_eq!(decode_events(&encoded), events);
    }
}
