pub mod compose;
pub mod date_key;
pub mod easter;
pub mod event;
pub mod grid;
pub mod holidays;
pub mod recurrence;
pub mod store;

pub use compose::{CellDescriptor, DayLayout, MonthLayout, WeekLayout, YearLayout};
pub use date_key::DateKey;
pub use event::{EventKind, EventRecord};
pub use holidays::{Holiday, HolidayLabels};
pub use store::{EventStore, JsonFileBackend, MemoryBackend, Persistence};
