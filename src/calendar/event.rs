use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an entry is placed on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    AllDay,
    Timed { hour: u8 },
    /// Repeats every year on the month/day of the key it is stored under.
    /// Always shown as an all-day badge.
    RecurringYearly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEvent", into = "WireEvent")]
pub struct EventRecord {
    pub text: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event text is empty")]
    EmptyText,
    #[error("hour {0} is outside 0-23")]
    HourOutOfRange(i64),
}

impl EventRecord {
    pub fn new(text: impl Into<String>, kind: EventKind) -> Result<Self, EventError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(EventError::EmptyText);
        }
        if let EventKind::Timed { hour } = kind {
            if hour > 23 {
                return Err(EventError::HourOutOfRange(i64::from(hour)));
            }
        }
        Ok(Self { text, kind })
    }

    pub fn all_day(text: impl Into<String>) -> Result<Self, EventError> {
        Self::new(text, EventKind::AllDay)
    }

    pub fn timed(text: impl Into<String>, hour: u8) -> Result<Self, EventError> {
        Self::new(text, EventKind::Timed { hour })
    }

    pub fn birthday(text: impl Into<String>) -> Result<Self, EventError> {
        Self::new(text, EventKind::RecurringYearly)
    }

    pub fn is_recurring(&self) -> bool {
        self.kind == EventKind::RecurringYearly
    }

    /// Hour slot used for placement. Recurring entries never have one.
    pub fn hour(&self) -> Option<u8> {
        match self.kind {
            EventKind::Timed { hour } => Some(hour),
            EventKind::AllDay | EventKind::RecurringYearly => None,
        }
    }

    /// Key used to collapse repeated entries: trimmed and case-folded text.
    pub fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }

    pub fn time_display(&self) -> String {
        match self.kind {
            EventKind::Timed { hour } => format!("{:02}:00", hour),
            EventKind::AllDay => "All day".to_string(),
            EventKind::RecurringYearly => "Yearly".to_string(),
        }
    }
}

// ── wire format ──

/// Shape of one record inside `events.json`.
///
/// Older files mark yearly entries with `"repeat": "yearly"` or
/// `"isRecurringYearly": true`; both are read, only `birthday` is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEvent {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hour: Option<i64>,
    #[serde(default, alias = "isRecurringYearly", skip_serializing_if = "is_false")]
    birthday: bool,
    #[serde(default, skip_serializing)]
    repeat: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl TryFrom<WireEvent> for EventRecord {
    type Error = EventError;

    fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
        let yearly = wire.birthday
            || wire
                .repeat
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case("yearly"));

        let kind = if yearly {
            EventKind::RecurringYearly
        } else {
            match wire.hour {
                Some(hour) => {
                    let hour = u8::try_from(hour)
                        .ok()
                        .filter(|h| *h <= 23)
                        .ok_or(EventError::HourOutOfRange(hour))?;
                    EventKind::Timed { hour }
                }
                None => EventKind::AllDay,
            }
        };

        EventRecord::new(wire.text, kind)
    }
}

impl From<EventRecord> for WireEvent {
    fn from(record: EventRecord) -> Self {
        Self {
            hour: record.hour().map(i64::from),
            birthday: record.is_recurring(),
            text: record.text,
            repeat: None,
        }
    }
}
