use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;

use super::date_key::DateKey;
use super::easter::easter_sunday;

/// Which language holiday names are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayLabels {
    #[default]
    English,
    German,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    NewYear,
    LabourDay,
    UnityDay,
    ChristmasDay,
    SecondChristmasDay,
    EasterMonday,
    Ascension,
    WhitMonday,
    CorpusChristi,
}

impl HolidayKind {
    pub fn label(self, labels: HolidayLabels) -> &'static str {
        match labels {
            HolidayLabels::English => self.english(),
            HolidayLabels::German => self.german(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            HolidayKind::NewYear => "New Year",
            HolidayKind::LabourDay => "Labour Day",
            HolidayKind::UnityDay => "Unity Day",
            HolidayKind::ChristmasDay => "Christmas Day",
            HolidayKind::SecondChristmasDay => "Second Day of Christmas",
            HolidayKind::EasterMonday => "Easter Monday",
            HolidayKind::Ascension => "Ascension",
            HolidayKind::WhitMonday => "Whit Monday",
            HolidayKind::CorpusChristi => "Corpus Christi",
        }
    }

    fn german(self) -> &'static str {
        match self {
            HolidayKind::NewYear => "Neujahr",
            HolidayKind::LabourDay => "Tag der Arbeit",
            HolidayKind::UnityDay => "Tag der Deutschen Einheit",
            HolidayKind::ChristmasDay => "1. Weihnachtstag",
            HolidayKind::SecondChristmasDay => "2. Weihnachtstag",
            HolidayKind::EasterMonday => "Ostermontag",
            HolidayKind::Ascension => "Christi Himmelfahrt",
            HolidayKind::WhitMonday => "Pfingstmontag",
            HolidayKind::CorpusChristi => "Fronleichnam",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    pub date: DateKey,
    pub kind: HolidayKind,
}

impl Holiday {
    pub fn label(&self, labels: HolidayLabels) -> &'static str {
        self.kind.label(labels)
    }
}

const FIXED: [(u32, u32, HolidayKind); 5] = [
    (1, 1, HolidayKind::NewYear),
    (5, 1, HolidayKind::LabourDay),
    (10, 3, HolidayKind::UnityDay),
    (12, 25, HolidayKind::ChristmasDay),
    (12, 26, HolidayKind::SecondChristmasDay),
];

/// Days after Easter Sunday.
const MOVABLE: [(u64, HolidayKind); 4] = [
    (1, HolidayKind::EasterMonday),
    (39, HolidayKind::Ascension),
    (50, HolidayKind::WhitMonday),
    (60, HolidayKind::CorpusChristi),
];

/// German public holidays of `year`: fixed ones first, then the Easter-based
/// ones in calendar order. Nine entries for every year chrono can represent.
pub fn holidays_for_year(year: i32) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = FIXED
        .iter()
        .filter_map(|&(month, day, kind)| {
            DateKey::new(year, month, day).map(|date| Holiday { date, kind })
        })
        .collect();

    if let Some(easter) = easter_sunday(year) {
        holidays.extend(MOVABLE.iter().filter_map(|&(offset, kind)| {
            easter
                .checked_add_days(Days::new(offset))
                .map(|date| Holiday { date: date.into(), kind })
        }));
    }

    holidays
}

pub fn holiday_on(date: NaiveDate) -> Option<Holiday> {
    let key = DateKey::from(date);
    holidays_for_year(date.year())
        .into_iter()
        .find(|h| h.date == key)
}
