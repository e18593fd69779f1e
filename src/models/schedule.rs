use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A schedule entry that cannot be resolved.
///
/// These never abort a refresh tick: the aggregator reports the affected
/// entry with a sentinel day count and keeps resolving the other entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("biweekly rule has no reference date")]
    MissingReferenceDate,
    #[error("unknown weekday name: {0:?}")]
    UnknownWeekday(String),
    #[error("malformed month-day {0:?}, expected MM-DD")]
    MalformedMonthDay(String),
    #[error("month-day {month:02}-{day:02} is not a calendar date")]
    InvalidMonthDay { month: u32, day: u32 },
}

/// How often a collection rule fires.
///
/// - `Weekly`: every week on the rule's weekday.
/// - `Biweekly`: every second week on the rule's weekday, phase-locked to a
///   reference date that must itself fall on a collection day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
        }
    }
}

/// A validated recurring-collection rule.
///
/// `reference_date` is required for biweekly rules; a biweekly rule without
/// one resolves to [`ScheduleError::MissingReferenceDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub weekday: Weekday,
    pub frequency: Frequency,
    pub reference_date: Option<NaiveDate>,
}

/// A yearless month-day pair, e.g. a birthday.
///
/// Feb 29 is a valid month-day; how it resolves in non-leap years is decided
/// by the recurrence calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self, ScheduleError> {
        // Validate against a leap year so Feb 29 is accepted.
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(ScheduleError::InvalidMonthDay { month, day });
        }
        Ok(Self { month, day })
    }

    /// Parses the `MM-DD` form used in the schedule file.
    pub fn parse(s: &str) -> Result<Self, ScheduleError> {
        let malformed = || ScheduleError::MalformedMonthDay(s.to_string());
        let (month, day) = s.split_once('-').ok_or_else(malformed)?;
        let month: u32 = month.trim().parse().map_err(|_| malformed())?;
        let day: u32 = day.trim().parse().map_err(|_| malformed())?;
        Self::new(month, day)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

/// The on-disk schedule file (YAML).
///
/// ```yaml
/// trash:
///   black: { day: friday, frequency: biweekly, reference_date: 2026-01-16 }
///   green: { day: monday, frequency: weekly }
/// birthdays:
///   - { name: Alice, date: 01-15 }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFile {
    #[serde(default)]
    pub trash: BTreeMap<String, TrashEntry>,
    #[serde(default)]
    pub birthdays: Vec<BirthdayEntry>,
}

/// Raw trash rule as read from YAML, before weekday-name validation.
#[derive(Debug, Clone, Deserialize)]
pub struct TrashEntry {
    pub day: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

impl TrashEntry {
    pub fn validate(&self) -> Result<RecurrenceRule, ScheduleError> {
        let weekday = Weekday::from_str(&self.day)
            .map_err(|_| ScheduleError::UnknownWeekday(self.day.clone()))?;
        Ok(RecurrenceRule {
            weekday,
            frequency: self.frequency,
            reference_date: self.reference_date,
        })
    }
}

/// Raw birthday entry as read from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct BirthdayEntry {
    pub name: String,
    pub date: String,
}

impl BirthdayEntry {
    pub fn month_day(&self) -> Result<MonthDay, ScheduleError> {
        MonthDay::parse(&self.date)
    }
}
