//! Pure composition of the season resolver, recurrence calculator and an
//! injected holiday set into the per-tick calendar facts.
//!
//! Every external dependency is an explicit argument, so the aggregator is
//! tested with fixture dates and in-memory holiday sets; no clock, network or
//! file access anywhere below this point.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar::season::Hemisphere;
use crate::calendar::{recurrence, season};
use crate::models::{
    BirthdayEntry, BirthdayFacts, CollectionFacts, DayFacts, SeasonFacts, TrashEntry,
};

/// Sentinel day count for a schedule entry that could not be resolved.
///
/// One broken entry never aborts the tick; it is reported with this value
/// and a warning while every other entry resolves normally.
pub const UNRESOLVED_DAYS: i64 = 999;

/// The calendar-derived part of a fact snapshot.
#[derive(Debug, Clone)]
pub struct CalendarFacts {
    pub season: SeasonFacts,
    pub calendar: DayFacts,
    pub trash: BTreeMap<String, CollectionFacts>,
    pub birthdays: Vec<BirthdayFacts>,
}

/// Derives all calendar facts for `today`.
///
/// `holidays` maps each public holiday of the current year to its name, as
/// supplied by the holiday provider.
pub fn calendar_facts(
    today: NaiveDate,
    hemisphere: Hemisphere,
    holidays: &BTreeMap<NaiveDate, String>,
    trash_rules: &BTreeMap<String, TrashEntry>,
    birthdays: &[BirthdayEntry],
) -> CalendarFacts {
    let status = season::resolve(today, hemisphere);
    let season = SeasonFacts {
        name: status.season.as_str().to_string(),
        hemisphere: hemisphere.as_str().to_string(),
        progress_percent: status.progress_percent,
        days_to_next: status.days_to_boundary,
        days_until: season::days_until_starts(today),
    };

    let is_weekend = matches!(today.weekday(), Weekday::Sat | Weekday::Sun);
    let holiday_name = holidays.get(&today).cloned();
    let is_holiday = holiday_name.is_some();
    let calendar = DayFacts {
        day_of_week: today.format("%A").to_string(),
        is_weekend,
        is_holiday,
        holiday_name,
        is_working_day: !is_weekend && !is_holiday,
    };

    let trash = trash_rules
        .iter()
        .map(|(label, entry)| (label.clone(), collection_facts(today, label, entry)))
        .collect();

    let birthdays = birthdays
        .iter()
        .map(|entry| birthday_facts(today, entry))
        .collect();

    CalendarFacts {
        season,
        calendar,
        trash,
        birthdays,
    }
}

fn collection_facts(today: NaiveDate, label: &str, entry: &TrashEntry) -> CollectionFacts {
    let resolved = entry
        .validate()
        .and_then(|rule| recurrence::next_occurrence(today, &rule));
    match resolved {
        Ok(occurrence) => CollectionFacts {
            today: occurrence.is_today,
            next_in_days: occurrence.days_until,
        },
        Err(e) => {
            tracing::warn!("Trash rule '{}' could not be resolved: {}", label, e);
            CollectionFacts {
                today: false,
                next_in_days: UNRESOLVED_DAYS,
            }
        }
    }
}

fn birthday_facts(today: NaiveDate, entry: &BirthdayEntry) -> BirthdayFacts {
    match entry.month_day() {
        Ok(month_day) => {
            let occurrence = recurrence::days_until_anniversary(today, month_day);
            BirthdayFacts {
                name: entry.name.clone(),
                month: month_day.month(),
                day: month_day.day(),
                days_until: occurrence.days_until,
                is_today: occurrence.is_today,
                is_this_month: month_day.month() == today.month(),
            }
        }
        Err(e) => {
            tracing::warn!("Birthday '{}' could not be resolved: {}", entry.name, e);
            BirthdayFacts {
                name: entry.name.clone(),
                month: 0,
                day: 0,
                days_until: UNRESOLVED_DAYS,
                is_today: false,
                is_this_month: false,
            }
        }
    }
}
