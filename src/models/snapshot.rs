use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calendar::season::SeasonStarts;

/// The full set of derived facts for one refresh tick.
///
/// Built fresh on every tick and never mutated afterwards; the monitor swaps
/// an `Arc` to the latest snapshot and both HTTP endpoints read from it, so a
/// scrape can never observe a half-updated tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSnapshot {
    /// RFC 3339 local timestamp of the tick that produced this snapshot.
    pub timestamp: String,
    /// `None` during polar day/night, when there is no sunrise or sunset.
    pub sun: Option<SunFacts>,
    pub moon: MoonFacts,
    pub season: SeasonFacts,
    pub calendar: DayFacts,
    pub trash: BTreeMap<String, CollectionFacts>,
    pub birthdays: Vec<BirthdayFacts>,
}

/// Sunrise/sunset facts in local clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunFacts {
    /// `HH:MM` local time.
    pub sunrise: String,
    /// `HH:MM` local time.
    pub sunset: String,
    /// Minutes since local midnight.
    pub sunrise_minutes: u32,
    /// Minutes since local midnight.
    pub sunset_minutes: u32,
    pub day_length_minutes: i64,
    /// Change in day length versus yesterday, in minutes.
    pub day_gain_minutes: i64,
    /// Whether days are currently getting longer.
    pub is_growing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonFacts {
    /// Age of the moon in days, `0.0..29.53`.
    pub day: f64,
    /// Human-readable phase bucket, e.g. "Waxing Gibbous".
    pub phase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonFacts {
    pub name: String,
    pub hemisphere: String,
    pub progress_percent: f64,
    /// Days until the current season's end boundary.
    pub days_to_next: i64,
    /// Days until each of the four fixed season-start markers.
    pub days_until: SeasonStarts,
}

/// Weekend/holiday/working-day facts for the snapshot date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayFacts {
    pub day_of_week: String,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub is_working_day: bool,
}

/// Next-occurrence facts for one trash collection rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFacts {
    pub today: bool,
    /// Days until the next collection; 999 when the rule could not be
    /// resolved (e.g. biweekly without a reference date).
    pub next_in_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthdayFacts {
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub days_until: i64,
    pub is_today: bool,
    /// Whether the anniversary month is the snapshot's month.
    pub is_this_month: bool,
}
