//! Season resolution from fixed solstice/equinox calendar markers.
//!
//! Boundaries are the fixed calendar days Mar 20, Jun 21, Sep 22 and Dec 21.
//! The four boundary pairs are the same for both hemispheres; only the season
//! *name* attached to a pair rotates by two slots in the south (the southern
//! spring starts on the northern fall boundary, and so on).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
        }
    }
}

/// Where a date falls within its season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonStatus {
    pub season: Season,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Elapsed fraction of the season, `0.0..=100.0`. Exactly 0 on the
    /// season's start boundary.
    pub progress_percent: f64,
    /// Days until the season's end boundary, never negative.
    pub days_to_boundary: i64,
}

/// Days until each of the four fixed season-start markers.
///
/// Hemisphere independent: the markers are solstice/equinox calendar days, so
/// "days until winter" always counts to Dec 21 regardless of what the local
/// season is called. All fields are in `0..=366`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStarts {
    pub spring: i64,
    pub summer: i64,
    pub fall: i64,
    pub winter: i64,
}

/// `(month, day)` of each boundary, in slot order: Mar 20 opens the northern
/// spring (slot 0), Dec 21 the northern winter (slot 3).
const BOUNDARIES: [(u32, u32); 4] = [(3, 20), (6, 21), (9, 22), (12, 21)];

fn boundary(year: i32, slot: usize) -> NaiveDate {
    let (month, day) = BOUNDARIES[slot];
    // The four boundary month-days exist in every year.
    NaiveDate::from_ymd_opt(year, month, day).expect("season boundary is a valid date")
}

/// Which boundary pair the date falls in, by northern naming: 0 = spring,
/// 1 = summer, 2 = fall, 3 = winter. Every date matches exactly one slot.
fn northern_slot(date: NaiveDate) -> usize {
    let (m, d) = (date.month(), date.day());
    if (m == 3 && d >= 20) || (m > 3 && m < 6) || (m == 6 && d < 21) {
        0
    } else if (m == 6 && d >= 21) || (m > 6 && m < 9) || (m == 9 && d < 22) {
        1
    } else if (m == 9 && d >= 22) || (m > 9 && m < 12) || (m == 12 && d < 21) {
        2
    } else {
        3
    }
}

fn season_name(slot: usize, hemisphere: Hemisphere) -> Season {
    const NORTH: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];
    // Two-slot rotation: the southern name for a pair is the northern name
    // two seasons later.
    const SOUTH: [Season; 4] = [Season::Fall, Season::Winter, Season::Spring, Season::Summer];
    match hemisphere {
        Hemisphere::North => NORTH[slot],
        Hemisphere::South => SOUTH[slot],
    }
}

/// Resolves the season a date falls in, with progress and days to the next
/// boundary.
pub fn resolve(date: NaiveDate, hemisphere: Hemisphere) -> SeasonStatus {
    let slot = northern_slot(date);
    let year = date.year();

    // The Dec 21 pair spans the year turn: dates in December belong to a
    // season ending next year, dates in Jan..Mar 19 to one that started the
    // previous year.
    let (start, end) = if slot == 3 {
        if date.month() == 12 {
            (boundary(year, 3), boundary(year + 1, 0))
        } else {
            (boundary(year - 1, 3), boundary(year, 0))
        }
    } else {
        (boundary(year, slot), boundary(year, slot + 1))
    };

    let total_days = (end - start).num_days();
    let elapsed_days = (date - start).num_days();
    let progress_percent = (elapsed_days as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0);
    let days_to_boundary = (end - date).num_days().max(0);

    SeasonStatus {
        season: season_name(slot, hemisphere),
        start,
        end,
        progress_percent,
        days_to_boundary,
    }
}

/// Days until each season-start marker, looking into next year for markers
/// already passed.
pub fn days_until_starts(date: NaiveDate) -> SeasonStarts {
    let until = |slot: usize| {
        let diff = (boundary(date.year(), slot) - date).num_days();
        if diff < 0 {
            (boundary(date.year() + 1, slot) - date).num_days()
        } else {
            diff
        }
    };
    SeasonStarts {
        spring: until(0),
        summer: until(1),
        fall: until(2),
        winter: until(3),
    }
}
