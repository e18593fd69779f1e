//! Sunrise/sunset facts for the configured location.
//!
//! The astronomical work is delegated to the SPA implementation in the
//! `solar-positioning` crate via its numeric UTC API; this module only
//! converts the results into minutes since local midnight and derives the
//! day-length trend.

use chrono::{Datelike, NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use solar_positioning::{spa, Horizon, SunriseResult};

use crate::models::SunFacts;

/// Delta T estimate in seconds, adequate for minute-resolution results.
const DELTA_T_SECONDS: f64 = 69.0;

/// Sunrise and sunset in minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise_minutes: u32,
    pub sunset_minutes: u32,
}

impl SunTimes {
    pub fn day_length_minutes(&self) -> i64 {
        self.sunset_minutes as i64 - self.sunrise_minutes as i64
    }
}

/// Computes sunrise and sunset for one date.
///
/// Returns `None` on polar days and polar nights, when there is no sunrise
/// or sunset to report.
pub fn sun_times(date: NaiveDate, latitude: f64, longitude: f64, tz: Tz) -> Option<SunTimes> {
    let result = spa::sunrise_sunset_utc_for_horizon(
        date.year(),
        date.month(),
        date.day(),
        latitude,
        longitude,
        DELTA_T_SECONDS,
        Horizon::SunriseSunset,
    );
    let result = match result {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Sunrise calculation failed for {}: {}", date, e);
            return None;
        }
    };

    match result {
        SunriseResult::RegularDay {
            sunrise, sunset, ..
        } => Some(SunTimes {
            sunrise_minutes: local_minutes(date, sunrise.hours(), tz),
            sunset_minutes: local_minutes(date, sunset.hours(), tz),
        }),
        SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => None,
    }
}

/// Full sun facts for `date`, including the day-length change versus the
/// previous day.
pub fn sun_facts(date: NaiveDate, latitude: f64, longitude: f64, tz: Tz) -> Option<SunFacts> {
    let today = sun_times(date, latitude, longitude, tz)?;
    let yesterday = sun_times(date.pred_opt()?, latitude, longitude, tz)?;

    let day_length = today.day_length_minutes();
    let day_gain = day_length - yesterday.day_length_minutes();

    Some(SunFacts {
        sunrise: clock_string(today.sunrise_minutes),
        sunset: clock_string(today.sunset_minutes),
        sunrise_minutes: today.sunrise_minutes,
        sunset_minutes: today.sunset_minutes,
        day_length_minutes: day_length,
        day_gain_minutes: day_gain,
        is_growing: day_gain > 0,
    })
}

/// Converts a UTC hour-of-day into minutes since local midnight, using the
/// zone's offset on that date. Any whole-day offset in the input is erased
/// by the final wrap to `0..1440`.
fn local_minutes(date: NaiveDate, hours: f64, tz: Tz) -> u32 {
    let utc_minutes = (hours * 60.0).round() as i64;
    let noon_utc = date.and_hms_opt(12, 0, 0).expect("noon exists");
    let offset_minutes = tz
        .from_utc_datetime(&noon_utc)
        .offset()
        .fix()
        .local_minus_utc() as i64
        / 60;
    (utc_minutes + offset_minutes).rem_euclid(1440) as u32
}

fn clock_string(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    const PARIS_LAT: f64 = 48.8566;
    const PARIS_LON: f64 = 2.3522;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paris() -> Tz {
        "Europe/Paris".parse().unwrap()
    }

    #[test]
    fn paris_midsummer_day_is_long() {
        let times = sun_times(date(2026, 6, 21), PARIS_LAT, PARIS_LON, paris()).unwrap();
        // Roughly 05:47 sunrise and 21:58 sunset; allow slack for the
        // minute-level approximation.
        assert!(times.sunrise_minutes < 6 * 60, "{}", times.sunrise_minutes);
        assert!(times.sunset_minutes > 21 * 60, "{}", times.sunset_minutes);
        assert!(times.day_length_minutes() > 15 * 60);
    }

    #[test]
    fn polar_night_has_no_sun_times() {
        // Longyearbyen in late December.
        let tz: Tz = "Arctic/Longyearbyen".parse().unwrap();
        assert!(sun_times(date(2026, 12, 21), 78.22, 15.64, tz).is_none());
    }

    #[test]
    fn days_grow_after_winter_solstice() {
        let facts = sun_facts(date(2026, 1, 15), PARIS_LAT, PARIS_LON, paris()).unwrap();
        assert!(facts.is_growing);
        assert!(facts.day_gain_minutes > 0);
    }

    #[test]
    fn days_shrink_after_summer_solstice() {
        let facts = sun_facts(date(2026, 7, 15), PARIS_LAT, PARIS_LON, paris()).unwrap();
        assert!(!facts.is_growing);
        assert!(facts.day_gain_minutes < 0);
    }

    #[test]
    fn clock_string_pads_to_two_digits() {
        assert_eq!(clock_string(5 * 60 + 7), "05:07");
        assert_eq!(clock_string(0), "00:00");
    }
}
