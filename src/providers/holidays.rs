//! Public-holiday calendars, built in per country.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// A source of public holidays for one country.
pub trait HolidayCalendar: Send + Sync {
    /// All public holidays of `year`, mapped to their local names.
    fn holidays_for(&self, year: i32) -> BTreeMap<NaiveDate, String>;

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays_for(date.year()).contains_key(&date)
    }
}

/// Holiday calendar selected by ISO country code.
///
/// Covers the national holidays of FR, DE and US. Unknown country codes
/// yield an empty calendar with a warning, so the rest of the facts still
/// compute.
pub struct CountryHolidays {
    country: String,
}

impl CountryHolidays {
    pub fn new(country_code: &str) -> Self {
        Self {
            country: country_code.to_ascii_uppercase(),
        }
    }
}

impl HolidayCalendar for CountryHolidays {
    fn holidays_for(&self, year: i32) -> BTreeMap<NaiveDate, String> {
        match self.country.as_str() {
            "FR" => french_holidays(year),
            "DE" => german_holidays(year),
            "US" => us_holidays(year),
            other => {
                tracing::warn!("No holiday calendar for country code {:?}", other);
                BTreeMap::new()
            }
        }
    }
}

/// Gregorian Easter Sunday (Butcher's computus).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).expect("computus yields a valid date")
}

fn fixed(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixed holiday is a valid date")
}

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).expect("within the same year range")
}

fn french_holidays(year: i32) -> BTreeMap<NaiveDate, String> {
    let easter = easter_sunday(year);
    let entries = [
        (fixed(year, 1, 1), "Jour de l'an"),
        (days_after(easter, 1), "Lundi de Pâques"),
        (fixed(year, 5, 1), "Fête du Travail"),
        (fixed(year, 5, 8), "Victoire 1945"),
        (days_after(easter, 39), "Ascension"),
        (days_after(easter, 50), "Lundi de Pentecôte"),
        (fixed(year, 7, 14), "Fête nationale"),
        (fixed(year, 8, 15), "Assomption"),
        (fixed(year, 11, 1), "Toussaint"),
        (fixed(year, 11, 11), "Armistice 1918"),
        (fixed(year, 12, 25), "Noël"),
    ];
    entries
        .into_iter()
        .map(|(date, name)| (date, name.to_string()))
        .collect()
}

fn german_holidays(year: i32) -> BTreeMap<NaiveDate, String> {
    let easter = easter_sunday(year);
    let entries = [
        (fixed(year, 1, 1), "Neujahr"),
        (easter - chrono::Duration::days(2), "Karfreitag"),
        (days_after(easter, 1), "Ostermontag"),
        (fixed(year, 5, 1), "Tag der Arbeit"),
        (days_after(easter, 39), "Christi Himmelfahrt"),
        (days_after(easter, 50), "Pfingstmontag"),
        (fixed(year, 10, 3), "Tag der Deutschen Einheit"),
        (fixed(year, 12, 25), "Erster Weihnachtstag"),
        (fixed(year, 12, 26), "Zweiter Weihnachtstag"),
    ];
    entries
        .into_iter()
        .map(|(date, name)| (date, name.to_string()))
        .collect()
}

fn us_holidays(year: i32) -> BTreeMap<NaiveDate, String> {
    let entries = [
        (fixed(year, 1, 1), "New Year's Day"),
        (nth_weekday(year, 1, Weekday::Mon, 3), "Martin Luther King Jr. Day"),
        (last_weekday(year, 5, Weekday::Mon), "Memorial Day"),
        (fixed(year, 7, 4), "Independence Day"),
        (nth_weekday(year, 9, Weekday::Mon, 1), "Labor Day"),
        (fixed(year, 11, 11), "Veterans Day"),
        (nth_weekday(year, 11, Weekday::Thu, 4), "Thanksgiving"),
        (fixed(year, 12, 25), "Christmas Day"),
    ];
    entries
        .into_iter()
        .map(|(date, name)| (date, name.to_string()))
        .collect()
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> NaiveDate {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
        .expect("nth weekday exists for n <= 4")
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    // Walk back from the last day of the month.
    let mut date = if month == 12 {
        fixed(year + 1, 1, 1)
    } else {
        fixed(year, month + 1, 1)
    }
    .pred_opt()
    .expect("month has a last day");
    while date.weekday() != weekday {
        date = date.pred_opt().expect("still inside the month");
    }
    date
}
