//! Next-occurrence arithmetic for collection rules and anniversaries.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::{Frequency, MonthDay, RecurrenceRule, ScheduleError};

/// A resolved next occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub is_today: bool,
    pub days_until: i64,
}

/// Days from `today` to the next `target` weekday, `0..=6`. 0 means today.
///
/// Weekday numbering follows chrono's `num_days_from_monday`: Monday = 0.
pub fn days_until_weekday(today: NaiveDate, target: Weekday) -> i64 {
    let today_num = today.weekday().num_days_from_monday() as i64;
    let target_num = target.num_days_from_monday() as i64;
    (target_num - today_num).rem_euclid(7)
}

/// Resolves the next occurrence of a collection rule.
///
/// Weekly rules fire on every matching weekday. Biweekly rules fire only on
/// matching weekdays an even number of weeks from the reference date; when
/// the nearest matching weekday is misaligned the occurrence is one week
/// later. In particular, if today has the right weekday but the wrong week,
/// the result is 7 days, not 0, and `is_today` is false.
///
/// # Errors
///
/// `ScheduleError::MissingReferenceDate` for a biweekly rule without a
/// reference date. Callers report a sentinel value instead of propagating.
pub fn next_occurrence(today: NaiveDate, rule: &RecurrenceRule) -> Result<Occurrence, ScheduleError> {
    let mut days_until = days_until_weekday(today, rule.weekday);

    if rule.frequency == Frequency::Biweekly {
        let reference = rule
            .reference_date
            .ok_or(ScheduleError::MissingReferenceDate)?;
        let candidate = today
            .checked_add_days(Days::new(days_until as u64))
            .expect("date within one week of today");
        if (candidate - reference).num_days().rem_euclid(14) != 0 {
            days_until += 7;
        }
    }

    Ok(Occurrence {
        is_today: days_until == 0,
        days_until,
    })
}

/// Days from `today` to the next anniversary of a month-day.
///
/// The candidate is built in the current year and rolled to the next year if
/// it has already passed. A Feb 29 anniversary is observed on Mar 1 in
/// non-leap years, so it never skips a year.
pub fn days_until_anniversary(today: NaiveDate, month_day: MonthDay) -> Occurrence {
    let candidate = occurrence_in_year(today.year(), month_day);
    let candidate = if candidate < today {
        occurrence_in_year(today.year() + 1, month_day)
    } else {
        candidate
    };
    let days_until = (candidate - today).num_days();
    Occurrence {
        is_today: days_until == 0,
        days_until,
    }
}

fn occurrence_in_year(year: i32, month_day: MonthDay) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month_day.month(), month_day.day()).unwrap_or_else(|| {
        // Only Feb 29 can fail here: MonthDay is validated against a leap
        // year. Observe it on Mar 1.
        NaiveDate::from_ymd_opt(year, 3, 1).expect("Mar 1 exists in every year")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(weekday: Weekday) -> RecurrenceRule {
        RecurrenceRule {
            weekday,
            frequency: Frequency::Weekly,
            reference_date: None,
        }
    }

    fn biweekly(weekday: Weekday, reference: NaiveDate) -> RecurrenceRule {
        RecurrenceRule {
            weekday,
            frequency: Frequency::Biweekly,
            reference_date: Some(reference),
        }
    }

    #[test]
    fn weekday_distance_is_zero_on_the_day_itself() {
        // 2026-01-16 is a Friday.
        assert_eq!(days_until_weekday(date(2026, 1, 16), Weekday::Fri), 0);
    }

    #[test]
    fn weekday_distance_wraps_forward() {
        // Saturday to Friday is six days ahead, not minus one.
        assert_eq!(days_until_weekday(date(2026, 1, 17), Weekday::Fri), 6);
        assert_eq!(days_until_weekday(date(2026, 1, 17), Weekday::Sun), 1);
    }

    #[test]
    fn weekly_rule_fires_today_on_matching_weekday() {
        let occ = next_occurrence(date(2026, 1, 16), &weekly(Weekday::Fri)).unwrap();
        assert!(occ.is_today);
        assert_eq!(occ.days_until, 0);
    }

    #[test]
    fn weekly_rule_counts_to_next_week() {
        let occ = next_occurrence(date(2026, 1, 17), &weekly(Weekday::Fri)).unwrap();
        assert!(!occ.is_today);
        assert_eq!(occ.days_until, 6);
    }

    #[test]
    fn biweekly_aligned_reference_day_is_today() {
        let rule = biweekly(Weekday::Fri, date(2026, 1, 16));
        let occ = next_occurrence(date(2026, 1, 16), &rule).unwrap();
        assert!(occ.is_today);
        assert_eq!(occ.days_until, 0);
    }

    #[test]
    fn biweekly_day_after_collection_waits_thirteen_days() {
        let rule = biweekly(Weekday::Fri, date(2026, 1, 16));
        let occ = next_occurrence(date(2026, 1, 17), &rule).unwrap();
        assert_eq!(occ.days_until, 13);
    }

    #[test]
    fn biweekly_misaligned_weekday_reports_next_week_not_today() {
        // Reference one week later: today is the right weekday but the
        // wrong week.
        let rule = biweekly(Weekday::Fri, date(2026, 1, 23));
        let occ = next_occurrence(date(2026, 1, 16), &rule).unwrap();
        assert!(!occ.is_today);
        assert_eq!(occ.days_until, 7);
    }

    #[test]
    fn biweekly_misaligned_off_week() {
        let rule = biweekly(Weekday::Fri, date(2026, 1, 23));
        let occ = next_occurrence(date(2026, 1, 17), &rule).unwrap();
        assert_eq!(occ.days_until, 6);
    }

    #[test]
    fn biweekly_works_with_reference_in_the_future() {
        // Alignment is modular, so a reference date ahead of today behaves
        // the same as one an even number of weeks back.
        let rule = biweekly(Weekday::Fri, date(2026, 2, 13));
        let occ = next_occurrence(date(2026, 1, 16), &rule).unwrap();
        assert_eq!(occ.days_until, 0);
    }

    #[test]
    fn biweekly_without_reference_is_a_configuration_error() {
        let rule = RecurrenceRule {
            weekday: Weekday::Fri,
            frequency: Frequency::Biweekly,
            reference_date: None,
        };
        assert_eq!(
            next_occurrence(date(2026, 1, 16), &rule),
            Err(ScheduleError::MissingReferenceDate)
        );
    }

    #[test]
    fn resolving_again_on_the_occurrence_day_yields_zero() {
        let rules = [
            weekly(Weekday::Tue),
            biweekly(Weekday::Fri, date(2026, 1, 16)),
            biweekly(Weekday::Fri, date(2026, 1, 23)),
        ];
        for rule in rules {
            for start in [date(2026, 1, 14), date(2026, 1, 19), date(2026, 2, 1)] {
                let occ = next_occurrence(start, &rule).unwrap();
                let landed = start
                    .checked_add_days(Days::new(occ.days_until as u64))
                    .unwrap();
                let again = next_occurrence(landed, &rule).unwrap();
                assert!(again.is_today, "{rule:?} from {start}");
                assert_eq!(again.days_until, 0);
            }
        }
    }

    #[test]
    fn anniversary_today() {
        let occ = days_until_anniversary(date(2026, 1, 18), MonthDay::new(1, 18).unwrap());
        assert!(occ.is_today);
        assert_eq!(occ.days_until, 0);
    }

    #[test]
    fn anniversary_already_passed_rolls_to_next_year() {
        let occ = days_until_anniversary(date(2026, 1, 18), MonthDay::new(1, 15).unwrap());
        assert!(occ.days_until > 360);
    }

    #[test]
    fn anniversary_later_this_year() {
        let occ = days_until_anniversary(date(2026, 1, 18), MonthDay::new(3, 10).unwrap());
        assert_eq!(occ.days_until, 51);
    }

    #[test]
    fn leap_day_anniversary_in_leap_year() {
        let occ = days_until_anniversary(date(2024, 2, 1), MonthDay::new(2, 29).unwrap());
        assert_eq!(occ.days_until, 28);
    }

    #[test]
    fn leap_day_anniversary_observed_on_march_first() {
        // 2026 is not a leap year: Feb 29 is observed on Mar 1.
        let occ = days_until_anniversary(date(2026, 2, 28), MonthDay::new(2, 29).unwrap());
        assert_eq!(occ.days_until, 1);
        let on_day = days_until_anniversary(date(2026, 3, 1), MonthDay::new(2, 29).unwrap());
        assert!(on_day.is_today);
    }
}
