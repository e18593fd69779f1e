//! The refresh loop: computes a fresh snapshot when the local date changes
//! and swaps it into the shared slot the HTTP endpoints read from.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::calendar::facts;
use crate::config::Config;
use crate::models::{FactSnapshot, ScheduleFile};
use crate::providers::{moon, sun, CountryHolidays, HolidayCalendar};

/// Shared handle to the latest snapshot. Written once per tick by the
/// monitor, read by every scrape and context request.
pub type SharedSnapshot = Arc<RwLock<Arc<FactSnapshot>>>;

pub struct Monitor {
    config: Config,
    schedule: ScheduleFile,
    holidays: CountryHolidays,
}

impl Monitor {
    pub fn new(config: Config, schedule: ScheduleFile) -> Self {
        let holidays = CountryHolidays::new(&config.country_code);
        Self {
            config,
            schedule,
            holidays,
        }
    }

    /// Computes a full snapshot for the current instant.
    pub fn snapshot_now(&self) -> FactSnapshot {
        self.snapshot_at(Utc::now().with_timezone(&self.config.timezone))
    }

    /// Computes a full snapshot for a given local instant.
    pub fn snapshot_at(&self, now: DateTime<Tz>) -> FactSnapshot {
        let today = now.date_naive();
        let holidays = self.holidays.holidays_for(today.year());
        let calendar = facts::calendar_facts(
            today,
            self.config.hemisphere,
            &holidays,
            &self.schedule.trash,
            &self.schedule.birthdays,
        );

        FactSnapshot {
            timestamp: now.to_rfc3339(),
            sun: sun::sun_facts(
                today,
                self.config.latitude,
                self.config.longitude,
                self.config.timezone,
            ),
            moon: moon::moon_facts(today),
            season: calendar.season,
            calendar: calendar.calendar,
            trash: calendar.trash,
            birthdays: calendar.birthdays,
        }
    }

    /// Runs the refresh loop until the task is dropped.
    ///
    /// The snapshot only depends on the local calendar date, so the loop
    /// recomputes when the date changes and otherwise just sleeps to the
    /// next minute boundary.
    pub async fn run(self, shared: SharedSnapshot) {
        let mut last_date: Option<NaiveDate> = None;

        loop {
            let now = Utc::now().with_timezone(&self.config.timezone);
            let today = now.date_naive();

            if last_date != Some(today) {
                tracing::info!("Running daily update for {}", today);
                let snapshot = Arc::new(self.snapshot_at(now));
                *shared.write().expect("snapshot lock poisoned") = snapshot;
                last_date = Some(today);
            }

            let seconds_into_minute = Utc::now().timestamp().rem_euclid(60) as u64;
            tokio::time::sleep(Duration::from_secs(60 - seconds_into_minute)).await;
        }
    }
}
