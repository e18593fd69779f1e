//! External collaborators the fact aggregation composes with: the holiday
//! calendar, sunrise/sunset times and the moon phase. The core date
//! arithmetic in [`crate::calendar`] is independent of everything here.

pub mod holidays;
pub mod moon;
pub mod sun;

pub use holidays::{CountryHolidays, HolidayCalendar};
