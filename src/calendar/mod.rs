//! The date-arithmetic and recurrence-resolution core.
//!
//! Everything in this module is pure: functions take a calendar date plus
//! small configuration values and return derived facts. No clock, no I/O,
//! no shared state, so every function is trivially safe to call concurrently
//! and is tested with plain fixture dates.

pub mod facts;
pub mod recurrence;
pub mod season;
