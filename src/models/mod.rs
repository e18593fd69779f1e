//! Domain models for Tempus.
//!
//! Two groups of types live here:
//!
//! - Schedule configuration: [`RecurrenceRule`], [`MonthDay`] and the raw
//!   YAML shapes they are validated from. These are loaded once at startup
//!   and treated as immutable input for every refresh tick.
//! - [`FactSnapshot`]: the immutable output aggregate produced on each tick
//!   and shared read-only with the HTTP endpoints.

mod schedule;
mod snapshot;

pub use schedule::*;
pub use snapshot::*;
