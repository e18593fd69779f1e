pub mod api;
pub mod calendar;
pub mod config;
pub mod metrics;
pub mod models;
pub mod monitor;
pub mod providers;
