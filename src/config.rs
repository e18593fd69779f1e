//! Environment configuration and schedule-file loading.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono_tz::Tz;

use crate::calendar::season::Hemisphere;
use crate::models::ScheduleFile;

/// Service configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
    pub country_code: String,
    pub hemisphere: Hemisphere,
    pub port: u16,
    pub schedule_file: PathBuf,
}

impl Config {
    /// Reads configuration from environment variables, falling back to the
    /// defaults below. Fails on unparseable values rather than guessing.
    pub fn from_env() -> Result<Self> {
        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("Invalid TIMEZONE {:?}: {}", name, e))?,
            Err(_) => chrono_tz::Europe::Paris,
        };

        let hemisphere = match std::env::var("HEMISPHERE") {
            Ok(name) => Hemisphere::parse(&name)
                .ok_or_else(|| anyhow::anyhow!("Invalid HEMISPHERE {:?}, expected north or south", name))?,
            Err(_) => Hemisphere::North,
        };

        Ok(Self {
            latitude: env_parsed("LATITUDE", 49.2297)?,
            longitude: env_parsed("LONGITUDE", -0.4458)?,
            timezone,
            country_code: std::env::var("COUNTRY_CODE").unwrap_or_else(|_| "FR".to_string()),
            hemisphere,
            port: env_parsed("PORT", 8000)?,
            schedule_file: PathBuf::from(
                std::env::var("SCHEDULE_FILE").unwrap_or_else(|_| "schedule.yaml".to_string()),
            ),
        })
    }
}

fn env_parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} {:?}: {}", name, value, e)),
        Err(_) => Ok(default),
    }
}

/// Loads the schedule file, or an empty schedule if the file is missing or
/// malformed. A broken schedule degrades the facts, it never stops the
/// exporter.
pub fn load_schedule(path: &Path) -> ScheduleFile {
    match try_load_schedule(path) {
        Ok(schedule) => schedule,
        Err(e) => {
            tracing::warn!("Using empty schedule: {:#}", e);
            ScheduleFile::default()
        }
    }
}

fn try_load_schedule(path: &Path) -> Result<ScheduleFile> {
    if !path.exists() {
        anyhow::bail!("Schedule file {} not found", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
