//! Prometheus text-exposition rendering.
//!
//! The exposition is rendered from the current immutable snapshot on every
//! scrape. There is no mutable gauge registry: a label that disappears from
//! the schedule file is simply absent from the next rendering, so stale
//! series cannot accumulate.

use std::fmt::Write;

use crate::calendar::season::Season;
use crate::models::FactSnapshot;

/// Renders the snapshot as Prometheus text exposition format (version 0.0.4).
pub fn render(snapshot: &FactSnapshot) -> String {
    let mut out = String::with_capacity(4096);

    if let Some(sun) = &snapshot.sun {
        gauge(&mut out, "sun_sunrise_minutes", "Minutes since midnight for sunrise", sun.sunrise_minutes);
        gauge(&mut out, "sun_sunset_minutes", "Minutes since midnight for sunset", sun.sunset_minutes);
        gauge(&mut out, "sun_day_length_minutes", "Total daylight in minutes", sun.day_length_minutes);
        gauge(&mut out, "sun_day_gain_minutes", "Daily change in daylight", sun.day_gain_minutes);
        gauge(&mut out, "sun_is_growing_day", "Whether days are getting longer", sun.is_growing as u8);
    }

    header(&mut out, "season_id", "Current season indicator");
    for season in Season::ALL {
        let value = (snapshot.season.name == season.as_str()) as u8;
        series(&mut out, "season_id", &[("season", season.as_str())], value);
    }
    gauge(&mut out, "season_progress_percent", "Progress through season", snapshot.season.progress_percent);
    gauge(&mut out, "days_until_season_change", "Days until the season boundary", snapshot.season.days_to_next);
    gauge(&mut out, "days_until_spring", "Days until spring", snapshot.season.days_until.spring);
    gauge(&mut out, "days_until_summer", "Days until summer", snapshot.season.days_until.summer);
    gauge(&mut out, "days_until_fall", "Days until fall", snapshot.season.days_until.fall);
    gauge(&mut out, "days_until_winter", "Days until winter", snapshot.season.days_until.winter);

    gauge(&mut out, "is_public_holiday", "Is public holiday", snapshot.calendar.is_holiday as u8);
    gauge(&mut out, "is_weekend", "Is weekend", snapshot.calendar.is_weekend as u8);
    gauge(&mut out, "is_working_day", "Is working day", snapshot.calendar.is_working_day as u8);

    if !snapshot.trash.is_empty() {
        header(&mut out, "trash_collection_today", "Trash collection today");
        for (label, facts) in &snapshot.trash {
            series(&mut out, "trash_collection_today", &[("type", label)], facts.today as u8);
        }
        header(&mut out, "trash_next_days", "Days until next collection");
        for (label, facts) in &snapshot.trash {
            series(&mut out, "trash_next_days", &[("type", label)], facts.next_in_days);
        }
    }

    if !snapshot.birthdays.is_empty() {
        header(&mut out, "birthday_days_until", "Days until birthday");
        for b in &snapshot.birthdays {
            series(&mut out, "birthday_days_until", &[("name", &b.name)], b.days_until);
        }
        header(&mut out, "birthday_today", "Birthday today");
        for b in &snapshot.birthdays {
            series(&mut out, "birthday_today", &[("name", &b.name)], b.is_today as u8);
        }
        header(&mut out, "birthday_this_month", "Birthday this month");
        for b in &snapshot.birthdays {
            let day = b.day.to_string();
            series(
                &mut out,
                "birthday_this_month",
                &[("name", &b.name), ("day", &day)],
                b.is_this_month as u8,
            );
        }
    }

    gauge(&mut out, "moon_phase_day", "Current moon phase day (0-29.53)", snapshot.moon.day);
    header(&mut out, "moon_phase_info", "Current moon phase description");
    series(&mut out, "moon_phase_info", &[("phase", &snapshot.moon.phase)], 1);

    out
}

fn header(out: &mut String, name: &str, help: &str) {
    writeln!(out, "# HELP {name} {help}").expect("writing to String cannot fail");
    writeln!(out, "# TYPE {name} gauge").expect("writing to String cannot fail");
}

fn gauge(out: &mut String, name: &str, help: &str, value: impl std::fmt::Display) {
    header(out, name, help);
    writeln!(out, "{name} {value}").expect("writing to String cannot fail");
}

fn series(out: &mut String, name: &str, labels: &[(&str, &str)], value: impl std::fmt::Display) {
    let rendered: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
        .collect();
    writeln!(out, "{name}{{{}}} {value}", rendered.join(",")).expect("writing to String cannot fail");
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
