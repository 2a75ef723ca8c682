//! Field encodings used in the table files.
//!
//! Every column is stored as text. These helpers are plugged into the models
//! with `#[serde(with = "...")]` so the structs stay strongly typed while the
//! files keep the layout other tools (spreadsheets, sync jobs) already read.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer, de::Error};
use tracing::warn;

/// Time of day, e.g. `09:15:00 AM`.
pub const CLOCK_FORMAT: &str = "%I:%M:%S %p";
/// File name stem of a day table and the `created_at` column of its rows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// User creation timestamp, e.g. `Sat, Oct 17, 2026 09:14:03 AM`.
pub const CREATED_AT_FORMAT: &str = "%a, %b %d, %Y %I:%M:%S %p";

pub mod clock_time {
    use super::*;

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(CLOCK_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(raw.trim(), CLOCK_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid time `{}`: {}", raw, e)))
    }
}

pub mod opt_clock_time {
    use super::*;

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.collect_str(&t.format(CLOCK_FORMAT)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveTime::parse_from_str(raw, CLOCK_FORMAT)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid time `{}`: {}", raw, e)))
    }
}

/// Booleans as `True` / `False`.
pub mod text_bool {
    use super::*;

    pub fn serialize<S: Serializer>(b: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *b { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean `{}`", other))),
        }
    }
}

/// Durations as `H:MM:SS`.
pub mod opt_total_time {
    use super::*;

    pub fn format(total: Duration) -> String {
        let secs = total.num_seconds();
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    pub fn parse(raw: &str) -> Option<Duration> {
        let mut parts = raw.split(':');
        let h: i64 = parts.next()?.trim().parse().ok()?;
        let m: i64 = parts.next()?.parse().ok()?;
        let s: i64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || h < 0 || !(0..60).contains(&m) || !(0..60).contains(&s) {
            return None;
        }
        Some(Duration::seconds(h * 3600 + m * 60 + s))
    }

    pub fn serialize<S: Serializer>(t: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&format(*t)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        // Older tables carry values such as `-1 day, 0:20:00` for exits
        // recorded past midnight; those rows stay readable without a total.
        let total = parse(raw);
        if total.is_none() {
            warn!(value = raw, "unreadable total_time, treating as empty");
        }
        Ok(total)
    }
}

pub mod created_at {
    use super::*;

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(CREATED_AT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(raw.trim(), CREATED_AT_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid timestamp `{}`: {}", raw, e)))
    }
}
