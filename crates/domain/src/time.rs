//! Zoned timestamp parsing
//!
//! HaFAS reports dates and times as separate local strings (`2024-05-01`,
//! `14:05:00`) without an offset. They are interpreted in a fixed zone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::errors::DomainError;

/// Zone HaFAS local times are interpreted in unless configured otherwise
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Berlin;

/// Parse an IANA zone name such as `Europe/Berlin`
pub fn parse_time_zone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::UnknownTimeZone(name.to_string()))
}

/// Combine a date string and a time string into a timestamp in `tz`
///
/// Accepts `YYYY-MM-DD` and `HH:MM[:SS]`. Ambiguous local times (the repeated
/// hour when clocks go back) resolve to the earlier instant.
///
/// # Errors
///
/// Returns an error if either part is malformed or the local time falls
/// into a DST gap.
pub fn parse_zoned(date: &str, time: &str, tz: Tz) -> Result<DateTime<FixedOffset>, DomainError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| DomainError::InvalidDateTime(format!("date {date:?}: {e}")))?;
    let time = parse_time(time)?;
    let local = NaiveDateTime::new(date, time);

    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| DomainError::NonexistentLocalTime {
            local: local.to_string(),
            zone: tz.name().to_string(),
        })
}

/// Like [`parse_zoned`], but `None` unless both parts are present and non-empty
pub fn parse_optional_zoned(
    date: Option<&str>,
    time: Option<&str>,
    tz: Tz,
) -> Result<Option<DateTime<FixedOffset>>, DomainError> {
    match (date, time) {
        (Some(d), Some(t)) if !d.trim().is_empty() && !t.trim().is_empty() => {
            parse_zoned(d, t, tz).map(Some)
        },
        _ => Ok(None),
    }
}

fn parse_time(time: &str) -> Result<NaiveTime, DomainError> {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| DomainError::InvalidDateTime(format!("time {time:?}: {e}")))
}
