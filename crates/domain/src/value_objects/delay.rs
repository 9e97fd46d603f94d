//! Signed delay value object

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Difference between a scheduled and a real-time timestamp, in whole seconds
///
/// Renders as `HH:MM:SS`, with a leading `-` when the vehicle runs early.
/// Hours are not wrapped at 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Delay(i64);

impl Delay {
    /// On time
    pub const ZERO: Self = Self(0);

    /// Create a delay from seconds
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Delay of `realtime` against `scheduled`; zero without real-time data
    #[must_use]
    pub fn between(scheduled: DateTime<FixedOffset>, realtime: Option<DateTime<FixedOffset>>) -> Self {
        realtime.map_or(Self::ZERO, |rt| Self((rt - scheduled).num_seconds()))
    }

    /// Delay in seconds
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.0
    }

    /// Whether there is no delay
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The delay as a duration that can be added to a timestamp
    #[must_use]
    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.0)
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for Delay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidDelay(s.to_string());

        let trimmed = s.trim();
        let (negative, body) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest));

        let mut parts = body.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if [h, m, sec]
            .iter()
            .any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(invalid());
        }

        let hours: i64 = h.parse().map_err(|_| invalid())?;
        let minutes: i64 = m.parse().map_err(|_| invalid())?;
        let seconds: i64 = sec.parse().map_err(|_| invalid())?;
        if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
            return Err(invalid());
        }

        let total = hours
            .checked_mul(3600)
            .and_then(|v| v.checked_add(minutes * 60 + seconds))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -total } else { total }))
    }
}

impl From<Delay> for String {
    fn from(delay: Delay) -> Self {
        delay.to_string()
    }
}

impl TryFrom<String> for Delay {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{DEFAULT_TIME_ZONE, parse_zoned};

    fn at(time: &str) -> DateTime<FixedOffset> {
        parse_zoned("2024-07-01", time, DEFAULT_TIME_ZONE).unwrap()
    }

    #[test]
    fn no_realtime_is_zero() {
        let delay = Delay::between(at("10:00:00"), None);
        assert!(delay.is_zero());
        assert_eq!(delay.to_string(), "00:00:00");
    }

    #[test]
    fn late_departure() {
        let delay = Delay::between(at("10:00:00"), Some(at("10:03:30")));
        assert_eq!(delay.seconds(), 210);
        assert_eq!(delay.to_string(), "00:03:30");
    }

    #[test]
    fn early_departure_is_negative() {
        let delay = Delay::between(at("10:00:00"), Some(at("09:59:00")));
        assert_eq!(delay.to_string(), "-00:01:00");
    }

    #[test]
    fn long_delay_does_not_wrap() {
        let delay = Delay::from_seconds(26 * 3600 + 5);
        assert_eq!(delay.to_string(), "26:00:05");
    }

    #[test]
    fn parses_signed_strings() {
        assert_eq!("00:03:30".parse::<Delay>().unwrap().seconds(), 210);
        assert_eq!("-01:00:00".parse::<Delay>().unwrap().seconds(), -3600);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "3", "00:03", "00:60:00", "00:00:61", "a:b:c", "00:00:00:00", "--00:00:01"] {
            assert!(bad.parse::<Delay>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn applies_to_timestamp() {
        let shifted = at("10:00:00") + Delay::from_seconds(-90).as_time_delta();
        assert_eq!(shifted, at("09:58:30"));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Delay::from_seconds(65)).unwrap();
        assert_eq!(json, r#""00:01:05""#);
        let back: Delay = serde_json::from_str(r#""-00:00:30""#).unwrap();
        assert_eq!(back.seconds(), -30);
    }
}
