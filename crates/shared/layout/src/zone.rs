//! # Zones
//!
//! [`Zone`] names the time zone a timestamp is rendered in, and the zone a
//! wall-clock reading is interpreted in when the text carries no offset.

use crate::error::LayoutError;
use chrono::{
    DateTime, FixedOffset, Local, MappedLocalTime, NaiveDateTime, TimeZone, Utc,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_HOUR: i32 = 3600;
const SECONDS_PER_MINUTE: i32 = 60;

/// A time zone a timestamp can be rendered in.
///
/// Parsed from text as:
/// * `UTC` / `Z` (any case),
/// * `Local` (the host zone),
/// * a fixed offset: `+08:00`, `-0530`, `+09`,
/// * an IANA name: `Asia/Shanghai`, `Europe/Kyiv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Utc,
    Local,
    Fixed(FixedOffset),
    Named(chrono_tz::Tz),
}

impl Zone {
    /// Re-expresses `value` in this zone. The instant is unchanged.
    #[must_use]
    pub fn convert<T: TimeZone>(&self, value: &DateTime<T>) -> DateTime<FixedOffset> {
        match self {
            Self::Utc => value.with_timezone(&Utc).fixed_offset(),
            Self::Local => value.with_timezone(&Local).fixed_offset(),
            Self::Fixed(offset) => value.with_timezone(offset),
            Self::Named(tz) => value.with_timezone(tz).fixed_offset(),
        }
    }

    /// Interprets a wall-clock reading in this zone.
    ///
    /// Ambiguous readings (a DST fold) resolve to the earlier instant.
    ///
    /// # Errors
    /// Returns [`LayoutError::NonExistentLocalTime`] when the reading falls into a gap.
    pub fn localize(&self, local: NaiveDateTime) -> Result<DateTime<FixedOffset>, LayoutError> {
        let earliest = match self {
            Self::Utc => Some(local.and_utc().fixed_offset()),
            Self::Local => earliest(Local.from_local_datetime(&local)),
            Self::Fixed(offset) => earliest(offset.from_local_datetime(&local)),
            Self::Named(tz) => earliest(tz.from_local_datetime(&local)),
        };

        earliest.ok_or_else(|| LayoutError::NonExistentLocalTime { local, zone: self.to_string() })
    }

    /// Returns the IANA zone when this is a [`Zone::Named`] or [`Zone::Utc`].
    #[must_use]
    pub const fn tz(&self) -> Option<chrono_tz::Tz> {
        match self {
            Self::Utc => Some(chrono_tz::Tz::UTC),
            Self::Named(tz) => Some(*tz),
            Self::Local | Self::Fixed(_) => None,
        }
    }
}

fn earliest<T: TimeZone>(result: MappedLocalTime<DateTime<T>>) -> Option<DateTime<FixedOffset>> {
    result.earliest().map(|dt| dt.fixed_offset())
}

impl From<chrono_tz::Tz> for Zone {
    fn from(tz: chrono_tz::Tz) -> Self {
        Self::Named(tz)
    }
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Self::Fixed(offset)
    }
}

impl From<Utc> for Zone {
    fn from(_: Utc) -> Self {
        Self::Utc
    }
}

impl From<Local> for Zone {
    fn from(_: Local) -> Self {
        Self::Local
    }
}

impl FromStr for Zone {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(LayoutError::invalid_zone(s, "zone name is empty"));
        }
        if name.eq_ignore_ascii_case("utc") || name.eq_ignore_ascii_case("z") {
            return Ok(Self::Utc);
        }
        if name.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if name.starts_with(['+', '-']) {
            return parse_offset(name).map(Self::Fixed);
        }

        name.parse::<chrono_tz::Tz>()
            .map(Self::Named)
            .map_err(|e| LayoutError::invalid_zone(name, e.to_string()))
    }
}

fn parse_offset(text: &str) -> Result<FixedOffset, LayoutError> {
    let invalid = || LayoutError::invalid_zone(text, "expected an offset like +08:00 or -0530");

    let (sign, digits) = text.split_at(1);
    let digits = digits.replacen(':', "", 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let seconds = hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE;
    let seconds = if sign == "-" { -seconds } else { seconds };
    FixedOffset::east_opt(seconds).ok_or_else(invalid)
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("UTC"),
            Self::Local => f.write_str("Local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl Serialize for Zone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
