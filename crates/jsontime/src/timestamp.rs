use chrono::{DateTime, FixedOffset, Local, Utc};
use jsontime_layout::{Tz, Zone};

/// A timestamp type that can pass through a [`Layout`](crate::Layout).
///
/// Encoding re-expresses the value in the target zone; decoding converts the
/// parsed instant back into `Self`. The instant never changes, only its offset.
pub trait Timestamp: Sized {
    /// The value re-expressed in `zone`.
    fn in_zone(&self, zone: &Zone) -> DateTime<FixedOffset>;

    /// Converts a parsed instant into `Self`.
    ///
    /// `zone` is the resolved zone of the field. It matters only for types that
    /// carry a zone of their own.
    fn from_parsed(parsed: DateTime<FixedOffset>, zone: &Zone) -> Self;
}

impl Timestamp for DateTime<Utc> {
    fn in_zone(&self, zone: &Zone) -> DateTime<FixedOffset> {
        zone.convert(self)
    }

    fn from_parsed(parsed: DateTime<FixedOffset>, _: &Zone) -> Self {
        parsed.with_timezone(&Utc)
    }
}

/// Keeps the offset that was in the text, or the one the zone assigned.
impl Timestamp for DateTime<FixedOffset> {
    fn in_zone(&self, zone: &Zone) -> DateTime<FixedOffset> {
        zone.convert(self)
    }

    fn from_parsed(parsed: DateTime<FixedOffset>, _: &Zone) -> Self {
        parsed
    }
}

impl Timestamp for DateTime<Local> {
    fn in_zone(&self, zone: &Zone) -> DateTime<FixedOffset> {
        zone.convert(self)
    }

    fn from_parsed(parsed: DateTime<FixedOffset>, _: &Zone) -> Self {
        parsed.with_timezone(&Local)
    }
}

/// Lands in the field's zone when it is an IANA zone or UTC, and in UTC otherwise.
impl Timestamp for DateTime<Tz> {
    fn in_zone(&self, zone: &Zone) -> DateTime<FixedOffset> {
        zone.convert(self)
    }

    fn from_parsed(parsed: DateTime<FixedOffset>, zone: &Zone) -> Self {
        parsed.with_timezone(&zone.tz().unwrap_or(Tz::UTC))
    }
}
