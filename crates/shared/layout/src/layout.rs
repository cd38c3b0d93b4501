use crate::error::LayoutError;
use crate::reference;
use crate::zone::Zone;
use chrono::format::{Fixed, Item, Numeric, Pad, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::Arc;

/// Well-known layout names, matched case-insensitively.
pub const RFC3339: &str = "rfc3339";
pub const RFC3339_NANO: &str = "rfc3339_nano";
pub const RFC2822: &str = "rfc2822";
pub const DATETIME: &str = "datetime";
pub const DATE_ONLY: &str = "date_only";
pub const TIME_ONLY: &str = "time_only";
pub const KITCHEN: &str = "kitchen";

const WELL_KNOWN: &[&str] =
    &[RFC3339, RFC3339_NANO, RFC2822, DATETIME, DATE_ONLY, TIME_ONLY, KITCHEN];

/// How a [`Layout`] was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// One of the names in [`Layout::well_known`].
    WellKnown,
    /// A strftime pattern such as `%Y-%m-%d %H:%M:%S`.
    Strftime,
    /// A reference-time pattern such as `2006-01-02 15:04:05`.
    Reference,
}

#[derive(Debug)]
struct Compiled {
    source: String,
    syntax: Syntax,
    format: Vec<Item<'static>>,
    parse: Vec<Item<'static>>,
    has_time: bool,
}

/// A compiled time layout.
///
/// A layout renders a timestamp to text and parses it back. It is compiled once
/// and shared: cloning is an [`Arc`] bump.
///
/// # Example
///
/// ```rust
/// use chrono::TimeZone;
/// use jsontime_layout::{Layout, Zone};
///
/// let layout: Layout = "%Y-%m-%d %H:%M:%S".parse().unwrap();
/// let zone: Zone = "Asia/Shanghai".parse().unwrap();
///
/// let at = chrono::Utc.with_ymd_and_hms(2017, 12, 31, 16, 0, 0).unwrap();
/// let text = layout.format(&zone.convert(&at)).unwrap();
/// assert_eq!(text, "2018-01-01 00:00:00");
///
/// let parsed = layout.parse(&text, &zone).unwrap();
/// assert_eq!(parsed, at);
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    inner: Arc<Compiled>,
}

impl Layout {
    /// Returns a well-known layout by name.
    ///
    /// * `rfc3339`: `2006-01-02T15:04:05Z07:00`, whole seconds. Parsing accepts
    ///   an optional fraction.
    /// * `rfc3339_nano`: as `rfc3339`, with a fraction of 0, 3, 6 or 9 digits.
    /// * `rfc2822`: `Mon, 02 Jan 2006 15:04:05 -0700`.
    /// * `datetime`: `%Y-%m-%d %H:%M:%S`.
    /// * `date_only`: `%Y-%m-%d`.
    /// * `time_only`: `%H:%M:%S`.
    /// * `kitchen`: `%-I:%M%p`.
    #[must_use]
    pub fn well_known(name: &str) -> Option<Self> {
        let name = WELL_KNOWN.iter().find(|known| known.eq_ignore_ascii_case(name))?;

        let (format, parse) = match *name {
            RFC3339 => (rfc3339_items(None), rfc3339_items(Some(Fixed::Nanosecond))),
            RFC3339_NANO => {
                let items = rfc3339_items(Some(Fixed::Nanosecond));
                (items.clone(), items)
            },
            RFC2822 => (vec![Item::Fixed(Fixed::RFC2822)], vec![Item::Fixed(Fixed::RFC2822)]),
            DATETIME => strftime_pair("%Y-%m-%d %H:%M:%S")?,
            DATE_ONLY => strftime_pair("%Y-%m-%d")?,
            TIME_ONLY => strftime_pair("%H:%M:%S")?,
            KITCHEN => strftime_pair("%-I:%M%p")?,
            _ => return None,
        };

        Some(Self::from_items((*name).to_owned(), Syntax::WellKnown, format, parse))
    }

    /// Compiles a strftime pattern (`%Y-%m-%d`).
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidPattern`] for unknown specifiers, a pattern
    /// without any date or time field, or `%I` without `%p`.
    pub fn strftime(pattern: &str) -> Result<Self, LayoutError> {
        let items = StrftimeItems::new(pattern)
            .parse_to_owned()
            .map_err(|e| LayoutError::invalid_pattern(pattern, e.to_string()))?;
        Self::checked(pattern, Syntax::Strftime, items)
    }

    /// Compiles a reference-time pattern (`2006-01-02 15:04:05`).
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidPattern`] for unsupported fragments, a
    /// pattern without any date or time field, or a 12-hour field without `PM`.
    pub fn reference(pattern: &str) -> Result<Self, LayoutError> {
        let items = reference::compile(pattern)?;
        Self::checked(pattern, Syntax::Reference, items)
    }

    fn checked(
        pattern: &str,
        syntax: Syntax,
        items: Vec<Item<'static>>,
    ) -> Result<Self, LayoutError> {
        if !items.iter().any(is_field) {
            return Err(LayoutError::invalid_pattern(pattern, "layout has no date or time fields"));
        }
        if items.iter().any(is_twelve_hour) && !items.iter().any(is_meridiem) {
            return Err(LayoutError::invalid_pattern(pattern, "12-hour field without AM/PM cannot be read back"));
        }
        Ok(Self::from_items(pattern.to_owned(), syntax, items.clone(), items))
    }

    fn from_items(
        source: String,
        syntax: Syntax,
        format: Vec<Item<'static>>,
        parse: Vec<Item<'static>>,
    ) -> Self {
        let has_time = parse.iter().any(is_time_field);
        Self { inner: Arc::new(Compiled { source, syntax, format, parse, has_time }) }
    }

    /// The text this layout was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    #[must_use]
    pub fn syntax(&self) -> Syntax {
        self.inner.syntax
    }

    /// Renders `value` as-is; convert it into the target zone first.
    ///
    /// # Errors
    /// Returns [`LayoutError::Format`] when an item cannot be rendered.
    pub fn format<Tz>(&self, value: &DateTime<Tz>) -> Result<String, LayoutError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        write!(out, "{}", value.format_with_items(self.inner.format.iter()))
            .map_err(|_| LayoutError::Format { layout: self.inner.source.clone() })?;
        Ok(out)
    }

    /// Parses `input`.
    ///
    /// An offset (or unix timestamp) in the text fixes the instant. Otherwise the
    /// reading is interpreted in `zone`; layouts without a time of day yield midnight.
    ///
    /// # Errors
    /// * [`LayoutError::Parse`] if the text does not match or names an impossible date.
    /// * [`LayoutError::NonExistentLocalTime`] if the reading falls into a gap of `zone`.
    pub fn parse(&self, input: &str, zone: &Zone) -> Result<DateTime<FixedOffset>, LayoutError> {
        let parse_error = |source| LayoutError::Parse {
            input: input.to_owned(),
            layout: self.inner.source.clone(),
            source,
        };

        let mut parsed = Parsed::new();
        chrono::format::parse(&mut parsed, input, self.inner.parse.iter()).map_err(parse_error)?;

        if parsed.offset().is_some() {
            return parsed.to_datetime().map_err(parse_error);
        }
        if parsed.timestamp().is_some() {
            let utc = parsed.to_datetime_with_timezone(&Utc).map_err(parse_error)?;
            return Ok(zone.convert(&utc));
        }

        let date = parsed.to_naive_date().map_err(parse_error)?;
        let time =
            if self.inner.has_time { parsed.to_naive_time().map_err(parse_error)? } else { NaiveTime::MIN };
        zone.localize(date.and_time(time))
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.inner.syntax == other.inner.syntax && self.inner.source == other.inner.source
    }
}

impl Eq for Layout {}

impl Default for Layout {
    fn default() -> Self {
        let items = rfc3339_items(None);
        let parse = rfc3339_items(Some(Fixed::Nanosecond));
        Self::from_items(RFC3339.to_owned(), Syntax::WellKnown, items, parse)
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    /// Well-known name, then strftime (contains `%`), then reference-time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(layout) = Self::well_known(s.trim()) {
            return Ok(layout);
        }
        if s.contains('%') {
            return Self::strftime(s);
        }
        Self::reference(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.source)
    }
}

impl Serialize for Layout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner.source)
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pattern = String::deserialize(deserializer)?;
        pattern.parse().map_err(serde::de::Error::custom)
    }
}

fn rfc3339_items(fraction: Option<Fixed>) -> Vec<Item<'static>> {
    let mut items = vec![
        Item::Numeric(Numeric::Year, Pad::Zero),
        Item::Literal("-"),
        Item::Numeric(Numeric::Month, Pad::Zero),
        Item::Literal("-"),
        Item::Numeric(Numeric::Day, Pad::Zero),
        Item::Literal("T"),
        Item::Numeric(Numeric::Hour, Pad::Zero),
        Item::Literal(":"),
        Item::Numeric(Numeric::Minute, Pad::Zero),
        Item::Literal(":"),
        Item::Numeric(Numeric::Second, Pad::Zero),
    ];
    items.extend(fraction.map(Item::Fixed));
    items.push(Item::Fixed(Fixed::TimezoneOffsetColonZ));
    items
}

fn strftime_pair(pattern: &str) -> Option<(Vec<Item<'static>>, Vec<Item<'static>>)> {
    let items = StrftimeItems::new(pattern).parse_to_owned().ok()?;
    Some((items.clone(), items))
}

const fn is_field(item: &Item<'_>) -> bool {
    matches!(item, Item::Numeric(..) | Item::Fixed(_))
}

const fn is_twelve_hour(item: &Item<'_>) -> bool {
    matches!(item, Item::Numeric(Numeric::Hour12, _))
}

const fn is_meridiem(item: &Item<'_>) -> bool {
    matches!(item, Item::Fixed(Fixed::UpperAmPm | Fixed::LowerAmPm))
}

const fn is_time_field(item: &Item<'_>) -> bool {
    matches!(
        item,
        Item::Numeric(
            Numeric::Hour
                | Numeric::Hour12
                | Numeric::Minute
                | Numeric::Second
                | Numeric::Timestamp,
            _
        ) | Item::Fixed(Fixed::RFC2822 | Fixed::RFC3339)
    )
}
