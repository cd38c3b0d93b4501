//! # Layout Errors
//!
//! This module defines the [`LayoutError`] enum used when compiling layouts,
//! resolving zones, and rendering or parsing timestamps.

use chrono::NaiveDateTime;
use std::borrow::Cow;

/// Errors raised by [`Layout`](crate::Layout) and [`Zone`](crate::Zone).
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The layout pattern could not be compiled.
    #[error("Invalid layout `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: Cow<'static, str> },

    /// The input text does not match the layout, or names an impossible date.
    #[error("Cannot parse `{input}` with layout `{layout}`: {source}")]
    Parse {
        input: String,
        layout: String,
        #[source]
        source: chrono::format::ParseError,
    },

    /// The layout contains items that cannot be rendered for this timestamp.
    #[error("Cannot format timestamp with layout `{layout}`")]
    Format { layout: String },

    /// The zone name is neither a known alias, an IANA name nor an offset.
    #[error("Invalid time zone `{name}`: {message}")]
    InvalidZone { name: String, message: Cow<'static, str> },

    /// The wall-clock reading falls into a gap of the zone (e.g. a DST jump).
    #[error("Local time {local} does not exist in zone {zone}")]
    NonExistentLocalTime { local: NaiveDateTime, zone: String },
}

impl LayoutError {
    pub(crate) fn invalid_pattern(
        pattern: impl Into<String>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidPattern { pattern: pattern.into(), message: message.into() }
    }

    pub(crate) fn invalid_zone(
        name: impl Into<String>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidZone { name: name.into(), message: message.into() }
    }
}
