//! # Errors
//!
//! This module defines the [`TimeError`] enum returned by configuration,
//! resolution, and codec operations.

use jsontime_layout::LayoutError;

/// A specialized [`TimeError`] enum for time-format failures.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// The name is not a registered alias, a well-known layout or a strftime pattern.
    #[error("Unknown time layout `{name}`: aliases and reference-time patterns must be registered with `register_format` first")]
    UnknownLayout { name: String },

    /// The name is not a registered alias and does not parse as a zone.
    #[error("Unknown time zone `{name}`: {source}")]
    UnknownZone {
        name: String,
        #[source]
        source: LayoutError,
    },

    /// Layout compilation, rendering or parsing failed.
    #[error("Layout error: {source}")]
    Layout {
        #[from]
        source: LayoutError,
    },

    /// Failure inside the JSON engine, including field-level time errors.
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Failure while loading or merging settings sources.
    #[error("Settings error: {source}")]
    Settings {
        #[from]
        source: config::ConfigError,
    },
}
