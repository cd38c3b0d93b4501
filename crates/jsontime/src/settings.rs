//! # Settings
//!
//! File and environment driven construction of a [`TimeConfig`].

use crate::config::TimeConfig;
use crate::error::TimeError;
use config::{Config, Environment, File};
use jsontime_layout::{Layout, Zone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_SETTINGS_FILE: &str = "jsontime";
const ENV_PREFIX: &str = "JSONTIME";

/// Declarative form of a [`TimeConfig`].
///
/// ```toml
/// format = "rfc3339"
/// zone = "Asia/Shanghai"
///
/// [formats]
/// sql_datetime = "2006-01-02 15:04:05"
///
/// [zones]
/// shanghai = "Asia/Shanghai"
/// ```
///
/// Layouts are written as a well-known name, a strftime pattern or a
/// reference-time pattern. Zones as `UTC`, `Local`, an offset or an IANA name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    /// Default layout.
    pub format: String,
    /// Default zone.
    pub zone: String,
    /// Layout aliases.
    pub formats: BTreeMap<String, String>,
    /// Zone aliases.
    pub zones: BTreeMap<String, String>,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            format: jsontime_layout::RFC3339.to_owned(),
            zone: Zone::Utc.to_string(),
            formats: BTreeMap::new(),
            zones: BTreeMap::new(),
        }
    }
}

impl TryFrom<TimeSettings> for TimeConfig {
    type Error = TimeError;

    fn try_from(settings: TimeSettings) -> Result<Self, Self::Error> {
        let mut builder = Self::builder()
            .default_layout(settings.format.parse()?)
            .default_zone(parse_zone(&settings.zone)?);

        for (name, pattern) in &settings.formats {
            let layout: Layout = pattern.parse()?;
            builder = builder.layout(name, layout);
        }
        for (name, zone) in &settings.zones {
            builder = builder.zone(name, parse_zone(zone)?);
        }

        Ok(builder.build())
    }
}

fn parse_zone(name: &str) -> Result<Zone, TimeError> {
    name.parse().map_err(|source| TimeError::UnknownZone { name: name.to_owned(), source })
}

/// Loads [`TimeSettings`] from a file overlaid with environment variables and
/// builds a [`TimeConfig`] from them.
///
/// 1. **File**: `path` if given (must exist), otherwise an optional `jsontime.*`
///    in the working directory. The format follows the extension.
/// 2. **Environment**: variables prefixed with `JSONTIME__`, nested with `__`
///    (`JSONTIME__ZONE`, `JSONTIME__FORMATS__SQL_DATETIME`).
///
/// # Errors
/// * [`TimeError::Settings`] if a source cannot be read or deserialized.
/// * [`TimeError::Layout`] / [`TimeError::UnknownZone`] if a value does not compile.
///
/// # Example
/// ```rust,no_run
/// use jsontime::load_settings;
///
/// let config = load_settings(Some("config/jsontime.toml")).unwrap();
/// let codec = config.codec();
/// ```
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<TimeConfig, TimeError> {
    let file = match &path {
        Some(path) => {
            info!("Loading time settings from {}", path.as_ref().display());
            File::from(path.as_ref()).required(true)
        },
        None => {
            debug!("Loading optional time settings from `{DEFAULT_SETTINGS_FILE}`");
            File::with_name(DEFAULT_SETTINGS_FILE).required(false)
        },
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        )
        .build()?
        .try_deserialize::<TimeSettings>()?;

    debug!(
        format = %settings.format,
        zone = %settings.zone,
        formats = settings.formats.len(),
        zones = settings.zones.len(),
        "Time settings loaded"
    );

    TimeConfig::try_from(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_builtin_config() {
        let config = TimeConfig::try_from(TimeSettings::default()).unwrap();
        assert_eq!(config.default_layout(), Layout::default());
        assert_eq!(config.default_zone(), Zone::Utc);
    }

    #[test]
    fn test_settings_register_aliases() {
        let settings = TimeSettings {
            format: "date_only".into(),
            zone: "Asia/Shanghai".into(),
            formats: BTreeMap::from([("sql_datetime".into(), "2006-01-02 15:04:05".into())]),
            zones: BTreeMap::from([("kyiv".into(), "Europe/Kyiv".into())]),
        };
        let config = TimeConfig::try_from(settings).unwrap();

        assert_eq!(config.default_layout().source(), "date_only");
        assert_eq!(config.layout("sql_datetime").unwrap().source(), "2006-01-02 15:04:05");
        assert_eq!(config.zone("kyiv").unwrap().to_string(), "Europe/Kyiv");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let bad_zone = TimeSettings { zone: "Mars/Olympus".into(), ..TimeSettings::default() };
        assert!(matches!(TimeConfig::try_from(bad_zone), Err(TimeError::UnknownZone { .. })));

        let bad_format = TimeSettings {
            formats: BTreeMap::from([("broken".into(), "%Q".into())]),
            ..TimeSettings::default()
        };
        assert!(matches!(TimeConfig::try_from(bad_format), Err(TimeError::Layout { .. })));
    }

    #[test]
    fn test_missing_required_file_fails() {
        let err = load_settings(Some("/definitely/not/here/jsontime.toml")).unwrap_err();
        assert!(matches!(err, TimeError::Settings { .. }));
    }
}
