use crate::config::TimeConfig;
use crate::error::TimeError;
use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::Value;
use std::io;

/// A JSON encoder/decoder bound to a [`TimeConfig`].
///
/// Every call makes the config active on the current thread for its duration,
/// so `#[time_fields]` structs resolve their layouts and zones against it.
/// Aliases registered on the config after the codec was created are visible
/// to later calls.
///
/// # Example
///
/// ```rust
/// use chrono::{DateTime, TimeZone, Utc};
/// use jsontime::{Codec, TimeConfig, time_fields};
/// use serde::{Deserialize, Serialize};
///
/// #[time_fields]
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Event {
///     #[time(format = "date_only")]
///     day: DateTime<Utc>,
/// }
///
/// let codec = Codec::new(TimeConfig::new());
/// let event = Event { day: Utc.with_ymd_and_hms(2022, 11, 10, 0, 0, 0).unwrap() };
///
/// let json = codec.to_string(&event).unwrap();
/// assert_eq!(json, r#"{"day":"2022-11-10"}"#);
/// assert_eq!(codec.from_str::<Event>(&json).unwrap(), event);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: TimeConfig,
}

impl Codec {
    #[must_use]
    pub const fn new(config: TimeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &TimeConfig {
        &self.config
    }

    /// # Errors
    /// Fails if `value` cannot be serialized, including time fields that do not resolve.
    pub fn to_string<T: ?Sized + Serialize>(&self, value: &T) -> Result<String, TimeError> {
        self.config.scoped(|| serde_json::to_string(value).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails if `value` cannot be serialized.
    pub fn to_string_pretty<T: ?Sized + Serialize>(&self, value: &T) -> Result<String, TimeError> {
        self.config.scoped(|| serde_json::to_string_pretty(value).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails if `value` cannot be serialized.
    pub fn to_vec<T: ?Sized + Serialize>(&self, value: &T) -> Result<Vec<u8>, TimeError> {
        self.config.scoped(|| serde_json::to_vec(value).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails if `value` cannot be serialized or the writer fails.
    pub fn to_writer<W, T>(&self, writer: W, value: &T) -> Result<(), TimeError>
    where
        W: io::Write,
        T: ?Sized + Serialize,
    {
        self.config.scoped(|| serde_json::to_writer(writer, value).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails if `value` cannot be serialized.
    pub fn to_value<T: ?Sized + Serialize>(&self, value: &T) -> Result<Value, TimeError> {
        self.config.scoped(|| serde_json::to_value(value).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails on malformed JSON or a time field that does not parse with its layout.
    pub fn from_str<'a, T: Deserialize<'a>>(&self, input: &'a str) -> Result<T, TimeError> {
        self.config.scoped(|| serde_json::from_str(input).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails on malformed JSON or a time field that does not parse with its layout.
    pub fn from_slice<'a, T: Deserialize<'a>>(&self, input: &'a [u8]) -> Result<T, TimeError> {
        self.config.scoped(|| serde_json::from_slice(input).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails on malformed JSON, a read error, or a time field that does not parse.
    pub fn from_reader<R: io::Read, T: DeserializeOwned>(&self, reader: R) -> Result<T, TimeError> {
        self.config.scoped(|| serde_json::from_reader(reader).map_err(TimeError::from))
    }

    /// # Errors
    /// Fails if `value` does not match `T`.
    pub fn from_value<T: DeserializeOwned>(&self, value: Value) -> Result<T, TimeError> {
        self.config.scoped(|| serde_json::from_value(value).map_err(TimeError::from))
    }
}

impl From<TimeConfig> for Codec {
    fn from(config: TimeConfig) -> Self {
        Self::new(config)
    }
}

impl TimeConfig {
    /// Returns a [`Codec`] sharing this config.
    #[must_use]
    pub fn codec(&self) -> Codec {
        Codec::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Zone;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[crate::time_fields]
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Ping {
        seq: u32,
        #[time(zone = "home")]
        at: DateTime<Utc>,
    }

    fn ping() -> Ping {
        Ping { seq: 3, at: Utc.with_ymd_and_hms(2020, 2, 29, 23, 0, 0).unwrap() }
    }

    #[test]
    fn test_codec_scopes_its_config() {
        let config = TimeConfig::new();
        config.register_zone("home", "+02:00".parse::<Zone>().unwrap());
        let codec = Codec::from(config);

        let json = codec.to_string(&ping()).unwrap();
        assert_eq!(json, r#"{"seq":3,"at":"2020-03-01T01:00:00+02:00"}"#);
        assert_eq!(codec.from_str::<Ping>(&json).unwrap(), ping());
    }

    #[test]
    fn test_plain_serde_json_outside_codec_uses_builtin() {
        let err = serde_json::to_string(&ping()).unwrap_err();
        assert!(err.to_string().contains("home"), "{err}");
    }

    #[test]
    fn test_value_roundtrip() {
        let codec = TimeConfig::builder().zone("home", Zone::Utc).build().codec();

        let value = codec.to_value(&ping()).unwrap();
        assert_eq!(value["at"], "2020-02-29T23:00:00Z");
        assert_eq!(codec.from_value::<Ping>(value).unwrap(), ping());
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let err = Codec::default().from_str::<Ping>("{").unwrap_err();
        assert!(matches!(err, TimeError::Json { .. }));
    }
}
