//! Field-level encode and decode.
//!
//! The functions here are what `#[time_fields]` wires into `serde(with = ...)`.
//! They resolve the field's [`FieldSpec`] against the active [`TimeConfig`](crate::TimeConfig)
//! of the current thread and can also be called by hand.

use crate::error::TimeError;
use crate::resolve::{FieldSpec, Resolved};
use crate::scope;
use crate::timestamp::Timestamp;
use chrono::{DateTime, FixedOffset, Local, Utc};
use jsontime_layout::Tz;
use serde::{Deserialize, Deserializer, Serializer, de, ser};

/// Renders `value` with the layout and zone resolved for `spec`.
///
/// # Errors
/// Returns a [`TimeError`] if resolution or rendering fails.
pub fn encode<T: Timestamp>(value: &T, spec: &FieldSpec<'_>) -> Result<String, TimeError> {
    scope::with_active(|config| -> Result<String, TimeError> {
        let Resolved { layout, zone } = config.resolve(spec)?;
        Ok(layout.format(&value.in_zone(&zone))?)
    })
}

/// Parses `text` with the layout and zone resolved for `spec`.
///
/// # Errors
/// Returns a [`TimeError`] if resolution fails or `text` is not a valid
/// timestamp for the layout.
pub fn decode<T: Timestamp>(text: &str, spec: &FieldSpec<'_>) -> Result<T, TimeError> {
    scope::with_active(|config| -> Result<T, TimeError> {
        let Resolved { layout, zone } = config.resolve(spec)?;
        let parsed = layout.parse(text, &zone)?;
        Ok(T::from_parsed(parsed, &zone))
    })
}

/// A field type the annotation macro knows how to route.
///
/// Implemented for the supported [`DateTime`] types and for `Option` of each,
/// where `None` maps to JSON `null`.
pub trait TimeField: Sized {
    /// # Errors
    /// Fails with `S::Error` when the timestamp cannot be rendered.
    fn serialize_field<S>(&self, spec: &FieldSpec<'_>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer;

    /// # Errors
    /// Fails with `D::Error` when the input is not a valid timestamp string.
    fn deserialize_field<'de, D>(spec: &FieldSpec<'_>, deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>;
}

macro_rules! impl_time_field {
    ($($ty:ty),* $(,)?) => {$(
        impl TimeField for $ty {
            fn serialize_field<S>(&self, spec: &FieldSpec<'_>, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let text = encode(self, spec).map_err(ser::Error::custom)?;
                serializer.serialize_str(&text)
            }

            fn deserialize_field<'de, D>(spec: &FieldSpec<'_>, deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let text = String::deserialize(deserializer)?;
                decode(&text, spec).map_err(de::Error::custom)
            }
        }

        impl TimeField for Option<$ty> {
            fn serialize_field<S>(&self, spec: &FieldSpec<'_>, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match self {
                    Some(value) => value.serialize_field(spec, serializer),
                    None => serializer.serialize_none(),
                }
            }

            fn deserialize_field<'de, D>(spec: &FieldSpec<'_>, deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                Option::<String>::deserialize(deserializer)?
                    .map(|text| decode(&text, spec).map_err(de::Error::custom))
                    .transpose()
            }
        }
    )*};
}

impl_time_field!(DateTime<Utc>, DateTime<FixedOffset>, DateTime<Local>, DateTime<Tz>);
