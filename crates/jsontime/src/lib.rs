//! # jsontime
//!
//! Per-field time formats and time zones for `serde_json`.
//!
//! Mark a struct with [`time_fields`] and its timestamp fields are encoded and
//! decoded with the layout and zone resolved for each field:
//!
//! * `#[time(format = "...")]` names a layout alias, a well-known layout or a
//!   strftime pattern;
//! * `#[time(zone = "...")]` names a zone alias or a zone (`UTC`, `+08:00`,
//!   `Asia/Shanghai`);
//! * anything left out falls back to the default of the active [`TimeConfig`].
//!
//! A [`Codec`] makes its config active for the duration of each call. Outside
//! a codec call fields use `rfc3339` in `UTC`.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{DateTime, TimeZone, Utc};
//! use jsontime::{TimeConfig, time_fields};
//! use serde::{Deserialize, Serialize};
//!
//! #[time_fields]
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Book {
//!     id: u32,
//!     published_at: Option<DateTime<Utc>>,
//!     #[time(zone = "UTC")]
//!     updated_at: DateTime<Utc>,
//!     #[time(format = "sql_datetime", zone = "shanghai")]
//!     created_at: DateTime<Utc>,
//! }
//!
//! # fn main() -> Result<(), jsontime::TimeError> {
//! let config = TimeConfig::builder().default_zone("Asia/Shanghai".parse()?).build();
//! config.register_format("sql_datetime", "2006-01-02 15:04:05")?;
//! config.register_zone("shanghai", "Asia/Shanghai".parse()?);
//!
//! let at = Utc.with_ymd_and_hms(2017, 12, 31, 16, 0, 0).unwrap();
//! let book = Book { id: 1, published_at: None, updated_at: at, created_at: at };
//!
//! let codec = config.codec();
//! let json = codec.to_string(&book)?;
//! assert_eq!(
//!     json,
//!     r#"{"id":1,"published_at":null,"updated_at":"2017-12-31T16:00:00Z","created_at":"2018-01-01 00:00:00"}"#
//! );
//! assert_eq!(codec.from_str::<Book>(&json)?, book);
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
extern crate self as jsontime;

mod codec;
mod config;
mod error;
pub mod field;
mod resolve;
mod scope;
mod settings;
mod timestamp;

pub use crate::codec::Codec;
pub use crate::config::{TimeConfig, TimeConfigBuilder};
pub use crate::error::TimeError;
pub use crate::field::TimeField;
pub use crate::resolve::{FieldSpec, Resolved};
pub use crate::settings::{TimeSettings, load_settings};
pub use crate::timestamp::Timestamp;
pub use jsontime_derive::time_fields;
pub use jsontime_layout as layout;
pub use jsontime_layout::{
    DATE_ONLY, DATETIME, KITCHEN, Layout, LayoutError, RFC2822, RFC3339, RFC3339_NANO, Syntax,
    TIME_ONLY, Tz, Zone,
};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
