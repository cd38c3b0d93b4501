//! # Layouts
//!
//! Compiled time layouts and time zones used to render timestamps to text and
//! parse them back.
//!
//! A [`Layout`] is written in one of three ways:
//! * a well-known name: `rfc3339`, `rfc3339_nano`, `rfc2822`, `datetime`,
//!   `date_only`, `time_only`, `kitchen`;
//! * a strftime pattern: `%Y-%m-%d %H:%M:%S`;
//! * a reference-time pattern: `2006-01-02 15:04:05`.
//!
//! A [`Zone`] is `UTC`, `Local`, a fixed offset (`+08:00`) or an IANA name
//! (`Asia/Shanghai`).
//!
//! This crate knows nothing about serde fields or aliases; see `jsontime` for that.
//!
//! ## Example
//!
//! ```rust
//! use jsontime_layout::{Layout, Zone};
//!
//! let sql = Layout::reference("2006-01-02 15:04:05").unwrap();
//! let utc: Zone = "UTC".parse().unwrap();
//!
//! let at = sql.parse("2018-01-01 00:00:00", &utc).unwrap();
//! assert_eq!(sql.format(&at).unwrap(), "2018-01-01 00:00:00");
//! ```

mod error;
mod layout;
mod reference;
mod zone;

pub use crate::error::LayoutError;
pub use crate::layout::{
    DATE_ONLY, DATETIME, KITCHEN, Layout, RFC2822, RFC3339, RFC3339_NANO, Syntax, TIME_ONLY,
};
pub use crate::zone::Zone;
pub use chrono_tz::Tz;
