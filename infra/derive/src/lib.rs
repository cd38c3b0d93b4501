#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for `jsontime`. Use them through the `jsontime` re-export;
//! the generated code refers to `::jsontime` paths.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro routing the timestamp fields of a struct through `jsontime`.
///
/// Place it above `#[derive(Serialize, Deserialize)]`. Every field whose type is
/// `DateTime<..>` or `Option<DateTime<..>>`, and every field carrying
/// `#[time(..)]`, is rewritten to `#[serde(with = "..")]` pointing at a generated
/// hidden module. The module resolves the field's layout and zone against the
/// active `TimeConfig` at encode/decode time.
///
/// # Field attributes
///
/// * `#[time(format = "...")]` - a layout alias, a well-known layout name or a
///   strftime pattern.
/// * `#[time(zone = "...")]` - a zone alias or a zone (`UTC`, `+08:00`, `Asia/Shanghai`).
/// * `#[time(skip)]` - leave the field to serde.
///
/// `Option` fields also get `#[serde(default)]`, so a missing key decodes to `None`.
/// Unannotated timestamp fields that already use `serde(with)` are left alone.
///
/// # Errors
/// Emits a compile-time error for non-structs, tuple or unit structs, unknown or
/// duplicate keys, non-string values, `skip` mixed with other keys, and
/// annotated fields that already carry `serde(with)`, `serialize_with` or
/// `deserialize_with`.
///
/// # Example
///
/// ```rust,ignore
/// use chrono::{DateTime, Utc};
/// use jsontime::time_fields;
///
/// #[time_fields]
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Book {
///     #[time(format = "sql_datetime", zone = "shanghai")]
///     created_at: DateTime<Utc>,
///     updated_at: Option<DateTime<Utc>>,
/// }
/// ```
#[proc_macro_attribute]
pub fn time_fields(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::time_fields::expand_time_fields(args.into(), input).into()
}
