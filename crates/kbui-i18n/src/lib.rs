#![forbid(unsafe_code)]

//! Locale formatting for the KoreBase UI adapter.
//!
//! Renders amounts and dates the way the `es-MX` locale does: `,` groups
//! every three integer digits, `.` separates fractions, the peso is written
//! as `$` while foreign currencies use their ISO code, and dates read
//! day-first with Spanish month names.
//!
//! # How it fits in the system
//! The widgets crate exposes [`format_currency`] and [`DateFormatter`] to the
//! host page unchanged. Errors are typed ([`FormatError`]) and are meant to
//! reach whoever called the formatter; nothing here logs and swallows.

pub mod currency;
pub mod date;
pub mod error;
pub mod number;

pub use currency::{Currency, DEFAULT_CURRENCY, format_currency};
pub use date::{DateFormatter, DateInput, DateStyle, month_name};
pub use error::FormatError;
pub use number::{group_integer, round_half_expand};

/// Locale tag whose conventions this crate reproduces.
pub const LOCALE: &str = "es-MX";
