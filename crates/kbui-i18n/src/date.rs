#![forbid(unsafe_code)]

//! `es-MX` date rendering.
//!
//! Two styles: `short` renders `05/03/2024`, anything else renders
//! `5 de marzo de 2024`. Inputs are resolved to a calendar date first:
//!
//! | Input                                   | Calendar date                   |
//! |-----------------------------------------|---------------------------------|
//! | `YYYY-MM-DD`                            | that date, no zone shift        |
//! | `YYYY-MM-DDTHH:MM[:SS[.fff]]`           | the wall-clock date as written  |
//! | RFC 3339 with offset                    | converted to the formatter zone |
//! | millisecond timestamp                   | converted to the formatter zone |
//!
//! Anything else is [`FormatError::InvalidDate`].

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

use crate::error::FormatError;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Spanish month name for `month` in `1..=12`.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTHS.get(idx).copied()
}

/// Rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `DD/MM/YYYY`.
    #[default]
    Short,
    /// `D de <mes> de YYYY`.
    Long,
}

impl DateStyle {
    /// `"short"` selects [`Self::Short`]; every other name selects [`Self::Long`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == "short" {
            Self::Short
        } else {
            Self::Long
        }
    }

    /// Render a calendar date.
    #[must_use]
    pub fn render(self, date: NaiveDate) -> String {
        match self {
            Self::Short => format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year()),
            Self::Long => format!(
                "{} de {} de {}",
                date.day(),
                MONTHS[date.month0() as usize],
                date.year()
            ),
        }
    }
}

/// Anything the formatter can turn into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Free text, parsed per the module table.
    Text(String),
    /// Milliseconds since the Unix epoch.
    TimestampMillis(i64),
    /// A calendar date.
    Date(NaiveDate),
    /// A wall-clock date-time.
    Local(NaiveDateTime),
    /// An instant with a known offset.
    Instant(DateTime<FixedOffset>),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        Self::TimestampMillis(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Local(value)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Instant(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value.fixed_offset())
    }
}

/// Resolves [`DateInput`]s in a fixed zone and renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    offset: FixedOffset,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl DateFormatter {
    /// Formatter that converts instants to UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    #[must_use]
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// `None` when the offset is a day or more away from UTC.
    #[must_use]
    pub fn from_utc_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::with_offset)
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The calendar date `input` denotes in this formatter's zone.
    pub fn resolve(&self, input: &DateInput) -> Result<NaiveDate, FormatError> {
        match input {
            DateInput::Text(text) => self.parse_text(text),
            DateInput::TimestampMillis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|instant| instant.with_timezone(&self.offset).date_naive())
                .ok_or_else(|| FormatError::InvalidDate(ms.to_string())),
            DateInput::Date(date) => Ok(*date),
            DateInput::Local(local) => Ok(local.date()),
            DateInput::Instant(instant) => Ok(instant.with_timezone(&self.offset).date_naive()),
        }
    }

    /// Resolve and render in `style`.
    pub fn format(&self, input: &DateInput, style: DateStyle) -> Result<String, FormatError> {
        self.resolve(input).map(|date| style.render(date))
    }

    /// Resolve and render with a style name; `None` means `"short"`.
    pub fn format_named(
        &self,
        input: &DateInput,
        format: Option<&str>,
    ) -> Result<String, FormatError> {
        let style = format.map_or(DateStyle::Short, DateStyle::from_name);
        self.format(input, style)
    }

    fn parse_text(&self, raw: &str) -> Result<NaiveDate, FormatError> {
        let text = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Ok(instant.with_timezone(&self.offset).date_naive());
        }
        NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|local| local.date())
            .ok_or_else(|| FormatError::InvalidDate(raw.to_owned()))
    }
}
