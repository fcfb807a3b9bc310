#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised by the formatting utilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The currency code is not three ASCII letters.
    #[error("invalid currency code: {0:?}")]
    MalformedCurrency(String),
    /// Well-formed, but not an ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
    /// NaN or infinite amounts cannot be rendered as money.
    #[error("amount is not a finite number")]
    NonFiniteAmount,
    /// The value cannot be interpreted as a date.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}
