#![forbid(unsafe_code)]

//! Currency lookup and `es-MX` currency rendering.

use crate::error::FormatError;
use crate::number::format_grouped;

/// Currency used when the caller does not name one.
pub const DEFAULT_CURRENCY: &str = "MXN";

/// No-break space between an ISO code and the amount.
const CODE_SEPARATOR: char = '\u{a0}';

/// Active ISO 4217 codes and their minor units.
#[rustfmt::skip]
const ISO_4217: &[(&str, u8)] = &[
    ("AED", 2), ("AFN", 2), ("ALL", 2), ("AMD", 2), ("ANG", 2), ("AOA", 2),
    ("ARS", 2), ("AUD", 2), ("AWG", 2), ("AZN", 2), ("BAM", 2), ("BBD", 2),
    ("BDT", 2), ("BGN", 2), ("BHD", 3), ("BIF", 0), ("BMD", 2), ("BND", 2),
    ("BOB", 2), ("BOV", 2), ("BRL", 2), ("BSD", 2), ("BTN", 2), ("BWP", 2),
    ("BYN", 2), ("BZD", 2), ("CAD", 2), ("CDF", 2), ("CHE", 2), ("CHF", 2),
    ("CHW", 2), ("CLF", 4), ("CLP", 0), ("CNY", 2), ("COP", 2), ("COU", 2),
    ("CRC", 2), ("CUP", 2), ("CVE", 2), ("CZK", 2), ("DJF", 0), ("DKK", 2),
    ("DOP", 2), ("DZD", 2), ("EGP", 2), ("ERN", 2), ("ETB", 2), ("EUR", 2),
    ("FJD", 2), ("FKP", 2), ("GBP", 2), ("GEL", 2), ("GHS", 2), ("GIP", 2),
    ("GMD", 2), ("GNF", 0), ("GTQ", 2), ("GYD", 2), ("HKD", 2), ("HNL", 2),
    ("HTG", 2), ("HUF", 2), ("IDR", 2), ("ILS", 2), ("INR", 2), ("IQD", 3),
    ("IRR", 2), ("ISK", 0), ("JMD", 2), ("JOD", 3), ("JPY", 0), ("KES", 2),
    ("KGS", 2), ("KHR", 2), ("KMF", 0), ("KPW", 2), ("KRW", 0), ("KWD", 3),
    ("KYD", 2), ("KZT", 2), ("LAK", 2), ("LBP", 2), ("LKR", 2), ("LRD", 2),
    ("LSL", 2), ("LYD", 3), ("MAD", 2), ("MDL", 2), ("MGA", 2), ("MKD", 2),
    ("MMK", 2), ("MNT", 2), ("MOP", 2), ("MRU", 2), ("MUR", 2), ("MVR", 2),
    ("MWK", 2), ("MXN", 2), ("MXV", 2), ("MYR", 2), ("MZN", 2), ("NAD", 2),
    ("NGN", 2), ("NIO", 2), ("NOK", 2), ("NPR", 2), ("NZD", 2), ("OMR", 3),
    ("PAB", 2), ("PEN", 2), ("PGK", 2), ("PHP", 2), ("PKR", 2), ("PLN", 2),
    ("PYG", 0), ("QAR", 2), ("RON", 2), ("RSD", 2), ("RUB", 2), ("RWF", 0),
    ("SAR", 2), ("SBD", 2), ("SCR", 2), ("SDG", 2), ("SEK", 2), ("SGD", 2),
    ("SHP", 2), ("SLE", 2), ("SOS", 2), ("SRD", 2), ("SSP", 2), ("STN", 2),
    ("SVC", 2), ("SYP", 2), ("SZL", 2), ("THB", 2), ("TJS", 2), ("TMT", 2),
    ("TND", 3), ("TOP", 2), ("TRY", 2), ("TTD", 2), ("TWD", 2), ("TZS", 2),
    ("UAH", 2), ("UGX", 0), ("USD", 2), ("USN", 2), ("UYI", 0), ("UYU", 2),
    ("UYW", 4), ("UZS", 2), ("VED", 2), ("VES", 2), ("VND", 0), ("VUV", 0),
    ("WST", 2), ("XAF", 0), ("XCD", 2), ("XOF", 0), ("XPF", 0), ("YER", 2),
    ("ZAR", 2), ("ZMW", 2), ("ZWG", 2),
];

/// A recognized currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    code: &'static str,
    minor_units: u8,
}

impl Currency {
    /// Resolve a code case-insensitively.
    pub fn from_code(code: &str) -> Result<Self, FormatError> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(FormatError::MalformedCurrency(code.to_owned()));
        }
        let upper = code.to_ascii_uppercase();
        ISO_4217
            .iter()
            .find(|(c, _)| *c == upper)
            .map(|&(code, minor_units)| Self { code, minor_units })
            .ok_or(FormatError::UnknownCurrency(upper))
    }

    /// Upper-case ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        self.code
    }

    /// Fraction digits rendered for this currency.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        self.minor_units
    }

    /// Prefix used by `es-MX`: the local peso gets `$`, everything else its
    /// code followed by a no-break space.
    #[must_use]
    pub fn symbol(self) -> String {
        if self.code == DEFAULT_CURRENCY {
            "$".to_owned()
        } else {
            format!("{}{CODE_SEPARATOR}", self.code)
        }
    }

    /// Render `amount` in this currency.
    pub fn format(self, amount: f64) -> Result<String, FormatError> {
        if !amount.is_finite() {
            return Err(FormatError::NonFiniteAmount);
        }
        let sign = if amount.is_sign_negative() { "-" } else { "" };
        Ok(format!(
            "{sign}{}{}",
            self.symbol(),
            format_grouped(amount, self.minor_units)
        ))
    }
}

/// Render `amount` as `es-MX` currency; `None` means pesos.
///
/// ```
/// use kbui_i18n::format_currency;
///
/// assert_eq!(format_currency(1234.5, None).unwrap(), "$1,234.50");
/// assert!(format_currency(1.0, Some("ZZZ")).is_err());
/// ```
pub fn format_currency(amount: f64, currency: Option<&str>) -> Result<String, FormatError> {
    Currency::from_code(currency.unwrap_or(DEFAULT_CURRENCY))?.format(amount)
}
