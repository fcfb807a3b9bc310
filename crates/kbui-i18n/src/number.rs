#![forbid(unsafe_code)]

//! Decimal rounding and digit grouping.
//!
//! Rounding works on the shortest decimal that round-trips to the binary
//! value, which is what a reader sees in the source data. `1.005` is
//! therefore a tie and rounds to `1.01`, the way locale formatters render it.

/// Integer and fraction digits of a rounded, unsigned decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedDecimal {
    pub integer: String,
    pub fraction: String,
}

/// Round `|value|` to `fraction_digits` places, ties away from zero.
///
/// Non-finite input yields `"0"`; callers reject it before getting here.
#[must_use]
pub fn round_half_expand(value: f64, fraction_digits: u8) -> RoundedDecimal {
    let digits = usize::from(fraction_digits);
    if !value.is_finite() {
        return RoundedDecimal {
            integer: "0".to_owned(),
            fraction: "0".repeat(digits),
        };
    }
    // `Display` for f64 is the shortest round-trip form and never uses an
    // exponent.
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .map(|b| b - b'0')
        .collect();
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|&b| b >= b'5');

    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let split = kept.len() - digits;
    let to_text = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    RoundedDecimal {
        integer: to_text(&kept[..split]),
        fraction: to_text(&kept[split..]),
    }
}

/// Insert `,` every three digits from the right.
#[must_use]
pub fn group_integer(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` with two digits becomes `1,234.50`.
#[must_use]
pub fn format_grouped(value: f64, fraction_digits: u8) -> String {
    let rounded = round_half_expand(value, fraction_digits);
    let mut out = group_integer(&rounded.integer);
    if !rounded.fraction.is_empty() {
        out.push('.');
        out.push_str(&rounded.fraction);
    }
    out
}
