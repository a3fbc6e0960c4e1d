use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal tag accepted in place of a numeric sales percentage.
pub const SALES_RATE_TIERED: &str = "Tiered";
/// Literal tag for staff that earn no commission.
pub const SALES_RATE_NOT_APPLICABLE: &str = "N/A";

/// Parse a currency-formatted cell (`"£1,234.56"`, `" -12.5 "`) into a number.
///
/// Every character other than ASCII digits, `.` and `-` is discarded before
/// reading the longest leading decimal number. Anything unreadable yields `0.0`;
/// the result is always finite.
pub fn parse_currency(raw: &str) -> f64 {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    leading_decimal(&stripped)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a percentage-formatted cell.
///
/// The `%` sign is dropped, not divided out: `"42.5%"` is `42.5`.
pub fn parse_percent(raw: &str) -> f64 {
    parse_currency(raw)
}

/// [`parse_currency`] over an optional cell; absence is `0.0`.
pub fn currency_or_zero(raw: Option<&str>) -> f64 {
    raw.map(parse_currency).unwrap_or(0.0)
}

/// [`parse_percent`] over an optional cell; absence is `0.0`.
pub fn percent_or_zero(raw: Option<&str>) -> f64 {
    raw.map(parse_percent).unwrap_or(0.0)
}

/// `numerator / denominator * 100`, or `0.0` when the denominator is zero.
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator * 100.0;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let digits_start = end;
    let mut saw_digit = false;
    let mut saw_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => saw_digit = true,
            b'.' if !saw_dot => saw_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !saw_digit {
        return None;
    }

    let mut normalized = String::with_capacity(end + 2);
    normalized.push_str(&s[..digits_start]);
    let body = s[digits_start..end].trim_end_matches('.');
    if body.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(body);
    normalized.parse().ok()
}

/// Commission rate of an employee.
///
/// Upstream sheets either give a percentage (stored here as a fraction in
/// `[0, 1]`) or one of two literal tags that must survive untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalesRate {
    Tag(SalesRateTag),
    Fraction(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesRateTag {
    Tiered,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl SalesRateTag {
    pub fn as_str(self) -> &'static str {
        match self {
            SalesRateTag::Tiered => SALES_RATE_TIERED,
            SalesRateTag::NotApplicable => SALES_RATE_NOT_APPLICABLE,
        }
    }
}

impl SalesRate {
    pub const TIERED: SalesRate = SalesRate::Tag(SalesRateTag::Tiered);
    pub const NOT_APPLICABLE: SalesRate = SalesRate::Tag(SalesRateTag::NotApplicable);

    /// Read a `SalesPercentage` cell.
    ///
    /// `"Tiered"` and `"N/A"` are kept as tags; anything else is percentage
    /// coerced and divided by 100.
    pub fn parse(raw: Option<&str>) -> SalesRate {
        match raw {
            Some(SALES_RATE_TIERED) => SalesRate::TIERED,
            Some(SALES_RATE_NOT_APPLICABLE) => SalesRate::NOT_APPLICABLE,
            other => SalesRate::Fraction(percent_or_zero(other) / 100.0),
        }
    }

    pub fn as_fraction(self) -> Option<f64> {
        match self {
            SalesRate::Fraction(v) => Some(v),
            SalesRate::Tag(_) => None,
        }
    }

    pub fn tag(self) -> Option<SalesRateTag> {
        match self {
            SalesRate::Tag(tag) => Some(tag),
            SalesRate::Fraction(_) => None,
        }
    }
}

impl Default for SalesRate {
    fn default() -> Self {
        SalesRate::Fraction(0.0)
    }
}

impl fmt::Display for SalesRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalesRate::Tag(tag) => f.write_str(tag.as_str()),
            SalesRate::Fraction(v) => write!(f, "{:.1}%", v * 100.0),
        }
    }
}
