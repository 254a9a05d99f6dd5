//! Cell coercions. Each returns `None` on failure; callers decide whether an
//! absent value drops the row or is defaulted.

use crate::config::YearBounds;

/// Coerce a year token such as `"2020"`, `"Y2021"` or `"1990.0"`.
///
/// One leading `y`/`Y` flag is stripped, the rest is parsed as a float and
/// truncated toward zero. Values outside `bounds` are rejected.
pub fn coerce_year(token: &str, bounds: YearBounds) -> Option<i32> {
    let trimmed = token.trim();
    let digits = trimmed
        .strip_prefix('y')
        .or_else(|| trimmed.strip_prefix('Y'))
        .unwrap_or(trimmed);

    let value: f64 = digits.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let year = value.trunc();
    if !bounds.contains_f64(year) {
        return None;
    }
    Some(year as i32)
}

/// Coerce an emissions cell, stripping thousands separators (`"1,234.5"`).
/// Non-finite values are rejected.
pub fn coerce_emissions(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|&c| c != ',').collect();
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Strict numeric parse used for column type inference; no separator
/// stripping, so `"1,000"` makes a column non-numeric.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
