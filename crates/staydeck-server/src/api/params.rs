//! Lenient query-parameter parsing. Dashboard clients send whatever is in
//! the URL bar; invalid values are ignored or defaulted, never a 4xx.

use chrono::NaiveDate;
use review_feed_models::{ReviewType, SortKey};

/// Finite number or nothing.
pub fn opt_num(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Number with a default. Fractional input truncates toward zero.
pub fn num_or(value: &Option<String>, default: i64) -> i64 {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .unwrap_or(default)
}

/// Non-empty string or nothing.
pub fn opt_str(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

/// One of the three review types; anything else is ignored.
pub fn opt_review_type(value: &Option<String>) -> Option<ReviewType> {
    value.as_deref().and_then(ReviewType::parse)
}

/// `YYYY-MM-DD` or nothing.
pub fn opt_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// Sort key, defaulting to newest-first.
pub fn sort_key(value: &Option<String>) -> SortKey {
    value
        .as_deref()
        .and_then(SortKey::parse)
        .unwrap_or_default()
}
