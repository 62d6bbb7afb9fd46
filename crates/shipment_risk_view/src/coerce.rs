//! Primitive coercers.
//!
//! Each function is total: it accepts any JSON value and returns a
//! well-typed result, substituting the fallback instead of failing.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex_lite::Regex;
use serde_json::Value;

use crate::model::RiskLevel;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("float prefix regex")
});

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})(?:T(\d{2}):(\d{2}):(\d{2})(?:\.\d{1,3})?(Z|[+-](\d{2}):?(\d{2}))?)?$",
    )
    .expect("iso date regex")
});

static SLUG_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("slug strip regex"));

static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("slug separator regex"));

/// Finite numbers pass through; numeric strings are parsed from their
/// leading numeric prefix (`"42%"` is 42). Everything else is `fallback`.
#[must_use]
pub fn to_number(value: &Value, fallback: f64) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_float(text),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(fallback)
}

fn parse_float(text: &str) -> Option<f64> {
    let prefix = FLOAT_PREFIX.find(text.trim_start())?;
    prefix.as_str().parse::<f64>().ok()
}

/// Like [`to_number`] but distinguishes "not supplied" from zero.
#[must_use]
pub fn to_optional_number(value: &Value) -> Option<f64> {
    let n = to_number(value, f64::NAN);
    n.is_finite().then_some(n)
}

/// Strings pass through; numbers and booleans are stringified.
#[must_use]
pub fn to_string(value: &Value, fallback: &str) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => fallback.to_string(),
    }
}

#[must_use]
pub fn to_array(value: &Value) -> &[Value] {
    value.as_array().map_or(&[], Vec::as_slice)
}

/// Booleans pass through; `"true"`, `"yes"`, and `"1"` strings count as true.
#[must_use]
pub fn to_bool(value: &Value, fallback: bool) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => fallback,
    }
}

/// Non-finite input maps to `min`, never `max`.
#[must_use]
pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    if !n.is_finite() {
        return min;
    }
    n.max(min).min(max)
}

/// Half-up rounding to `decimals` places; non-finite input yields 0.
#[must_use]
pub fn round(n: f64, decimals: u32) -> f64 {
    if !n.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    let rounded = (n * factor + 0.5).floor() / factor;
    if rounded.is_finite() { rounded } else { n }
}

/// Values in (1, 100] are already percentages; anything else is treated
/// as a fraction and scaled by 100. The result is always in [0, 100].
#[must_use]
pub fn to_percent(value: &Value) -> f64 {
    let n = to_number(value, 0.0);
    if n > 1.0 && n <= 100.0 {
        clamp(n, 0.0, 100.0)
    } else {
        clamp(n * 100.0, 0.0, 100.0)
    }
}

/// Strict ISO-8601 check: the text must match the pattern AND name a
/// real calendar date and wall-clock time.
#[must_use]
pub fn is_valid_iso_date(value: &Value) -> bool {
    value.as_str().is_some_and(is_valid_iso_str)
}

#[must_use]
pub fn is_valid_iso_str(text: &str) -> bool {
    let Some(caps) = ISO_DATE.captures(text) else {
        return false;
    };
    let field = |index: usize| -> Option<u32> { caps.get(index)?.as_str().parse().ok() };

    let (Some(year), Some(month), Some(day)) = (field(1), field(2), field(3)) else {
        return false;
    };
    if NaiveDate::from_ymd_opt(year as i32, month, day).is_none() {
        return false;
    }
    if let (Some(hour), Some(minute)) = (field(4), field(5)) {
        let second = field(6).unwrap_or(0);
        if NaiveTime::from_hms_opt(hour, minute, second).is_none() {
            return false;
        }
    }
    match (field(8), field(9)) {
        (Some(offset_hours), Some(offset_minutes)) => offset_hours < 24 && offset_minutes < 60,
        _ => true,
    }
}

/// Stable identifier synthesized from free text.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(lowered.trim(), "");
    let joined = SLUG_SEPARATORS.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

#[must_use]
pub fn normalize_risk_level(value: &Value) -> RiskLevel {
    let raw = to_string(value, "");
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let titled = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    match titled.as_str() {
        "Low" => RiskLevel::Low,
        "Medium" => RiskLevel::Medium,
        "High" => RiskLevel::High,
        "Critical" => RiskLevel::Critical,
        _ => RiskLevel::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn to_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(to_number(&json!(4.5), 0.0), 4.5);
        assert_eq!(to_number(&json!("  12.5"), 0.0), 12.5);
        assert_eq!(to_number(&json!("42%"), 0.0), 42.0);
        assert_eq!(to_number(&json!("-3e2"), 0.0), -300.0);
        assert_eq!(to_number(&json!(".5"), 0.0), 0.5);
    }

    #[test]
    fn to_number_falls_back_on_garbage() {
        assert_eq!(to_number(&json!("abc"), 7.0), 7.0);
        assert_eq!(to_number(&json!("Infinity"), 7.0), 7.0);
        assert_eq!(to_number(&json!("NaN"), 7.0), 7.0);
        assert_eq!(to_number(&json!(true), 7.0), 7.0);
        assert_eq!(to_number(&json!(null), 7.0), 7.0);
        assert_eq!(to_number(&json!([1]), 7.0), 7.0);
        assert_eq!(to_number(&json!("1e999"), 7.0), 7.0);
    }

    #[test]
    fn to_optional_number_keeps_absence_distinct_from_zero() {
        assert_eq!(to_optional_number(&json!(0)), Some(0.0));
        assert_eq!(to_optional_number(&json!(null)), None);
        assert_eq!(to_optional_number(&json!("n/a")), None);
    }

    #[test]
    fn to_string_stringifies_scalars_only() {
        assert_eq!(to_string(&json!("MSC"), "x"), "MSC");
        assert_eq!(to_string(&json!(42), "x"), "42");
        assert_eq!(to_string(&json!(false), "x"), "false");
        assert_eq!(to_string(&json!(null), "x"), "x");
        assert_eq!(to_string(&json!({"a": 1}), "x"), "x");
    }

    #[test]
    fn to_array_is_identity_for_arrays_only() {
        assert_eq!(to_array(&json!([1, 2])).len(), 2);
        assert!(to_array(&json!({"0": 1})).is_empty());
        assert!(to_array(&json!("[]")).is_empty());
    }

    #[test]
    fn clamp_maps_non_finite_to_min() {
        assert_eq!(clamp(f64::NAN, 1.0, 9.0), 1.0);
        assert_eq!(clamp(f64::INFINITY, 0.0, 100.0), 0.0);
        assert_eq!(clamp(f64::NEG_INFINITY, 0.0, 100.0), 0.0);
        assert_eq!(clamp(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(-3.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn round_is_half_up() {
        assert_eq!(round(2.45, 1), 2.5);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -2.0);
        assert_eq!(round(41.99999, 1), 42.0);
        assert_eq!(round(f64::NAN, 2), 0.0);
    }

    #[test]
    fn to_percent_infers_units() {
        assert_eq!(to_percent(&json!(0.42)), 42.0);
        assert_eq!(to_percent(&json!(42)), 42.0);
        assert_eq!(to_percent(&json!(1)), 100.0);
        assert_eq!(to_percent(&json!(100)), 100.0);
        assert_eq!(to_percent(&json!(250)), 100.0);
        assert_eq!(to_percent(&json!(-0.5)), 0.0);
        assert_eq!(to_percent(&json!("0.5")), 50.0);
        assert_eq!(to_percent(&json!(null)), 0.0);
    }

    #[test]
    fn iso_dates_require_pattern_and_real_calendar_values() {
        for ok in [
            "2024-01-01",
            "2024-02-29",
            "2024-01-01T10:00:00Z",
            "2024-01-01T10:00:00.123Z",
            "2024-01-01T10:00:00+05:30",
            "2024-01-01T10:00:00-0800",
        ] {
            assert!(is_valid_iso_str(ok), "{ok} should be accepted");
        }
        for bad in [
            "not-a-date",
            "01/02/2024",
            "Jan 1 2024",
            "2024-13-01",
            "2023-02-29",
            "2024-01-01T25:00:00Z",
            "2024-01-01 10:00:00",
            "2024-01-01T10:00",
            "2024-01-01T10:00Z",
            "2024-01-01T10:00:00.1234Z",
            "2024-1-1",
            "",
        ] {
            assert!(!is_valid_iso_str(bad), "{bad} should be rejected");
        }
        assert!(!is_valid_iso_date(&json!(20240101)));
    }

    #[test]
    fn slugify_produces_stable_identifiers() {
        assert_eq!(slugify("  Reroute via Colombo! "), "reroute-via-colombo");
        assert_eq!(slugify("Buy_Extra   Cover"), "buy-extra-cover");
        assert_eq!(slugify("--Delay -- 7 days--"), "delay-7-days");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn risk_levels_are_title_cased_into_fixed_set() {
        assert_eq!(normalize_risk_level(&json!(" high ")), RiskLevel::High);
        assert_eq!(normalize_risk_level(&json!("CRITICAL")), RiskLevel::Critical);
        assert_eq!(normalize_risk_level(&json!("medium")), RiskLevel::Medium);
        assert_eq!(normalize_risk_level(&json!("low")), RiskLevel::Low);
        assert_eq!(normalize_risk_level(&json!("severe")), RiskLevel::Unknown);
        assert_eq!(normalize_risk_level(&json!(3)), RiskLevel::Unknown);
        assert_eq!(normalize_risk_level(&json!(null)), RiskLevel::Unknown);
    }

    #[test]
    fn to_bool_accepts_common_spellings() {
        assert!(to_bool(&json!(true), false));
        assert!(to_bool(&json!("Yes"), false));
        assert!(!to_bool(&json!("no"), true));
        assert!(to_bool(&json!(null), true));
    }
}
