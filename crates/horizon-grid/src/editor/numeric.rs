//! Lenient number parsing shared by the numeric editors.
//!
//! Editors accept what a user is likely to type into a cell: leading
//! whitespace, an optional sign, and trailing junk after the number
//! (`"42px"` reads as 42). Text with no leading number reads as `None`.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid integer pattern"));

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid float pattern")
});

/// Parses the integer at the start of `text`.
pub(crate) fn parse_int_prefix(text: &str) -> Option<i64> {
    LEADING_INT
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Parses the decimal number at the start of `text`.
pub(crate) fn parse_float_prefix(text: &str) -> Option<f64> {
    LEADING_FLOAT
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Returns `true` if the whole of `text`, trimmed, is an integer.
pub(crate) fn is_integer_text(text: &str) -> bool {
    text.trim().parse::<i64>().is_ok()
}

/// Returns `true` if the whole of `text`, trimmed, is a finite number.
pub(crate) fn is_number_text(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

/// Rounds `value` to `places` decimal places.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
