//! Small shared helpers for ASS text emission

/// Format a number for an ASS override tag or style field
///
/// Rounds to `decimals` places, then strips trailing zeros and a trailing
/// decimal point, so integral values carry no fractional part. The sign is
/// preserved except for negative zero, which normalizes to `0`.
///
/// # Examples
///
/// ```rust
/// use kara_core::utils::format_num;
///
/// assert_eq!(format_num(1.2, 2), "1.2");
/// assert_eq!(format_num(2.0, 2), "2");
/// assert_eq!(format_num(-0.05, 2), "-0.05");
/// assert_eq!(format_num(1.006, 2), "1.01");
/// ```
#[must_use]
pub fn format_num(value: f64, decimals: usize) -> String {
    let mut s = format!("{value:.decimals$}");
    if s.contains('.') {
        s.truncate(s.trim_end_matches('0').trim_end_matches('.').len());
    }
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}
