/// Format seconds as `M:SS`.
///
/// Both components are floored and minutes never roll over into hours.
/// Negative, NaN and infinite input render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Position as a percentage of the duration, always within `[0, 100]`.
///
/// An unknown, zero or otherwise unusable duration yields `0`.
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / duration * 100.0).clamp(0.0, 100.0)
}
