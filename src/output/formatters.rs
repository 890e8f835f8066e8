//! Formatting helpers for table cells

use chrono::DateTime;

/// Format a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM` UTC.
///
/// Steam uses `0` for "never", which renders as `N/A`.
pub fn format_unix_time(secs: i64) -> String {
    if secs <= 0 {
        return "N/A".to_string();
    }
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

/// Format playtime given in minutes.
///
/// # Example output
/// - `12h 5m`
/// - `45m`
/// - `never`
pub fn format_playtime(minutes: u64) -> String {
    if minutes == 0 {
        return "never".to_string();
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Truncate to `max_chars`, ending with `...` when cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unix_time() {
        // 2025-01-15 12:00:00 UTC
        assert_eq!(format_unix_time(1736942400), "2025-01-15 12:00");
        assert_eq!(format_unix_time(0), "N/A");
        assert_eq!(format_unix_time(-5), "N/A");
    }

    #[test]
    fn test_format_playtime() {
        assert_eq!(format_playtime(0), "never");
        assert_eq!(format_playtime(45), "45m");
        assert_eq!(format_playtime(725), "12h 5m");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ÄÖÜäöüßÄÖÜ", 6), "ÄÖÜ...");
    }
}
