//! Reusable formatting utilities for CLI output

use chrono::{DateTime, Utc};

/// Format an optional timestamp as a local date/time string.
///
/// Returns "N/A" when no timestamp is present.
pub fn format_datetime(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "N/A".to_string(),
    }
}

/// Format a byte count for display.
///
/// Returns "N/A" when no size is recorded.
pub fn format_bytes(size: Option<u64>) -> String {
    let Some(bytes) = size else {
        return "N/A".to_string();
    };

    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;

    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Shorten a string for a table cell, appending an ellipsis when truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Render an optional value, falling back to a dash.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
