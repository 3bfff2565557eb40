use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rounded to whole minutes: "Xh Ym" or "Ym".
pub fn format_total_time(secs: f32) -> String {
    let total_minutes = (secs / 60.0).round().max(0.0) as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// "Xh Ym Zs", dropping leading zero units.
pub fn format_total_time_detailed(secs: f32) -> String {
    let total = secs.round().max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Minutes when there is at least one, seconds otherwise.
pub fn format_short_duration(secs: f32) -> String {
    let minutes = (secs / 60.0).round() as u64;
    if minutes > 0 {
        format_total_time(secs)
    } else {
        format!("{}s", secs.round().max(0.0) as u64)
    }
}

pub fn format_seconds(secs: f32) -> String {
    format!("{:.1}s", secs)
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `s` to at most `width` terminal columns, marking the cut with "…".
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_total_time() {
        assert_eq!(format_total_time(0.0), "0m");
        assert_eq!(format_total_time(89.0), "1m");
        assert_eq!(format_total_time(3600.0 + 25.0 * 60.0), "1h 25m");
    }

    #[test]
    fn test_format_total_time_detailed() {
        assert_eq!(format_total_time_detailed(42.0), "42s");
        assert_eq!(format_total_time_detailed(125.0), "2m 5s");
        assert_eq!(format_total_time_detailed(3725.0), "1h 2m 5s");
    }

    #[test]
    fn test_format_short_duration() {
        assert_eq!(format_short_duration(20.0), "20s");
        assert_eq!(format_short_duration(150.0), "3m");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short.jpg", 20), "short.jpg");
        assert_eq!(truncate_to_width("img_20261017_083005.jpg", 10), "img_20261…");
        assert_eq!(truncate_to_width("日本語の写真", 5), "日本…");
    }
}
