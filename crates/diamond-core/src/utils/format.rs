/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a chart value: baseball-style `.617` for fractions, integers otherwise
pub fn format_value(value: f64, percentage: bool) -> String {
    if percentage {
        let formatted = format!("{:.3}", value);
        match formatted.strip_prefix("0.") {
            Some(rest) => format!(".{}", rest),
            None => formatted,
        }
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Render a horizontal bar for `value` scaled into `[lo, hi]`
pub fn bar(value: f64, lo: f64, hi: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let len = if hi > lo {
        let ratio = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        // Keep the minimum visible
        1 + (ratio * (width - 1) as f64).round() as usize
    } else {
        width
    };
    "#".repeat(len)
}
