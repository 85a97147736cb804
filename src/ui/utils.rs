use unicode_width::UnicodeWidthChar;

/// Safely truncate string to max display width, appending "…" if truncated 🛡️
pub fn truncate(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out + "…"
}

/// `m:ss`, or `-:--` while the duration is unknown
pub fn format_time(secs: Option<f64>) -> String {
    match secs {
        Some(secs) if secs.is_finite() && secs >= 0.0 => {
            let whole = secs.floor() as u64;
            format!("{}:{:02}", whole / 60, whole % 60)
        }
        _ => "-:--".to_string(),
    }
}
