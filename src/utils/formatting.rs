//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Hours as reported by the access-control system, shown as `03h 30m`.
/// Missing hours render as `--`.
pub fn hours2readable(hours: Option<f64>) -> String {
    let Some(h) = hours else {
        return "--".to_string();
    };
    let total_minutes = (h * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.abs();
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}

/// Optional wall-clock value, `--:--` when missing.
pub fn time_or_placeholder(t: Option<&str>) -> String {
    match t {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "--:--".to_string(),
    }
}

/// Cut a free-text value to `max` characters, marking the cut with '…'.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_are_rounded_to_minutes() {
        assert_eq!(hours2readable(Some(3.5)), "03h 30m");
        assert_eq!(hours2readable(Some(0.0)), "00h 00m");
        assert_eq!(hours2readable(Some(1.999)), "02h 00m");
        assert_eq!(hours2readable(None), "--");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("atestado", 20), "atestado");
        assert_eq!(truncate("atestado médico", 6), "atest…");
    }
}
