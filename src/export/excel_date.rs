use chrono::{NaiveDate, NaiveTime, Timelike};

/// Excel serial and number format for a `YYYY-MM-DD` date or an `HH:MM`
/// (optionally `HH:MM:SS`) time. `None` for anything else.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
        return Some(("yyyy-mm-dd", (d - epoch).num_days() as f64));
    }

    ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .map(|t| ("hh:mm", t.num_seconds_from_midnight() as f64 / 86400.0))
}
