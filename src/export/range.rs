use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse `--range` into inclusive date bounds.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `start:end` with both sides
/// in the same one of those shapes.
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(invalid(r, "start and end must have the same format"));
            }
            let (d1, _) = period_bounds(start).ok_or_else(|| invalid(r, "bad start"))?;
            let (_, d2) = period_bounds(end).ok_or_else(|| invalid(r, "bad end"))?;
            if d1 > d2 {
                return Err(invalid(r, "start is after end"));
            }
            Ok((d1, d2))
        }
        None => period_bounds(r).ok_or_else(|| invalid(r, "unsupported format")),
    }
}

fn invalid(r: &str, why: &str) -> AppError {
    AppError::Export(format!("invalid --range '{r}': {why}"))
}

/// First and last day of a year, month or single day.
fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").ok()?;
            let next = if first.month() == 12 {
                NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
            };
            Some((first, next.pred_opt()?))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2025-12").unwrap(), (d(2025, 12, 1), d(2025, 12, 31)));
        assert_eq!(parse_range("2025-03-14").unwrap(), (d(2025, 3, 14), d(2025, 3, 14)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2025-02:2025-04").unwrap(),
            (d(2025, 2, 1), d(2025, 4, 30))
        );
        assert!(parse_range("2025:2025-04").is_err());
        assert!(parse_range("2025-05-01:2025-04-01").is_err());
        assert!(parse_range("last week").is_err());
    }
}
