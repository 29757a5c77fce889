//! Access-control source backed by the CSV exports of the turnstile system.
//!
//! One file per group: `<dir>/<group_id>.csv`, with header
//! `student_id,date,entry_time,exit_time,total_hours`. Times and hours are
//! passed through as exported; nothing is computed here.

use crate::core::sources::AccessControlSource;
use crate::errors::{AppError, AppResult};
use crate::models::access::AccessRecord;
use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Deserialize)]
struct AccessRow {
    student_id: i64,
    date: String,
    entry_time: Option<String>,
    exit_time: Option<String>,
    total_hours: Option<f64>,
}

fn group_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid group id regex"))
}

pub struct CsvAccessLog {
    dir: PathBuf,
}

impl CsvAccessLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the export for a group. Rejects identifiers that could
    /// escape the export directory.
    pub fn group_file(&self, group_id: &str) -> AppResult<PathBuf> {
        if !group_id_pattern().is_match(group_id) {
            return Err(AppError::Config(format!(
                "invalid access-control group identifier '{group_id}'"
            )));
        }
        Ok(self.dir.join(format!("{group_id}.csv")))
    }
}

impl AccessControlSource for CsvAccessLog {
    fn fetch_access(
        &self,
        group_id: &str,
        date: NaiveDate,
        student_ids: &[i64],
    ) -> AppResult<Vec<AccessRecord>> {
        let path = self.group_file(group_id)?;
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "access-control export {}",
                path.display()
            )));
        }

        let wanted: HashSet<i64> = student_ids.iter().copied().collect();
        let mut seen: HashSet<i64> = HashSet::new();

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;

        let mut out = Vec::new();
        for row in reader.deserialize::<AccessRow>() {
            let row = row?;
            let row_date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(row.date.clone()))?;
            if row_date != date || !wanted.contains(&row.student_id) {
                continue;
            }
            // One result per student and day.
            if !seen.insert(row.student_id) {
                return Err(AppError::Other(format!(
                    "duplicate access rows for student {} on {} in {}",
                    row.student_id,
                    date,
                    path.display()
                )));
            }
            out.push(AccessRecord {
                student_id: row.student_id,
                entry_time: row.entry_time.filter(|t| !t.is_empty()),
                exit_time: row.exit_time.filter(|t| !t.is_empty()),
                total_hours: row.total_hours,
            });
        }

        debug!(
            "Group '{}' on {}: {} access record(s) from {}",
            group_id,
            date,
            out.len(),
            path.display()
        );

        Ok(out)
    }
}
