//! Per-student attendance history across committed sessions.

use crate::db::pool::DbPool;
use crate::db::queries::{StudentAttendanceRow, load_student_attendance};
use crate::models::status::AttendanceStatus;
use log::warn;

#[derive(Debug, Clone, Default)]
pub struct StudentHistory {
    pub rows: Vec<StudentAttendanceRow>,
}

impl StudentHistory {
    pub fn sessions(&self) -> usize {
        self.rows.len()
    }

    /// Sessions counted as attended (present or late).
    pub fn attended(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status.counts_as_present())
            .count()
    }

    pub fn justified(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == AttendanceStatus::JustifiedAbsence)
            .count()
    }

    /// Presence rate in percent; 0 when there is no committed session.
    pub fn presence_rate(&self) -> f64 {
        if self.rows.is_empty() {
            0.0
        } else {
            self.attended() as f64 * 100.0 / self.rows.len() as f64
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.total_hours).sum()
    }
}

pub struct HistoryLogic;

impl HistoryLogic {
    /// History is informational only: a failing lookup is logged and
    /// yields an empty history instead of an error.
    pub fn load(pool: &mut DbPool, student_id: i64) -> StudentHistory {
        match load_student_attendance(&pool.conn, student_id) {
            Ok(rows) => StudentHistory { rows },
            Err(e) => {
                warn!("History lookup for student {student_id} failed: {e}");
                StudentHistory::default()
            }
        }
    }
}
