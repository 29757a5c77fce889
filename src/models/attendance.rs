use super::status::AttendanceStatus;
use serde::{Deserialize, Serialize};

/// Attendance of one student for one session.
///
/// Identified by `(session_id, student_id)`; `id` stays `None` until the
/// record has been committed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Option<i64>,
    pub session_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    /// Filled by the access-control system only.
    pub total_hours: Option<f64>,
    pub observations: String,
}

impl AttendanceRecord {
    /// The record every roster member gets when nothing was stored yet.
    pub fn absent(session_id: i64, student_id: i64) -> Self {
        Self {
            id: None,
            session_id,
            student_id,
            status: AttendanceStatus::Absent,
            entry_time: None,
            exit_time: None,
            total_hours: None,
            observations: String::new(),
        }
    }

    pub fn clear_times(&mut self) {
        self.entry_time = None;
        self.exit_time = None;
        self.total_hours = None;
    }
}
