//! Collaborator seams of the attendance model.
//!
//! The reconciliation logic never talks to storage or to the access-control
//! system directly; it goes through these traits. `DbPool` implements the
//! storage side, `CsvAccessLog` the access-control side.

use crate::core::attendance::state::CommitBatch;
use crate::core::context::SessionContext;
use crate::errors::AppResult;
use crate::models::access::AccessRecord;
use crate::models::attendance::AttendanceRecord;
use crate::models::enrollment::Enrollment;
use crate::models::session::SessionInfo;
use chrono::NaiveDate;

pub trait SessionSource {
    /// Session plus its owning class instance.
    fn session_info(&mut self, session_id: i64) -> AppResult<SessionInfo>;
}

pub trait RosterSource {
    /// Active enrollments of a class instance, in display order.
    fn active_roster(&mut self, instance_id: i64) -> AppResult<Vec<Enrollment>>;
}

pub trait AttendanceStore {
    /// Previously committed records of a session. Empty before the first commit.
    fn session_attendance(&mut self, session_id: i64) -> AppResult<Vec<AttendanceRecord>>;

    /// Persist the whole batch or nothing.
    fn commit_batch(&mut self, batch: &CommitBatch, ctx: &SessionContext) -> AppResult<()>;
}

pub trait AccessControlSource {
    fn fetch_access(
        &self,
        group_id: &str,
        date: NaiveDate,
        student_ids: &[i64],
    ) -> AppResult<Vec<AccessRecord>>;
}
