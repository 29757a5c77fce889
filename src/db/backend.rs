//! `DbPool` as the storage collaborator of the attendance model.

use crate::core::attendance::state::CommitBatch;
use crate::core::context::SessionContext;
use crate::core::sources::{AttendanceStore, RosterSource, SessionSource};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::enrollment::Enrollment;
use crate::models::session::SessionInfo;

impl SessionSource for DbPool {
    fn session_info(&mut self, session_id: i64) -> AppResult<SessionInfo> {
        queries::load_session_info(&self.conn, session_id)
    }
}

impl RosterSource for DbPool {
    fn active_roster(&mut self, instance_id: i64) -> AppResult<Vec<Enrollment>> {
        queries::load_enrollments(&self.conn, instance_id, true)
    }
}

impl AttendanceStore for DbPool {
    fn session_attendance(&mut self, session_id: i64) -> AppResult<Vec<AttendanceRecord>> {
        queries::load_session_attendance(&self.conn, session_id)
    }

    fn commit_batch(&mut self, batch: &CommitBatch, ctx: &SessionContext) -> AppResult<()> {
        let written = queries::commit_attendance_batch(&mut self.conn, batch, ctx.operator())?;

        audit_quiet(
            &self.conn,
            "commit",
            &format!("session {}", batch.session_id),
            &format!("{} attendance record(s) saved by {}", written, ctx.operator()),
        );
        Ok(())
    }
}
