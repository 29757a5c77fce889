use crate::core::attendance::edit::ManualEdit;
use crate::core::attendance::state::{AttendanceState, SyncOutcome};
use crate::core::context::SessionContext;
use crate::core::sources::{AccessControlSource, AttendanceStore, RosterSource, SessionSource};
use crate::errors::AppResult;
use log::{info, warn};

/// High-level attendance workflow: load, sync, edit, commit.
///
/// Each step calls the collaborators and feeds the outcome to the reducer
/// in `AttendanceState`.
pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Load session, roster and stored records, and merge them.
    pub fn open<B>(backend: &mut B, session_id: i64) -> AppResult<AttendanceState>
    where
        B: SessionSource + RosterSource + AttendanceStore,
    {
        let info = backend.session_info(session_id)?;
        let mut state = AttendanceState::new(info);
        Self::reload(&mut state, backend)?;
        Ok(state)
    }

    /// Fetch roster and stored records again and rebuild the working set.
    pub fn reload<B>(state: &mut AttendanceState, backend: &mut B) -> AppResult<()>
    where
        B: RosterSource + AttendanceStore,
    {
        let roster = backend.active_roster(state.info().instance.id)?;
        let prior = backend.session_attendance(state.session_id())?;
        state.apply_roster_loaded(&roster, &prior)
    }

    /// Pull entry/exit data from the access-control system into the
    /// working set. Fails before any I/O when the instance is not automated.
    pub fn sync<A>(state: &mut AttendanceState, access: &A) -> AppResult<SyncOutcome>
    where
        A: AccessControlSource + ?Sized,
    {
        let ticket = state.begin_sync()?;
        let result = access.fetch_access(&ticket.group_id, ticket.date, &ticket.student_ids);
        let outcome = state.apply_external_sync(&ticket, result)?;
        if let SyncOutcome::Applied { updated } = outcome {
            info!(
                "Session {}: {} record(s) updated from group '{}'",
                state.session_id(),
                updated,
                ticket.group_id
            );
        }
        Ok(outcome)
    }

    pub fn edit_all(state: &mut AttendanceState, edits: &[ManualEdit]) -> AppResult<()> {
        for edit in edits {
            state.apply_manual_edit(edit)?;
        }
        Ok(())
    }

    /// Send the full working set as one batch, then reload what the store
    /// now holds. Returns the number of records written. A failed reload
    /// after a stored batch is only logged.
    pub fn commit<B>(
        state: &mut AttendanceState,
        backend: &mut B,
        ctx: &SessionContext,
    ) -> AppResult<usize>
    where
        B: RosterSource + AttendanceStore,
    {
        let batch = state.commit_batch()?;
        let result = backend.commit_batch(&batch, ctx);
        state.apply_commit_result(result)?;

        info!(
            "Session {}: committed {} record(s) as '{}'",
            batch.session_id,
            batch.records.len(),
            ctx.operator()
        );

        if let Err(e) = Self::reload(state, backend) {
            warn!(
                "Session {}: records saved, but reloading them failed: {}",
                batch.session_id, e
            );
        }
        Ok(batch.records.len())
    }
}
