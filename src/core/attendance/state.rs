//! Attendance state of one session and the reducer that mutates it.
//!
//! Every change to the working set goes through one of the `apply_*`
//! functions (or `apply` with an `AttendanceEvent`). Each applied change
//! bumps `generation`; a sync result is only accepted when the generation it
//! was started at is still current, so a slow sync never overwrites edits
//! made after it was issued.

use crate::core::attendance::edit::{ManualEdit, apply_edit};
use crate::core::attendance::merger::merge;
use crate::core::attendance::reconcile::apply_access_records;
use crate::core::attendance::stats::AttendanceStats;
use crate::core::attendance::working_set::WorkingSet;
use crate::errors::{AppError, AppResult};
use crate::models::access::AccessRecord;
use crate::models::attendance::AttendanceRecord;
use crate::models::control_mode::ControlMode;
use crate::models::enrollment::Enrollment;
use crate::models::session::SessionInfo;
use chrono::NaiveDate;
use log::{debug, warn};

/// Everything needed to call the access-control system for one sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncTicket {
    pub generation: u64,
    pub group_id: String,
    pub date: NaiveDate,
    pub student_ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Results were applied; `updated` records were overwritten.
    Applied { updated: usize },
    /// The working set changed after the sync started; results dropped.
    Stale,
}

/// The full record set of a session, as sent to the store in one write.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitBatch {
    pub session_id: i64,
    pub records: Vec<AttendanceRecord>,
}

pub enum AttendanceEvent {
    RosterLoaded {
        roster: Vec<Enrollment>,
        prior: Vec<AttendanceRecord>,
    },
    ExternalSync {
        ticket: SyncTicket,
        result: AppResult<Vec<AccessRecord>>,
    },
    ManualEdit(ManualEdit),
    CommitResult(AppResult<()>),
}

#[derive(Debug, Clone)]
pub struct AttendanceState {
    info: SessionInfo,
    working: Option<WorkingSet>,
    dirty: bool,
    generation: u64,
    last_error: Option<String>,
}

impl AttendanceState {
    pub fn new(info: SessionInfo) -> Self {
        Self {
            info,
            working: None,
            dirty: false,
            generation: 0,
            last_error: None,
        }
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    pub fn session_id(&self) -> i64 {
        self.info.session.id
    }

    pub fn mode(&self) -> ControlMode {
        self.info.instance.control_mode
    }

    pub fn working(&self) -> Option<&WorkingSet> {
        self.working.as_ref()
    }

    /// True when the working set holds changes that were not committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn stats(&self) -> Option<AttendanceStats> {
        self.working.as_ref().map(AttendanceStats::from_set)
    }

    fn working_ref(&self) -> AppResult<&WorkingSet> {
        self.working.as_ref().ok_or(AppError::NothingLoaded)
    }

    /// Generic entry point: route an event to its reducer function.
    pub fn apply(&mut self, event: AttendanceEvent) -> AppResult<()> {
        match event {
            AttendanceEvent::RosterLoaded { roster, prior } => {
                self.apply_roster_loaded(&roster, &prior)
            }
            AttendanceEvent::ExternalSync { ticket, result } => {
                self.apply_external_sync(&ticket, result).map(|_| ())
            }
            AttendanceEvent::ManualEdit(edit) => self.apply_manual_edit(&edit),
            AttendanceEvent::CommitResult(result) => self.apply_commit_result(result),
        }
    }

    /// Rebuild the working set from roster and stored records.
    ///
    /// Refused while uncommitted changes exist, so a reload never drops them.
    pub fn apply_roster_loaded(
        &mut self,
        roster: &[Enrollment],
        prior: &[AttendanceRecord],
    ) -> AppResult<()> {
        if self.dirty {
            return Err(AppError::UnsavedEdits);
        }

        let set = merge(self.session_id(), roster, prior);
        debug!(
            "Session {}: merged {} roster entries with {} stored records",
            self.session_id(),
            set.len(),
            prior.len()
        );

        self.working = Some(set);
        self.generation += 1;
        self.last_error = None;
        Ok(())
    }

    /// Drop uncommitted changes; the working set must be loaded again.
    pub fn discard_edits(&mut self) {
        self.working = None;
        self.dirty = false;
        self.generation += 1;
    }

    /// Check the sync preconditions and capture what the access-control
    /// call needs. No I/O happens here.
    pub fn begin_sync(&self) -> AppResult<SyncTicket> {
        let instance = &self.info.instance;
        let Some(group) = instance.access_group() else {
            let reason = if instance.control_mode.is_automated() {
                format!("class instance '{}' has no access-control group", instance.name)
            } else {
                format!("class instance '{}' uses manual control", instance.name)
            };
            return Err(AppError::SyncNotAvailable(reason));
        };

        let working = self.working_ref()?;

        Ok(SyncTicket {
            generation: self.generation,
            group_id: group.to_string(),
            date: self.info.session.date,
            student_ids: working.student_ids().to_vec(),
        })
    }

    /// Apply the outcome of an access-control fetch.
    ///
    /// A failed fetch leaves the working set untouched. A result whose
    /// ticket is older than the current generation is discarded.
    pub fn apply_external_sync(
        &mut self,
        ticket: &SyncTicket,
        result: AppResult<Vec<AccessRecord>>,
    ) -> AppResult<SyncOutcome> {
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                let err = AppError::Reconciliation {
                    group: ticket.group_id.clone(),
                    message: e.to_string(),
                };
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        if ticket.generation != self.generation {
            warn!(
                "Session {}: discarding access-control result for group '{}' (started at generation {}, now {})",
                self.session_id(),
                ticket.group_id,
                ticket.generation,
                self.generation
            );
            return Ok(SyncOutcome::Stale);
        }

        let (next, updated) = apply_access_records(self.working_ref()?, &records);

        self.working = Some(next);
        self.dirty = true;
        self.generation += 1;
        self.last_error = None;
        Ok(SyncOutcome::Applied { updated })
    }

    pub fn apply_manual_edit(&mut self, edit: &ManualEdit) -> AppResult<()> {
        let next = apply_edit(self.working_ref()?, self.mode(), edit)?;
        self.working = Some(next);
        self.dirty = true;
        self.generation += 1;
        Ok(())
    }

    /// Every roster record, in roster order, changed or not.
    pub fn commit_batch(&self) -> AppResult<CommitBatch> {
        let working = self.working_ref()?;
        Ok(CommitBatch {
            session_id: working.session_id(),
            records: working.iter().cloned().collect(),
        })
    }

    /// On success the working set is dropped and must be reloaded from the
    /// store. On failure it is kept exactly as it was so the commit can be
    /// retried.
    pub fn apply_commit_result(&mut self, result: AppResult<()>) -> AppResult<()> {
        match result {
            Ok(()) => {
                self.working = None;
                self.dirty = false;
                self.generation += 1;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                self.last_error = Some(message.clone());
                Err(AppError::Commit(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class_instance::ClassInstance;
    use crate::models::session::Session;
    use crate::models::status::AttendanceStatus;

    fn info(mode: ControlMode, group: Option<&str>) -> SessionInfo {
        SessionInfo {
            session: Session {
                id: 10,
                instance_id: 2,
                date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            },
            instance: ClassInstance {
                id: 2,
                name: "Capoeira Tarde".into(),
                control_mode: mode,
                group_id: group.map(String::from),
            },
        }
    }

    fn roster() -> Vec<Enrollment> {
        ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, name)| Enrollment {
                id: i as i64 + 1,
                instance_id: 2,
                name: name.to_string(),
                tax_id: None,
                enrolled_on: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                active: true,
            })
            .collect()
    }

    fn loaded(mode: ControlMode, group: Option<&str>) -> AttendanceState {
        let mut state = AttendanceState::new(info(mode, group));
        state.apply_roster_loaded(&roster(), &[]).unwrap();
        state
    }

    fn set_status(student_id: i64, status: AttendanceStatus) -> AttendanceEvent {
        AttendanceEvent::ManualEdit(ManualEdit::SetStatus { student_id, status })
    }

    fn entry(student_id: i64, at: &str) -> AccessRecord {
        AccessRecord {
            student_id,
            entry_time: Some(at.into()),
            exit_time: Some("17:00".into()),
            total_hours: Some(2.5),
        }
    }

    #[test]
    fn manual_scenario_commits_three_records() {
        let mut state = loaded(ControlMode::Manual, None);
        assert!(state
            .working()
            .unwrap()
            .iter()
            .all(|r| r.status == AttendanceStatus::Absent));

        state.apply(set_status(1, AttendanceStatus::Present)).unwrap();
        state.apply(set_status(2, AttendanceStatus::Late)).unwrap();
        state.apply(set_status(3, AttendanceStatus::Absent)).unwrap();
        state
            .apply(AttendanceEvent::ManualEdit(ManualEdit::SetObservations {
                student_id: 3,
                observations: "doctor's note".into(),
            }))
            .unwrap();
        state
            .apply(set_status(3, AttendanceStatus::JustifiedAbsence))
            .unwrap();

        let batch = state.commit_batch().unwrap();
        let statuses: Vec<_> = batch.records.iter().map(|r| r.status).collect();

        assert_eq!(batch.session_id, 10);
        assert_eq!(
            statuses,
            vec![
                AttendanceStatus::Present,
                AttendanceStatus::Late,
                AttendanceStatus::JustifiedAbsence
            ]
        );
        assert_eq!(batch.records[2].observations, "doctor's note");
        assert!(batch.records[..2]
            .iter()
            .all(|r| r.entry_time.is_none() && r.exit_time.is_none()));
    }

    #[test]
    fn commit_includes_untouched_default_records() {
        let mut state = loaded(ControlMode::Manual, None);
        state.apply(set_status(2, AttendanceStatus::Present)).unwrap();

        let batch = state.commit_batch().unwrap();

        assert_eq!(batch.records.len(), 3);
        assert_eq!(batch.records[0], AttendanceRecord::absent(10, 1));
        assert_eq!(batch.records[2], AttendanceRecord::absent(10, 3));
    }

    #[test]
    fn automated_sync_only_touches_reported_students() {
        let mut state = loaded(ControlMode::Automated, Some("CATRACA-2"));
        state.apply(set_status(2, AttendanceStatus::Late)).unwrap();
        let before_b = state.working().unwrap().get(2).cloned();

        let ticket = state.begin_sync().unwrap();
        assert_eq!(ticket.group_id, "CATRACA-2");
        assert_eq!(ticket.student_ids, vec![1, 2, 3]);

        let outcome = state
            .apply_external_sync(&ticket, Ok(vec![entry(1, "14:00"), entry(3, "14:10")]))
            .unwrap();
        let working = state.working().unwrap();

        assert_eq!(outcome, SyncOutcome::Applied { updated: 2 });
        assert_eq!(working.get(1).unwrap().status, AttendanceStatus::Present);
        assert_eq!(working.get(3).unwrap().status, AttendanceStatus::Present);
        assert_eq!(working.get(3).unwrap().entry_time.as_deref(), Some("14:10"));
        assert_eq!(working.get(2).cloned(), before_b);
        assert!(state.is_dirty());
    }

    #[test]
    fn failed_sync_leaves_records_unchanged() {
        let mut state = loaded(ControlMode::Automated, Some("CATRACA-2"));
        let before = state.working().cloned();
        let ticket = state.begin_sync().unwrap();

        let err = state
            .apply_external_sync(&ticket, Err(AppError::NotFound("group".into())))
            .unwrap_err();

        assert!(matches!(err, AppError::Reconciliation { .. }));
        assert!(err.to_string().contains("group identifier"));
        assert_eq!(state.working().cloned(), before);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn sync_is_rejected_without_automated_group() {
        let manual = loaded(ControlMode::Manual, Some("CATRACA-2"));
        assert!(matches!(
            manual.begin_sync(),
            Err(AppError::SyncNotAvailable(_))
        ));

        let no_group = loaded(ControlMode::Automated, None);
        assert!(matches!(
            no_group.begin_sync(),
            Err(AppError::SyncNotAvailable(_))
        ));
    }

    #[test]
    fn stale_sync_result_does_not_overwrite_later_edit() {
        let mut state = loaded(ControlMode::Automated, Some("CATRACA-2"));
        let ticket = state.begin_sync().unwrap();

        state
            .apply(set_status(1, AttendanceStatus::JustifiedAbsence))
            .unwrap();
        let outcome = state
            .apply_external_sync(&ticket, Ok(vec![entry(1, "14:00")]))
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Stale);
        assert_eq!(
            state.working().unwrap().get(1).unwrap().status,
            AttendanceStatus::JustifiedAbsence
        );
    }

    #[test]
    fn failed_commit_keeps_working_set_identical() {
        let mut state = loaded(ControlMode::Manual, None);
        state.apply(set_status(1, AttendanceStatus::Present)).unwrap();
        let before = state.working().cloned();

        let err = state
            .apply_commit_result(Err(AppError::Other("network unreachable".into())))
            .unwrap_err();

        assert!(matches!(err, AppError::Commit(_)));
        assert_eq!(state.working().cloned(), before);
        assert!(state.is_dirty());
        // the same batch can be sent again
        assert_eq!(state.commit_batch().unwrap().records.len(), 3);
    }

    #[test]
    fn successful_commit_requires_reload() {
        let mut state = loaded(ControlMode::Manual, None);
        state.apply(set_status(1, AttendanceStatus::Present)).unwrap();

        state.apply_commit_result(Ok(())).unwrap();

        assert!(state.working().is_none());
        assert!(!state.is_dirty());
        assert!(matches!(state.commit_batch(), Err(AppError::NothingLoaded)));
    }

    #[test]
    fn reload_is_refused_while_edits_are_pending() {
        let mut state = loaded(ControlMode::Manual, None);
        state.apply(set_status(1, AttendanceStatus::Present)).unwrap();

        let err = state.apply_roster_loaded(&roster(), &[]).unwrap_err();
        assert!(matches!(err, AppError::UnsavedEdits));
        assert_eq!(
            state.working().unwrap().get(1).unwrap().status,
            AttendanceStatus::Present
        );

        state.discard_edits();
        state.apply_roster_loaded(&roster(), &[]).unwrap();
        assert_eq!(
            state.working().unwrap().get(1).unwrap().status,
            AttendanceStatus::Absent
        );
    }

    #[test]
    fn edits_before_load_are_rejected() {
        let mut state = AttendanceState::new(info(ControlMode::Manual, None));
        assert!(matches!(
            state.apply(set_status(1, AttendanceStatus::Present)),
            Err(AppError::NothingLoaded)
        ));
    }
}
