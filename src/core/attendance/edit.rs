use crate::core::attendance::working_set::WorkingSet;
use crate::errors::{AppError, AppResult};
use crate::models::control_mode::ControlMode;
use crate::models::status::AttendanceStatus;

/// An operator correction addressed to one student.
#[derive(Debug, Clone, PartialEq)]
pub enum ManualEdit {
    SetStatus {
        student_id: i64,
        status: AttendanceStatus,
    },
    SetObservations {
        student_id: i64,
        observations: String,
    },
}

impl ManualEdit {
    pub fn student_id(&self) -> i64 {
        match self {
            ManualEdit::SetStatus { student_id, .. } => *student_id,
            ManualEdit::SetObservations { student_id, .. } => *student_id,
        }
    }

    /// Parse a `--set ID=STATUS` argument.
    pub fn parse_status_arg(arg: &str) -> AppResult<Self> {
        let (id, value) = split_assignment(arg)?;
        let status = AttendanceStatus::from_code(value)
            .ok_or_else(|| AppError::InvalidStatus(value.to_string()))?;
        Ok(ManualEdit::SetStatus {
            student_id: id,
            status,
        })
    }

    /// Parse a `--note ID=TEXT` argument. The text may be empty and may
    /// itself contain '='.
    pub fn parse_note_arg(arg: &str) -> AppResult<Self> {
        let (id, value) = split_assignment(arg)?;
        Ok(ManualEdit::SetObservations {
            student_id: id,
            observations: value.to_string(),
        })
    }
}

fn split_assignment(arg: &str) -> AppResult<(i64, &str)> {
    let (id_raw, value) = arg
        .split_once('=')
        .ok_or_else(|| AppError::Other(format!("Expected STUDENT_ID=VALUE, got '{arg}'")))?;
    let id = id_raw
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::Other(format!("Invalid student id '{}'", id_raw.trim())))?;
    Ok((id, value))
}

/// Apply one manual edit, returning the updated set.
///
/// Setting `absent` in manual mode also clears entry, exit and hours. In
/// automated mode the times belong to the access-control system and are
/// kept whatever status the operator picks.
pub fn apply_edit(set: &WorkingSet, mode: ControlMode, edit: &ManualEdit) -> AppResult<WorkingSet> {
    let mut next = set.clone();
    let record = next
        .get_mut(edit.student_id())
        .ok_or(AppError::UnknownStudent(edit.student_id()))?;

    match edit {
        ManualEdit::SetStatus { status, .. } => {
            record.status = *status;
            if *status == AttendanceStatus::Absent && mode == ControlMode::Manual {
                record.clear_times();
            }
        }
        ManualEdit::SetObservations { observations, .. } => {
            record.observations = observations.clone();
        }
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceRecord;

    fn timed_set() -> WorkingSet {
        let mut rec = AttendanceRecord::absent(5, 1);
        rec.status = AttendanceStatus::Present;
        rec.entry_time = Some("08:00".into());
        rec.exit_time = Some("11:00".into());
        rec.total_hours = Some(3.0);
        let mut set = WorkingSet::new(5);
        set.insert(rec);
        set
    }

    fn set_absent() -> ManualEdit {
        ManualEdit::SetStatus {
            student_id: 1,
            status: AttendanceStatus::Absent,
        }
    }

    #[test]
    fn absent_in_manual_mode_clears_times() {
        let next = apply_edit(&timed_set(), ControlMode::Manual, &set_absent()).unwrap();
        let rec = next.get(1).unwrap();

        assert_eq!(rec.status, AttendanceStatus::Absent);
        assert!(rec.entry_time.is_none());
        assert!(rec.exit_time.is_none());
        assert!(rec.total_hours.is_none());
    }

    #[test]
    fn absent_in_automated_mode_keeps_times() {
        let next = apply_edit(&timed_set(), ControlMode::Automated, &set_absent()).unwrap();
        let rec = next.get(1).unwrap();

        assert_eq!(rec.status, AttendanceStatus::Absent);
        assert_eq!(rec.entry_time.as_deref(), Some("08:00"));
        assert_eq!(rec.exit_time.as_deref(), Some("11:00"));
        assert_eq!(rec.total_hours, Some(3.0));
    }

    #[test]
    fn other_statuses_keep_times_in_manual_mode() {
        let edit = ManualEdit::SetStatus {
            student_id: 1,
            status: AttendanceStatus::JustifiedAbsence,
        };
        let next = apply_edit(&timed_set(), ControlMode::Manual, &edit).unwrap();

        assert_eq!(next.get(1).unwrap().entry_time.as_deref(), Some("08:00"));
    }

    #[test]
    fn observations_touch_nothing_else() {
        let before = timed_set();
        let edit = ManualEdit::SetObservations {
            student_id: 1,
            observations: "atestado médico".into(),
        };
        let next = apply_edit(&before, ControlMode::Manual, &edit).unwrap();

        let mut expected = before.get(1).unwrap().clone();
        expected.observations = "atestado médico".into();
        assert_eq!(next.get(1), Some(&expected));
    }

    #[test]
    fn unknown_student_is_rejected() {
        let edit = ManualEdit::SetStatus {
            student_id: 42,
            status: AttendanceStatus::Present,
        };
        let err = apply_edit(&timed_set(), ControlMode::Manual, &edit).unwrap_err();
        assert!(matches!(err, AppError::UnknownStudent(42)));
    }

    #[test]
    fn parses_cli_assignments() {
        assert_eq!(
            ManualEdit::parse_status_arg("12=late").unwrap(),
            ManualEdit::SetStatus {
                student_id: 12,
                status: AttendanceStatus::Late
            }
        );
        assert_eq!(
            ManualEdit::parse_note_arg("3=a=b").unwrap(),
            ManualEdit::SetObservations {
                student_id: 3,
                observations: "a=b".into()
            }
        );
        assert!(ManualEdit::parse_status_arg("12").is_err());
        assert!(ManualEdit::parse_status_arg("x=present").is_err());
        assert!(matches!(
            ManualEdit::parse_status_arg("1=maybe"),
            Err(AppError::InvalidStatus(_))
        ));
    }
}
