use crate::core::attendance::working_set::WorkingSet;
use crate::models::access::AccessRecord;
use crate::models::status::AttendanceStatus;
use log::debug;

/// Overlay access-control results on a working set.
///
/// For every returned student on the roster, status becomes present when an
/// entry time exists and absent otherwise; entry, exit and hours are copied
/// as returned. Students the access system did not report keep their
/// current record. Observations are never touched.
///
/// Returns the new set and the number of records overwritten.
pub fn apply_access_records(set: &WorkingSet, records: &[AccessRecord]) -> (WorkingSet, usize) {
    let mut next = set.clone();
    let mut updated = 0;

    for access in records {
        let Some(working) = next.get_mut(access.student_id) else {
            debug!(
                "Ignoring access record for student {} (not on roster of session {})",
                access.student_id,
                set.session_id()
            );
            continue;
        };

        working.status = if access.has_entry() {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        };
        working.entry_time = access.entry_time.clone();
        working.exit_time = access.exit_time.clone();
        working.total_hours = access.total_hours;
        updated += 1;
    }

    (next, updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceRecord;

    fn set_with(records: Vec<AttendanceRecord>) -> WorkingSet {
        let mut set = WorkingSet::new(3);
        for r in records {
            set.insert(r);
        }
        set
    }

    fn access(student_id: i64, entry: Option<&str>) -> AccessRecord {
        AccessRecord {
            student_id,
            entry_time: entry.map(String::from),
            exit_time: entry.map(|_| "12:00".to_string()),
            total_hours: entry.map(|_| 3.5),
        }
    }

    #[test]
    fn entry_time_marks_present_and_copies_times() {
        let mut a = AttendanceRecord::absent(3, 1);
        a.observations = "chegou com a mãe".into();
        let set = set_with(vec![a]);

        let (next, updated) = apply_access_records(&set, &[access(1, Some("08:30"))]);
        let rec = next.get(1).unwrap();

        assert_eq!(updated, 1);
        assert_eq!(rec.status, AttendanceStatus::Present);
        assert_eq!(rec.entry_time.as_deref(), Some("08:30"));
        assert_eq!(rec.exit_time.as_deref(), Some("12:00"));
        assert_eq!(rec.total_hours, Some(3.5));
        assert_eq!(rec.observations, "chegou com a mãe");
    }

    #[test]
    fn returned_student_without_entry_becomes_absent() {
        let mut b = AttendanceRecord::absent(3, 2);
        b.status = AttendanceStatus::Late;
        b.entry_time = Some("09:10".into());
        let set = set_with(vec![b]);

        let (next, _) = apply_access_records(&set, &[access(2, None)]);
        let rec = next.get(2).unwrap();

        assert_eq!(rec.status, AttendanceStatus::Absent);
        assert!(rec.entry_time.is_none());
    }

    #[test]
    fn unreported_and_unknown_students_are_untouched() {
        let mut b = AttendanceRecord::absent(3, 2);
        b.status = AttendanceStatus::JustifiedAbsence;
        let set = set_with(vec![AttendanceRecord::absent(3, 1), b.clone()]);

        let (next, updated) =
            apply_access_records(&set, &[access(1, Some("08:00")), access(99, Some("08:00"))]);

        assert_eq!(updated, 1);
        assert_eq!(next.get(2), Some(&b));
        assert!(!next.contains(99));
        // the input set is left as it was
        assert_eq!(set.get(1).unwrap().status, AttendanceStatus::Absent);
    }
}
