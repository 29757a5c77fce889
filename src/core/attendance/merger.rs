use crate::core::attendance::working_set::WorkingSet;
use crate::models::attendance::AttendanceRecord;
use crate::models::enrollment::Enrollment;
use std::collections::HashMap;

/// Build the working set of a session from the active roster and the
/// records already stored for it.
///
/// - every active roster entry gets exactly one record
/// - a stored record is taken as is
/// - a student without a stored record starts as absent
///
/// Stored records of students no longer on the active roster are dropped.
pub fn merge(session_id: i64, roster: &[Enrollment], prior: &[AttendanceRecord]) -> WorkingSet {
    let by_student: HashMap<i64, &AttendanceRecord> = prior
        .iter()
        .filter(|r| r.session_id == session_id)
        .map(|r| (r.student_id, r))
        .collect();

    let mut set = WorkingSet::new(session_id);

    for entry in roster.iter().filter(|e| e.active) {
        let record = match by_student.get(&entry.id) {
            Some(stored) => (*stored).clone(),
            None => AttendanceRecord::absent(session_id, entry.id),
        };
        set.insert(record);
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::AttendanceStatus;
    use chrono::NaiveDate;

    fn student(id: i64, name: &str) -> Enrollment {
        Enrollment {
            id,
            instance_id: 1,
            name: name.to_string(),
            tax_id: None,
            enrolled_on: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            active: true,
        }
    }

    fn stored(student_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: Some(100 + student_id),
            session_id: 7,
            student_id,
            status,
            entry_time: Some("08:05".into()),
            exit_time: Some("11:30".into()),
            total_hours: Some(3.4),
            observations: "ok".into(),
        }
    }

    #[test]
    fn one_record_per_active_student() {
        let mut inactive = student(4, "Dani");
        inactive.active = false;
        let roster = vec![student(1, "Ana"), student(2, "Bia"), student(1, "Ana"), inactive];

        let set = merge(7, &roster, &[]);

        assert_eq!(set.student_ids(), &[1, 2]);
        assert_eq!(set.iter().count(), 2);
        assert!(!set.contains(4));
    }

    #[test]
    fn missing_record_defaults_to_absent() {
        let set = merge(7, &[student(1, "Ana")], &[]);
        let rec = set.get(1).unwrap();

        assert_eq!(rec, &AttendanceRecord::absent(7, 1));
        assert_eq!(rec.status, AttendanceStatus::Absent);
        assert_eq!(rec.observations, "");
        assert!(rec.entry_time.is_none() && rec.exit_time.is_none() && rec.total_hours.is_none());
    }

    #[test]
    fn stored_record_is_used_verbatim() {
        let prior = vec![stored(2, AttendanceStatus::Late)];
        let set = merge(7, &[student(1, "Ana"), student(2, "Bia")], &prior);

        assert_eq!(set.get(2), Some(&prior[0]));
        assert_eq!(set.get(1).unwrap().status, AttendanceStatus::Absent);
    }

    #[test]
    fn records_of_students_off_the_roster_are_dropped() {
        let prior = vec![stored(9, AttendanceStatus::Present)];
        let set = merge(7, &[student(1, "Ana")], &prior);

        assert_eq!(set.len(), 1);
        assert!(!set.contains(9));
    }

    #[test]
    fn merge_is_idempotent() {
        let roster = vec![student(1, "Ana"), student(2, "Bia"), student(3, "Caio")];
        let prior = vec![stored(3, AttendanceStatus::Present)];

        assert_eq!(merge(7, &roster, &prior), merge(7, &roster, &prior));
    }
}
