use crate::core::attendance::working_set::WorkingSet;
use crate::models::status::AttendanceStatus;
use serde::Serialize;

/// Counters shown next to the attendance grid. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub total: usize,
    /// present + late
    pub present: usize,
    pub absent: usize,
    pub justified: usize,
}

impl AttendanceStats {
    pub fn from_set(set: &WorkingSet) -> Self {
        let mut stats = AttendanceStats {
            total: set.len(),
            ..Default::default()
        };

        for rec in set.iter() {
            match rec.status {
                s if s.counts_as_present() => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::JustifiedAbsence => stats.justified += 1,
                _ => {}
            }
        }

        stats
    }

    /// Percentage of the roster counted as present (0 for an empty roster).
    pub fn presence_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.present as f64 * 100.0 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceRecord;

    fn set_of(statuses: &[AttendanceStatus]) -> WorkingSet {
        let mut set = WorkingSet::new(1);
        for (i, s) in statuses.iter().enumerate() {
            let mut r = AttendanceRecord::absent(1, i as i64 + 1);
            r.status = *s;
            set.insert(r);
        }
        set
    }

    #[test]
    fn late_counts_as_present() {
        use AttendanceStatus::*;
        let stats = AttendanceStats::from_set(&set_of(&[Present, Late, Absent, JustifiedAbsence, Late]));

        assert_eq!(
            stats,
            AttendanceStats {
                total: 5,
                present: 3,
                absent: 1,
                justified: 1
            }
        );
        assert!(stats.present + stats.absent + stats.justified <= stats.total);
        assert!((stats.presence_rate() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_roster_has_zero_rate() {
        let stats = AttendanceStats::from_set(&WorkingSet::new(1));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.presence_rate(), 0.0);
    }
}
