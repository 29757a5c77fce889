use serde::{Deserialize, Serialize};

/// Attendance status of one student for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    JustifiedAbsence,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::JustifiedAbsence,
        AttendanceStatus::Late,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::JustifiedAbsence => "justified_absence",
            AttendanceStatus::Late => "late",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "justified_absence" => Some(AttendanceStatus::JustifiedAbsence),
            "late" => Some(AttendanceStatus::Late),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (long or one-letter form, any case)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "present" | "p" => Some(AttendanceStatus::Present),
            "absent" | "a" => Some(AttendanceStatus::Absent),
            "justified" | "justified_absence" | "j" => Some(AttendanceStatus::JustifiedAbsence),
            "late" | "l" => Some(AttendanceStatus::Late),
            _ => None,
        }
    }

    /// Present and late both count as "present" for statistics and highlighting.
    pub fn counts_as_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::JustifiedAbsence => "Justified",
            AttendanceStatus::Late => "Late",
        }
    }
}
