use serde::Serialize;

/// One committed attendance record, flattened with its session and student.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AttendanceExport {
    pub session_id: i64,
    pub date: String,
    pub instance: String,
    pub student_id: i64,
    pub student: String,
    pub status: String,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub total_hours: Option<f64>,
    pub observations: String,
    pub recorded_by: String,
}

pub(crate) const HEADERS: [&str; 11] = [
    "session_id",
    "date",
    "instance",
    "student_id",
    "student",
    "status",
    "entry_time",
    "exit_time",
    "total_hours",
    "observations",
    "recorded_by",
];

/// How a column is written to typed formats such as XLSX.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CellKind {
    Text,
    Number,
    Temporal,
}

pub(crate) const KINDS: [CellKind; 11] = [
    CellKind::Number,
    CellKind::Temporal,
    CellKind::Text,
    CellKind::Number,
    CellKind::Text,
    CellKind::Text,
    CellKind::Temporal,
    CellKind::Temporal,
    CellKind::Number,
    CellKind::Text,
    CellKind::Text,
];

/// Cells in `HEADERS` order; missing values become empty strings.
pub(crate) fn to_cells(r: &AttendanceExport) -> Vec<String> {
    vec![
        r.session_id.to_string(),
        r.date.clone(),
        r.instance.clone(),
        r.student_id.to_string(),
        r.student.clone(),
        r.status.clone(),
        r.entry_time.clone().unwrap_or_default(),
        r.exit_time.clone().unwrap_or_default(),
        r.total_hours.map(|h| format!("{h:.2}")).unwrap_or_default(),
        r.observations.clone(),
        r.recorded_by.clone(),
    ]
}
