use serde::Deserialize;

/// Entry/exit data returned by the access-control system for one student.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessRecord {
    pub student_id: i64,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub total_hours: Option<f64>,
}

impl AccessRecord {
    pub fn has_entry(&self) -> bool {
        self.entry_time
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}
