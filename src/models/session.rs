use super::class_instance::ClassInstance;
use chrono::NaiveDate;
use serde::Serialize;

/// One class meeting on a given date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: i64,
    pub instance_id: i64,
    pub date: NaiveDate,
}

impl Session {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// A session together with its owning instance. Control mode and group id
/// are always read from the instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub session: Session,
    pub instance: ClassInstance,
}
