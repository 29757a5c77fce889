use super::control_mode::ControlMode;
use serde::Serialize;

/// A running class of an activity (e.g. "Futsal Sub-13, 2025 morning").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInstance {
    pub id: i64,
    pub name: String,
    pub control_mode: ControlMode,
    pub group_id: Option<String>,
}

impl ClassInstance {
    /// Access-control group to sync from, only when the instance is automated
    /// and a non-blank group identifier is configured.
    pub fn access_group(&self) -> Option<&str> {
        if !self.control_mode.is_automated() {
            return None;
        }
        self.group_id
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}
