use serde::{Deserialize, Serialize};

/// How attendance is taken for a class instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Operator checks students in by hand
    Manual,
    /// Presence comes from the access-control system (turnstile logs)
    Automated,
}

impl ControlMode {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ControlMode::Manual => "manual",
            ControlMode::Automated => "automated",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(ControlMode::Manual),
            "automated" => Some(ControlMode::Automated),
            _ => None,
        }
    }

    pub fn is_automated(&self) -> bool {
        matches!(self, ControlMode::Automated)
    }
}
