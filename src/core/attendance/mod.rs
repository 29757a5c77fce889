//! Attendance reconciliation: roster merge, access-control sync, manual
//! edits, statistics and batch commit, driven through one reducer.

pub mod edit;
pub mod merger;
pub mod reconcile;
pub mod service;
pub mod state;
pub mod stats;
pub mod working_set;

pub use edit::ManualEdit;
pub use service::AttendanceLogic;
pub use state::{AttendanceEvent, AttendanceState, CommitBatch, SyncOutcome, SyncTicket};
pub use stats::AttendanceStats;
pub use working_set::WorkingSet;
