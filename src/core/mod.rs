pub mod attendance;
pub mod backup;
pub mod context;
pub mod history;
pub mod log;
pub mod sources;
