//! Unified application error type.
//! All modules (db, core, access, cli, export) return AppError so that the
//! binary can report every failure the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    #[error("Invalid control mode: {0}")]
    InvalidControlMode(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Attendance workflow
    // ---------------------------
    #[error("{0} not found")]
    NotFound(String),

    #[error("Student {0} is not on the active roster of this session")]
    UnknownStudent(i64),

    #[error("Unsaved attendance edits exist; commit or discard them before reloading")]
    UnsavedEdits,

    #[error("Attendance for this session has not been loaded")]
    NothingLoaded,

    #[error("Access-control sync not available: {0}")]
    SyncNotAvailable(String),

    #[error(
        "Access-control sync failed for group '{group}': {message} (check that the group identifier is configured correctly)"
    )]
    Reconciliation { group: String, message: String },

    #[error("Attendance commit failed: {0}")]
    Commit(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
