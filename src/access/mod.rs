//! Adapters for the external access-control (turnstile) system.

pub mod csv_log;

pub use csv_log::CsvAccessLog;
