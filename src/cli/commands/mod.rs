pub mod backup;
pub mod config;
pub mod db;
pub mod enroll;
pub mod export;
pub mod history;
pub mod init;
pub mod instance;
pub mod log;
pub mod session;
pub mod show;
pub mod sync;
pub mod take;
