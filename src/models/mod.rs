pub mod access;
pub mod attendance;
pub mod class_instance;
pub mod control_mode;
pub mod enrollment;
pub mod session;
pub mod status;
