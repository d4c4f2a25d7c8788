//! Studyclock Core - Shared functionality for the studyclock tools

pub mod format;
pub mod paths;

pub use paths::Paths;
