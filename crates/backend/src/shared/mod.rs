pub mod config;
pub mod readiness;
pub mod state;
