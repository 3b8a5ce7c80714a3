//! CLI library components for the claims denial dashboard.

pub mod config;
pub mod logging;
pub mod sample;
pub mod server;
