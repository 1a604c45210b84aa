//! Server support modules for running a bot casino table.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod observer;
