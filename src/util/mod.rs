//! Shared utilities

pub mod config;
pub mod process;

pub use config::ToolchainConfig;
pub use process::{ProcessBuilder, ProcessProbe, SystemProbe};
