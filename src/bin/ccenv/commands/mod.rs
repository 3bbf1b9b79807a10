//! Command implementations

pub mod completions;
pub mod configure;
pub mod flags;
pub mod show;
