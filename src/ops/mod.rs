//! High-level operations.
//!
//! This module contains the implementation of ccenv commands.

pub mod configure;
pub mod session;

pub use configure::{configure, configure_invocation, configure_with, ConfigureOptions};
pub use session::Session;
