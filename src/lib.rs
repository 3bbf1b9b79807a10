//! ccenv - toolchain detection and platform-gated compiler flags
//!
//! This crate provides the library behind the `ccenv` generator wrapper:
//! compiler classification, a run-once resolution cache, and flag
//! composition gated on the resolved toolchain.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for ccenv unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a canned process probe and common
/// system fixtures.
#[cfg(test)]
pub mod test_support;

pub use builder::{
    BuildType, EnvError, FlagAccumulator, FlagComposer, ResolutionCache, ResolvedEnvironment,
    SystemInfo, TargetPlatform, ToolchainFamily, ToolchainIdentity,
};
pub use crate::core::Manifest;
