//! Toolchain resolution and compiler flag composition.
//!
//! This module classifies the C/C++ compiler, derives the platform facts
//! that flags are gated on, and composes flag lists for the configure step.

pub mod cache;
pub mod cmake;
pub mod environment;
pub mod errors;
pub mod flags;
pub mod toolchain;

pub use cache::{ResolutionCache, ResolvedEnvironment};
pub use cmake::CMakeConfigure;
pub use environment::{Bits, Os, PlatformIdentity, StandardSupport, SystemInfo};
pub use errors::EnvError;
pub use flags::{
    BuildType, FlagAccumulator, FlagComposer, FlagSet, LangSelector, Language, TargetPlatform,
};
pub use toolchain::{classify, ToolchainFamily, ToolchainIdentity};
