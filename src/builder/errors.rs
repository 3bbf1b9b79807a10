//! Error types for toolchain resolution and flag composition.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while resolving the toolchain or composing flags.
///
/// `ProbeFailed` is swallowed for secondary probes (Clang tag, timestamp);
/// everything else aborts the configuration run.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to probe `{program}`: {reason}")]
    ProbeFailed { program: String, reason: String },

    #[error(
        "unsupported toolchain `{}` on {system}: expected a GCC-compatible or MSVC compiler",
        compiler.display()
    )]
    UnsupportedToolchain { compiler: PathBuf, system: String },

    #[error("invalid platform selector `{0}` (expected one of: gcc, clang, msvc, all)")]
    InvalidPlatformSelector(String),

    #[error("toolchain environment has not been resolved yet")]
    NotResolved,
}

impl EnvError {
    pub(crate) fn probe_failed(program: impl Into<String>, reason: impl Into<String>) -> Self {
        EnvError::ProbeFailed {
            program: program.into(),
            reason: reason.into(),
        }
    }
}
