//! Platform, pointer width and language-standard resolution.
//!
//! Everything here is derived from facts the build system reports
//! ([`SystemInfo`]) plus the classified [`ToolchainIdentity`]; nothing
//! spawns a process.

use std::path::PathBuf;

use serde::Serialize;

use crate::builder::toolchain::{ToolchainFamily, ToolchainIdentity};

/// GCC version token that still lacks the C++11 subset (GCC 4.4).
pub const CXX11_GCC_THRESHOLD: &str = "44";

/// Visual Studio generation that introduced partial C++11 (VS2010).
pub const CXX11_MSVC_GENERATION: &str = "10";

/// Generator name of the Xcode IDE.
pub const XCODE_GENERATOR: &str = "Xcode";

/// Facts the build system reports about the configuration host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// Reported system name ("Linux", "Darwin", "Windows", ...)
    pub system_name: String,
    /// Pointer size in bytes
    pub pointer_size: usize,
    /// Active project generator ("Unix Makefiles", "Xcode", ...)
    pub generator: String,
    /// C compiler to probe
    pub compiler: PathBuf,
    /// Family forced by configuration, skipping the GNU convention check
    pub forced_family: Option<ToolchainFamily>,
}

impl SystemInfo {
    /// Describe the host this process runs on.
    pub fn host(compiler: impl Into<PathBuf>) -> Self {
        SystemInfo {
            system_name: host_system_name().to_string(),
            pointer_size: std::mem::size_of::<usize>(),
            generator: default_generator().to_string(),
            compiler: compiler.into(),
            forced_family: None,
        }
    }

    /// Set the project generator.
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Whether GNU-style tools are the platform default.
    pub fn follows_unix_convention(&self) -> bool {
        self.system_name != "Windows"
    }
}

/// System name in the spelling build tools report it.
fn host_system_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        other => other,
    }
}

fn default_generator() -> &'static str {
    if cfg!(target_os = "windows") {
        "Visual Studio 17 2022"
    } else {
        "Unix Makefiles"
    }
}

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
}

impl Os {
    /// Match the reported system name exactly.
    ///
    /// There is no positive Windows check: anything that is neither
    /// "Darwin" nor "Linux" is treated as Windows.
    pub fn from_system_name(name: &str) -> Self {
        match name {
            "Darwin" => Os::Darwin,
            "Linux" => Os::Linux,
            _ => Os::Windows,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Darwin => "Darwin",
            Os::Linux => "Linux",
            Os::Windows => "Windows",
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer width of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bits {
    Bits32,
    Bits64,
}

impl Bits {
    pub fn from_pointer_size(size: usize) -> Self {
        if size == 8 {
            Bits::Bits64
        } else {
            Bits::Bits32
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            Bits::Bits32 => 32,
            Bits::Bits64 => 64,
        }
    }
}

/// Operating system plus pointer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformIdentity {
    pub os: Os,
    pub bits: Bits,
}

impl PlatformIdentity {
    pub fn detect(system: &SystemInfo) -> Self {
        PlatformIdentity {
            os: Os::from_system_name(&system.system_name),
            bits: Bits::from_pointer_size(system.pointer_size),
        }
    }
}

impl std::fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}-bit)", self.os, self.bits.as_u32())
    }
}

/// Language-standard facts about the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardSupport {
    /// At least a subset of C++11 is available
    pub has_cxx11_subset: bool,
}

impl StandardSupport {
    /// Decide C++11 availability.
    ///
    /// The GCC check compares version tokens as strings, so two-digit
    /// majors ("10", "12") sort below "44" and report no support.
    pub fn evaluate(identity: &ToolchainIdentity) -> Self {
        let has_cxx11_subset = match identity.family {
            ToolchainFamily::GccCompatible | ToolchainFamily::Clang => identity
                .version_token
                .as_deref()
                .is_some_and(|token| token > CXX11_GCC_THRESHOLD),
            ToolchainFamily::Msvc => {
                identity.msvc_generation.as_deref() == Some(CXX11_MSVC_GENERATION)
            }
        };

        StandardSupport { has_cxx11_subset }
    }
}

/// Whether the generator is an IDE whose projects need special handling.
///
/// Only checked for GCC-compatible toolchains.
pub fn is_ide_generator(identity: &ToolchainIdentity, system: &SystemInfo) -> bool {
    identity.is_gcc_compatible() && system.generator == XCODE_GENERATOR
}

/// Resolve platform, standard support and the IDE-generator flag.
pub fn resolve(
    identity: &ToolchainIdentity,
    system: &SystemInfo,
) -> (PlatformIdentity, StandardSupport, bool) {
    (
        PlatformIdentity::detect(system),
        StandardSupport::evaluate(identity),
        is_ide_generator(identity, system),
    )
}
