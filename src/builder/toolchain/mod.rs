//! Toolchain identity for C/C++ compilers.
//!
//! A compiler is classified into exactly one primary family. Clang is
//! usually detected as an additive tag on top of [`ToolchainFamily::GccCompatible`],
//! because it accepts the GNU command-line syntax; the `Clang` family only
//! appears when a toolchain config forces it.
//!
//! Classification order:
//! 1. Forced family from `toolchain.toml`, if any
//! 2. GNU convention (non-Windows system or a MinGW-style driver) with a
//!    working `-dumpversion`
//! 3. MSVC front-end (Visual Studio generator or a `cl` banner)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::builder::errors::EnvError;

mod detect;
mod gcc;
mod msvc;

pub use detect::classify;
pub use gcc::normalize_version;
pub use msvc::generation_from_cl_version;

/// The primary family of a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolchainFamily {
    /// GCC, or anything that speaks its command line
    #[serde(rename = "gcc", alias = "gnu")]
    GccCompatible,
    /// Clang, when forced as the primary family
    Clang,
    /// Microsoft Visual C++
    Msvc,
}

impl ToolchainFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainFamily::GccCompatible => "gcc",
            ToolchainFamily::Clang => "clang",
            ToolchainFamily::Msvc => "msvc",
        }
    }

    /// Whether the family accepts GNU-style options.
    pub fn is_gcc_compatible(&self) -> bool {
        match self {
            ToolchainFamily::GccCompatible | ToolchainFamily::Clang => true,
            ToolchainFamily::Msvc => false,
        }
    }
}

impl std::fmt::Display for ToolchainFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the classifier learned about the active compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainIdentity {
    /// Compiler that was probed
    pub compiler: PathBuf,
    /// Primary family
    pub family: ToolchainFamily,
    /// Normalized two-digit version ("4.8.1" -> "48"), GCC family only
    pub version_token: Option<String>,
    /// Secondary Clang tag from `--version`
    pub is_clang: bool,
    /// Visual Studio generation marker ("10" for VS2010), MSVC only
    pub msvc_generation: Option<String>,
}

impl ToolchainIdentity {
    /// Identity of a GCC-compatible compiler.
    pub fn gcc(compiler: impl Into<PathBuf>, version_token: impl Into<String>, is_clang: bool) -> Self {
        ToolchainIdentity {
            compiler: compiler.into(),
            family: ToolchainFamily::GccCompatible,
            version_token: Some(version_token.into()),
            is_clang,
            msvc_generation: None,
        }
    }

    /// Identity of an MSVC front-end.
    pub fn msvc(compiler: impl Into<PathBuf>, generation: Option<String>) -> Self {
        ToolchainIdentity {
            compiler: compiler.into(),
            family: ToolchainFamily::Msvc,
            version_token: None,
            is_clang: false,
            msvc_generation: generation,
        }
    }

    /// Whether the compiler accepts GNU-style options.
    pub fn is_gcc_compatible(&self) -> bool {
        self.family.is_gcc_compatible()
    }

    /// Whether the compiler is Clang, either by tag or by forced family.
    pub fn is_clang(&self) -> bool {
        self.is_clang || self.family == ToolchainFamily::Clang
    }

    /// Whether the compiler is the MSVC front-end.
    pub fn is_msvc(&self) -> bool {
        self.family == ToolchainFamily::Msvc
    }

    /// Preprocessor definition flag for `name` in this toolchain's syntax.
    pub fn define_flag(&self, name: &str) -> String {
        let prefix = match self.family {
            ToolchainFamily::GccCompatible | ToolchainFamily::Clang => gcc::DEFINE_PREFIX,
            ToolchainFamily::Msvc => msvc::DEFINE_PREFIX,
        };
        format!("{}{}", prefix, name)
    }

    /// Error for a compiler that fits no known family.
    pub(crate) fn unsupported(compiler: impl Into<PathBuf>, system: &str) -> EnvError {
        EnvError::UnsupportedToolchain {
            compiler: compiler.into(),
            system: system.to_string(),
        }
    }
}

impl std::fmt::Display for ToolchainIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.family)?;
        if let Some(ref token) = self.version_token {
            write!(f, "-{}", token)?;
        }
        if let Some(ref generation) = self.msvc_generation {
            write!(f, " (Visual Studio {})", generation)?;
        }
        if self.is_clang && self.family != ToolchainFamily::Clang {
            write!(f, " [clang]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_flag_syntax() {
        let gcc = ToolchainIdentity::gcc("gcc", "48", false);
        assert_eq!(gcc.define_flag("FOO"), "-DFOO");

        let msvc = ToolchainIdentity::msvc("cl", Some("10".to_string()));
        assert_eq!(msvc.define_flag("FOO"), "/DFOO");
        assert_eq!(msvc.define_flag("LEVEL=2"), "/DLEVEL=2");
    }

    #[test]
    fn test_clang_tag_is_additive() {
        let tagged = ToolchainIdentity::gcc("cc", "42", true);
        assert_eq!(tagged.family, ToolchainFamily::GccCompatible);
        assert!(tagged.is_gcc_compatible());
        assert!(tagged.is_clang());

        let mut forced = ToolchainIdentity::gcc("clang", "42", false);
        forced.family = ToolchainFamily::Clang;
        assert!(forced.is_clang());
        assert!(forced.is_gcc_compatible());
        assert_eq!(forced.define_flag("X"), "-DX");
    }

    #[test]
    fn test_identity_display() {
        assert_eq!(ToolchainIdentity::gcc("gcc", "48", false).to_string(), "gcc-48");
        assert_eq!(ToolchainIdentity::gcc("cc", "42", true).to_string(), "gcc-42 [clang]");
        assert_eq!(
            ToolchainIdentity::msvc("cl", Some("10".to_string())).to_string(),
            "msvc (Visual Studio 10)"
        );
    }
}
