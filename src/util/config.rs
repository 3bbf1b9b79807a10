//! Toolchain configuration files.
//!
//! Two locations are read:
//! - Global: `~/.ccenv/toolchain.toml` - User-wide defaults
//! - Project: `.ccenv/toolchain.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. The `CC`,
//! `CFLAGS` and `CXXFLAGS` environment variables fill in whatever neither
//! file sets.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::builder::environment::SystemInfo;
use crate::builder::flags::FlagSet;
use crate::builder::toolchain::ToolchainFamily;
use crate::util::process::{find_c_compiler, find_executable};

/// Toolchain configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Toolchain settings for C/C++ configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path or name of the C compiler (e.g., /usr/bin/clang)
    pub cc: Option<PathBuf>,

    /// Force a toolchain family instead of probing for it
    pub family: Option<ToolchainFamily>,

    /// Project generator (e.g., "Ninja", "Xcode", "Visual Studio 10")
    pub generator: Option<String>,

    /// Reported system name, for configuring another platform
    pub system_name: Option<String>,

    /// Reported pointer size in bytes
    pub pointer_size: Option<usize>,

    /// Default C compiler flags
    pub cflags: Vec<String>,

    /// Default C++ compiler flags
    pub cxxflags: Vec<String>,

    /// Default extra C flags for debug builds
    pub cflags_debug: Vec<String>,

    /// Default extra C++ flags for debug builds
    pub cxxflags_debug: Vec<String>,

    /// Default extra C flags for release builds
    pub cflags_release: Vec<String>,

    /// Default extra C++ flags for release builds
    pub cxxflags_release: Vec<String>,
}

impl ToolchainConfig {
    /// Load toolchain configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read toolchain config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Load toolchain configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to load toolchain config from {}: {:#}",
                    path.display(),
                    e
                );
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ToolchainConfig) {
        let ours = &mut self.toolchain;
        let theirs = other.toolchain;

        if theirs.cc.is_some() {
            ours.cc = theirs.cc;
        }
        if theirs.family.is_some() {
            ours.family = theirs.family;
        }
        if theirs.generator.is_some() {
            ours.generator = theirs.generator;
        }
        if theirs.system_name.is_some() {
            ours.system_name = theirs.system_name;
        }
        if theirs.pointer_size.is_some() {
            ours.pointer_size = theirs.pointer_size;
        }

        // Flag lists replace, they do not append
        for (dst, src) in [
            (&mut ours.cflags, theirs.cflags),
            (&mut ours.cxxflags, theirs.cxxflags),
            (&mut ours.cflags_debug, theirs.cflags_debug),
            (&mut ours.cxxflags_debug, theirs.cxxflags_debug),
            (&mut ours.cflags_release, theirs.cflags_release),
            (&mut ours.cxxflags_release, theirs.cxxflags_release),
        ] {
            if !src.is_empty() {
                *dst = src;
            }
        }
    }

    /// The pristine flag lists a configuration run starts from.
    pub fn default_flags(&self) -> FlagSet {
        let tc = &self.toolchain;
        FlagSet {
            c: flags_or_env(&tc.cflags, "CFLAGS"),
            cxx: flags_or_env(&tc.cxxflags, "CXXFLAGS"),
            c_debug: tc.cflags_debug.clone(),
            cxx_debug: tc.cxxflags_debug.clone(),
            c_release: tc.cflags_release.clone(),
            cxx_release: tc.cxxflags_release.clone(),
        }
    }

    /// Build the system description for resolution.
    ///
    /// `generator` overrides the configured generator.
    pub fn system_info(&self, generator: Option<&str>) -> Result<SystemInfo> {
        let tc = &self.toolchain;

        let compiler = match &tc.cc {
            Some(cc) if cc.exists() => cc.clone(),
            Some(cc) => match cc.to_str().and_then(find_executable) {
                Some(found) => found,
                None => bail!("configured C compiler not found: {}", cc.display()),
            },
            None => match find_c_compiler() {
                Some(cc) => cc,
                None => bail!(
                    "no C compiler found\n\
                     \n\
                     ccenv requires a C compiler (gcc, clang, or cl).\n\
                     Set the CC environment variable, add `cc` to .ccenv/toolchain.toml,\n\
                     or install a compiler."
                ),
            },
        };

        let mut system = SystemInfo::host(compiler);
        if let Some(generator) = generator.or(tc.generator.as_deref()) {
            system.generator = generator.to_string();
        }
        if let Some(ref name) = tc.system_name {
            system.system_name = name.clone();
        }
        if let Some(size) = tc.pointer_size {
            system.pointer_size = size;
        }
        system.forced_family = tc.family;

        Ok(system)
    }
}

fn flags_or_env(configured: &[String], var: &str) -> Vec<String> {
    if !configured.is_empty() {
        return configured.to_vec();
    }
    std::env::var(var)
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Load merged toolchain configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ccenv/toolchain.toml)
/// 2. Global config (~/.ccenv/toolchain.toml)
/// 3. Defaults
pub fn load_toolchain_config(global_path: &Path, project_path: &Path) -> ToolchainConfig {
    let mut config = ToolchainConfig::default();

    if global_path.exists() {
        config.merge(ToolchainConfig::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(ToolchainConfig::load_or_default(project_path));
    }

    config
}

/// Load the configuration that applies to `project_root`.
pub fn load_for_project(project_root: &Path) -> ToolchainConfig {
    let project_path = project_toolchain_config_path(project_root);
    let global_path = global_toolchain_config_path().unwrap_or_default();
    load_toolchain_config(&global_path, &project_path)
}

/// Get the global ccenv config directory (~/.ccenv).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ccenv"))
}

/// Get the global toolchain config path (~/.ccenv/toolchain.toml).
pub fn global_toolchain_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchain.toml"))
}

/// Get the project toolchain config path (.ccenv/toolchain.toml).
pub fn project_toolchain_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".ccenv").join("toolchain.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toolchain_config_default() {
        let config = ToolchainConfig::default();
        assert!(config.toolchain.cc.is_none());
        assert!(config.toolchain.family.is_none());
        assert!(config.toolchain.generator.is_none());
        assert!(config.toolchain.cflags.is_empty());
    }

    #[test]
    fn test_toolchain_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("toolchain.toml");

        std::fs::write(
            &config_path,
            r#"
[toolchain]
cc = "/usr/bin/clang"
family = "clang"
generator = "Ninja"
system_name = "Darwin"
pointer_size = 8
cflags = ["-Wall", "-Wextra"]
cxxflags = ["-std=c++0x"]
cflags_debug = ["-g"]
cxxflags_release = ["-O2"]
"#,
        )
        .unwrap();

        let config = ToolchainConfig::load(&config_path).unwrap();
        let tc = &config.toolchain;
        assert_eq!(tc.cc, Some(PathBuf::from("/usr/bin/clang")));
        assert_eq!(tc.family, Some(ToolchainFamily::Clang));
        assert_eq!(tc.generator.as_deref(), Some("Ninja"));
        assert_eq!(tc.system_name.as_deref(), Some("Darwin"));
        assert_eq!(tc.pointer_size, Some(8));
        assert_eq!(tc.cflags, vec!["-Wall", "-Wextra"]);
        assert_eq!(tc.cxxflags, vec!["-std=c++0x"]);

        let flags = config.default_flags();
        assert_eq!(flags.c, vec!["-Wall", "-Wextra"]);
        assert_eq!(flags.c_debug, vec!["-g"]);
        assert_eq!(flags.cxx_release, vec!["-O2"]);
        assert!(flags.cxx_debug.is_empty());
    }

    #[test]
    fn test_toolchain_config_family_gcc_spelling() {
        let config: ToolchainConfig = toml::from_str("[toolchain]\nfamily = \"gcc\"\n").unwrap();
        assert_eq!(config.toolchain.family, Some(ToolchainFamily::GccCompatible));

        let gnu: ToolchainConfig = toml::from_str("[toolchain]\nfamily = \"gnu\"\n").unwrap();
        assert_eq!(gnu.toolchain.family, Some(ToolchainFamily::GccCompatible));

        let bad: Result<ToolchainConfig, _> = toml::from_str("[toolchain]\nfamily = \"icc\"\n");
        assert!(bad.is_err());
    }

    #[test]
    fn test_toolchain_config_merge() {
        let mut base = ToolchainConfig::default();
        base.toolchain.cc = Some(PathBuf::from("/usr/bin/gcc"));
        base.toolchain.generator = Some("Unix Makefiles".to_string());
        base.toolchain.cflags = vec!["-Wall".to_string()];

        let mut override_cfg = ToolchainConfig::default();
        override_cfg.toolchain.cc = Some(PathBuf::from("/usr/bin/clang"));
        override_cfg.toolchain.cflags = vec!["-Werror".to_string()];

        base.merge(override_cfg);

        assert_eq!(base.toolchain.cc, Some(PathBuf::from("/usr/bin/clang")));
        assert_eq!(base.toolchain.generator.as_deref(), Some("Unix Makefiles"));
        // cflags are replaced, not merged
        assert_eq!(base.toolchain.cflags, vec!["-Werror"]);
    }

    #[test]
    fn test_load_toolchain_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[toolchain]
cc = "/usr/bin/gcc"
generator = "Ninja"
cflags = ["-O2"]
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[toolchain]
cc = "/usr/bin/clang"
cflags = ["-O3"]
"#,
        )
        .unwrap();

        let config = load_toolchain_config(&global_path, &project_path);

        assert_eq!(config.toolchain.cc, Some(PathBuf::from("/usr/bin/clang")));
        assert_eq!(config.toolchain.generator.as_deref(), Some("Ninja"));
        assert_eq!(config.toolchain.cflags, vec!["-O3"]);
    }

    #[test]
    fn test_broken_config_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("toolchain.toml");
        std::fs::write(&path, "[toolchain\ncc = ").unwrap();

        let config = ToolchainConfig::load_or_default(&path);
        assert!(config.toolchain.cc.is_none());
    }

    #[test]
    fn test_system_info_overrides() {
        let tmp = TempDir::new().unwrap();
        let cc = tmp.path().join("my-gcc");
        std::fs::write(&cc, "").unwrap();

        let mut config = ToolchainConfig::default();
        config.toolchain.cc = Some(cc.clone());
        config.toolchain.generator = Some("Ninja".to_string());
        config.toolchain.system_name = Some("Windows".to_string());
        config.toolchain.pointer_size = Some(4);
        config.toolchain.family = Some(ToolchainFamily::Msvc);

        let system = config.system_info(None).unwrap();
        assert_eq!(system.compiler, cc);
        assert_eq!(system.generator, "Ninja");
        assert_eq!(system.system_name, "Windows");
        assert_eq!(system.pointer_size, 4);
        assert_eq!(system.forced_family, Some(ToolchainFamily::Msvc));

        let xcode = config.system_info(Some("Xcode")).unwrap();
        assert_eq!(xcode.generator, "Xcode");
    }

    #[test]
    fn test_system_info_missing_compiler() {
        let mut config = ToolchainConfig::default();
        config.toolchain.cc = Some(PathBuf::from("/nonexistent/ccenv-cc"));

        let err = config.system_info(None).unwrap_err();
        assert!(err.to_string().contains("configured C compiler not found"));
    }

    #[test]
    fn test_project_config_path() {
        let path = project_toolchain_config_path(Path::new("/work/app"));
        assert_eq!(path, PathBuf::from("/work/app/.ccenv/toolchain.toml"));
    }
}
