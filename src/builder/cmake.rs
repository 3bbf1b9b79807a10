//! CMake configure invocation carrying the composed flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::flags::{BuildType, FlagAccumulator, Language};
use crate::util::process::{find_cmake, ProcessBuilder};

/// A `cmake -G ...` configure run.
#[derive(Debug, Clone)]
pub struct CMakeConfigure {
    source_dir: PathBuf,
    build_dir: Option<PathBuf>,
    generator: String,
    build_type: BuildType,
    cache_entries: Vec<(String, String)>,
}

impl CMakeConfigure {
    /// Create a configure run for `source_dir` with the given generator.
    pub fn new(source_dir: impl Into<PathBuf>, generator: impl Into<String>, build_type: BuildType) -> Self {
        CMakeConfigure {
            source_dir: source_dir.into(),
            build_dir: None,
            generator: generator.into(),
            build_type,
            cache_entries: Vec::new(),
        }
    }

    /// Set a separate build directory (`-B`).
    pub fn build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = Some(dir.into());
        self
    }

    /// Add a `-D<name>=<value>` cache entry.
    pub fn define(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cache_entries.push((name.into(), value.into()));
        self
    }

    /// Carry the six flag lists as `CMAKE_<LANG>_FLAGS[_<CONFIG>]` entries.
    ///
    /// Definitions are folded into the base C and C++ strings.
    pub fn flags(mut self, acc: &FlagAccumulator) -> Self {
        for (lang, prefix) in [(Language::C, "CMAKE_C_FLAGS"), (Language::Cxx, "CMAKE_CXX_FLAGS")] {
            self.cache_entries
                .push((prefix.to_string(), acc.command_line(lang, None)));
            for config in [BuildType::Debug, BuildType::Release] {
                self.cache_entries.push((
                    format!("{}_{}", prefix, config.as_cmake().to_uppercase()),
                    acc.command_line(lang, Some(config)),
                ));
            }
        }
        self
    }

    /// Build the process for `cmake`.
    pub fn command(&self, cmake: &Path) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(cmake);

        cmd = cmd.arg("-G").arg(&self.generator);
        cmd = cmd.arg("-S").arg(&self.source_dir);
        if let Some(ref build_dir) = self.build_dir {
            cmd = cmd.arg("-B").arg(build_dir);
        }

        cmd = cmd.arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type.as_cmake()));

        for (name, value) in &self.cache_entries {
            cmd = cmd.arg(format!("-D{}={}", name, value));
        }

        cmd
    }

    /// Run the configure step and return the tool's exit code.
    pub fn run(&self) -> Result<i32> {
        let Some(cmake) = find_cmake() else {
            bail!(
                "CMake not found\n\
                 \n\
                 CMake is required to generate project files.\n\
                 Install CMake and ensure it's in your PATH."
            );
        };

        let cmd = self.command(&cmake);
        tracing::info!("Configuring with `{}`", cmd.display_command());

        let status = cmd.status()?;
        // A signal-terminated cmake has no code
        Ok(status.code().unwrap_or(1))
    }
}
