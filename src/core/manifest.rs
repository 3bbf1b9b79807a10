//! Ccenv.toml build description parsing.
//!
//! The build description lists preprocessor definitions and
//! platform-gated flag steps, applied in file order once the toolchain is
//! resolved:
//!
//! ```toml
//! definitions = ["USE_THREADS", "LEVEL=2"]
//!
//! [[flags]]
//! platform = "gcc"
//! flags = ["-Wall", "-Wextra"]
//!
//! [[flags]]
//! platform = "msvc"
//! lang = "cxx"
//! config = "release"
//! flags = ["/GL"]
//!
//! # vendored code below takes the compiler defaults verbatim
//! [[flags]]
//! reset = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::builder::cache::ResolvedEnvironment;
use crate::builder::flags::{BuildType, FlagAccumulator, FlagComposer, LangSelector, TargetPlatform};

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Ccenv.toml";

/// One validated step of a build description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagStep {
    /// Append flags when `platform` matches the resolved toolchain
    Add {
        platform: TargetPlatform,
        lang: LangSelector,
        config: Option<BuildType>,
        flags: Vec<String>,
    },
    /// Restore the default flag lists
    Reset,
}

/// Parsed and validated build description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Definitions, in order
    pub definitions: Vec<String>,
    /// Flag steps, in order
    pub steps: Vec<FlagStep>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    definitions: Vec<String>,
    #[serde(default)]
    flags: Vec<RawFlagStep>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFlagStep {
    platform: Option<String>,
    lang: Option<LangSelector>,
    config: Option<BuildType>,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    reset: bool,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    ///
    /// Platform selectors are checked here, so a bad selector aborts before
    /// any compiler is probed.
    pub fn parse(contents: &str) -> Result<Self> {
        let raw: RawManifest = toml::from_str(contents).context("invalid build description")?;

        let mut steps = Vec::with_capacity(raw.flags.len());
        for (i, step) in raw.flags.into_iter().enumerate() {
            if step.reset {
                if step.platform.is_some()
                    || step.lang.is_some()
                    || step.config.is_some()
                    || !step.flags.is_empty()
                {
                    return Err(anyhow!(
                        "`reset = true` cannot be combined with platform, lang, config or flags"
                    ))
                    .with_context(|| format!("in [[flags]] entry {}", i + 1));
                }
                steps.push(FlagStep::Reset);
                continue;
            }

            let platform = match step.platform {
                Some(ref s) => s
                    .parse::<TargetPlatform>()
                    .with_context(|| format!("in [[flags]] entry {}", i + 1))?,
                None => TargetPlatform::All,
            };

            steps.push(FlagStep::Add {
                platform,
                lang: step.lang.unwrap_or_default(),
                config: step.config,
                flags: step.flags,
            });
        }

        Ok(Manifest {
            definitions: raw.definitions,
            steps,
        })
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to load {}", path.display()))
    }

    /// Load `Ccenv.toml` from `dir` if there is one.
    pub fn find(dir: &Path) -> Result<Option<Self>> {
        let path = manifest_path(dir);
        if !path.exists() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Apply definitions and then every flag step, in order.
    pub fn apply(&self, env: &ResolvedEnvironment, acc: &mut FlagAccumulator) {
        let mut composer = FlagComposer::new(env, acc);
        composer.add_definitions(&self.definitions);

        for step in &self.steps {
            match step {
                FlagStep::Add {
                    platform,
                    lang,
                    config: Some(config),
                    flags,
                } => {
                    composer.add_config_flag(*config, *lang, *platform, flags);
                }
                FlagStep::Add {
                    platform,
                    lang,
                    config: None,
                    flags,
                } => match lang {
                    LangSelector::Both => {
                        composer.add_flag(*platform, flags);
                    }
                    LangSelector::C => {
                        composer.add_c_flag(*platform, flags);
                    }
                    LangSelector::Cxx => {
                        composer.add_cxx_flag(*platform, flags);
                    }
                },
                FlagStep::Reset => {
                    composer.restore_defaults();
                }
            }
        }
    }
}

/// Path of the manifest in `dir`.
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_NAME)
}
