//! A resolved configuration run for one project.

use std::path::Path;

use anyhow::{Context, Result};

use crate::builder::cache::{ResolutionCache, ResolvedEnvironment};
use crate::builder::environment::SystemInfo;
use crate::builder::flags::{BuildType, FlagAccumulator, FlagSet, Language};
use crate::core::Manifest;
use crate::util::config::load_for_project;
use crate::util::process::{ProcessProbe, SystemProbe};

/// Resolution cache and flag state for one project directory.
pub struct Session<P = SystemProbe> {
    cache: ResolutionCache<P>,
    flags: FlagAccumulator,
}

impl Session<SystemProbe> {
    /// Load config and `Ccenv.toml` for `root`, resolve, and compose flags.
    ///
    /// `generator` overrides the configured generator.
    pub fn open(root: &Path, generator: Option<&str>) -> Result<Self> {
        // Parsed up front so a bad selector aborts before any probe runs
        let manifest = Manifest::find(root)?;

        let config = load_for_project(root);
        let system = config.system_info(generator)?;
        tracing::debug!(
            "configuring {} with {} ({})",
            root.display(),
            system.compiler.display(),
            system.generator
        );

        let mut session = Session::new(ResolutionCache::for_system(system), config.default_flags());
        session.compose(manifest.as_ref())?;
        Ok(session)
    }
}

impl<P: ProcessProbe> Session<P> {
    pub fn new(cache: ResolutionCache<P>, defaults: FlagSet) -> Self {
        Session {
            cache,
            flags: FlagAccumulator::new(defaults),
        }
    }

    /// Resolve the environment, then apply `manifest` if there is one.
    pub fn compose(&mut self, manifest: Option<&Manifest>) -> Result<&ResolvedEnvironment> {
        let env = self
            .cache
            .ensure_resolved(&self.flags)
            .context("failed to resolve the C/C++ toolchain")?;

        if let Some(manifest) = manifest {
            manifest.apply(env, &mut self.flags);
        }

        Ok(env)
    }

    pub fn system(&self) -> &SystemInfo {
        self.cache.system()
    }

    /// The resolved environment, once [`Session::compose`] has succeeded.
    pub fn env(&self) -> Option<&ResolvedEnvironment> {
        self.cache.get()
    }

    pub fn flags(&self) -> &FlagAccumulator {
        &self.flags
    }

    /// Everything a compile of `lang` in `config` sees, in command order.
    pub fn effective_flags(&self, lang: Language, config: BuildType) -> String {
        [
            self.flags.command_line(lang, None),
            self.flags.command_line(lang, Some(config)),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}
