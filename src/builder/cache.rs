//! Run-once resolution of the toolchain environment.
//!
//! [`ResolutionCache`] owns the resolved environment. The first
//! [`ResolutionCache::ensure_resolved`] call snapshots the pristine flag
//! lists, probes the compiler and stores the result; later calls hand back
//! the stored value without spawning anything. Callers pass the cache
//! around explicitly instead of reaching for a global.

use std::path::Path;

use serde::Serialize;

use crate::builder::environment::{self, PlatformIdentity, StandardSupport, SystemInfo};
use crate::builder::errors::EnvError;
use crate::builder::flags::{FlagAccumulator, FlagSet};
use crate::builder::toolchain::{self, ToolchainIdentity};
use crate::util::process::{ProcessProbe, SystemProbe};

/// Everything known about the toolchain after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnvironment {
    pub toolchain: ToolchainIdentity,
    pub platform: PlatformIdentity,
    pub standard: StandardSupport,
    /// Generator is an IDE (Xcode)
    pub is_ide_generator: bool,
    /// Flag lists as they were before the first mutation
    pub defaults: FlagSet,
    /// Wall-clock time of resolution, for build provenance only
    pub timestamp: Option<String>,
}

/// Resolves the environment once and keeps the answer.
pub struct ResolutionCache<P = SystemProbe> {
    system: SystemInfo,
    probe: P,
    resolved: Option<ResolvedEnvironment>,
}

impl ResolutionCache<SystemProbe> {
    /// Cache probing real processes.
    pub fn for_system(system: SystemInfo) -> Self {
        ResolutionCache::new(system, SystemProbe)
    }
}

impl<P: ProcessProbe> ResolutionCache<P> {
    pub fn new(system: SystemInfo, probe: P) -> Self {
        ResolutionCache {
            system,
            probe,
            resolved: None,
        }
    }

    pub fn system(&self) -> &SystemInfo {
        &self.system
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// The stored environment, if resolution already ran.
    pub fn get(&self) -> Option<&ResolvedEnvironment> {
        self.resolved.as_ref()
    }

    /// Resolve on first call; return the stored environment afterwards.
    ///
    /// `flags` is only read on the first call, where its current lists
    /// become the defaults that [`ResolutionCache::restore_defaults`] returns to.
    pub fn ensure_resolved(
        &mut self,
        flags: &FlagAccumulator,
    ) -> Result<&ResolvedEnvironment, EnvError> {
        if self.resolved.is_none() {
            let env = self.resolve_now(flags)?;
            self.resolved = Some(env);
        }
        self.resolved.as_ref().ok_or(EnvError::NotResolved)
    }

    /// Put `flags` back to the snapshot taken at resolution.
    pub fn restore_defaults(&self, flags: &mut FlagAccumulator) -> Result<(), EnvError> {
        let env = self.resolved.as_ref().ok_or(EnvError::NotResolved)?;
        flags.restore_defaults(env);
        Ok(())
    }

    fn resolve_now(&self, flags: &FlagAccumulator) -> Result<ResolvedEnvironment, EnvError> {
        let defaults = flags.flags().clone();

        let identity = toolchain::classify(&self.system, &self.probe)?;
        let (platform, standard, is_ide_generator) = environment::resolve(&identity, &self.system);
        let timestamp = build_timestamp(&self.probe);

        tracing::info!(
            "resolved toolchain {} on {} (C++11 subset: {})",
            identity,
            platform,
            if standard.has_cxx11_subset { "yes" } else { "no" }
        );

        Ok(ResolvedEnvironment {
            toolchain: identity,
            platform,
            standard,
            is_ide_generator,
            defaults,
            timestamp,
        })
    }
}

/// Ask the platform date command for the current time.
///
/// `date -R` prints `Day, DD Mon YYYY HH:MM:SS +ZZZZ`; on Windows the
/// locale date from `date /T` is the best available.
fn build_timestamp<P: ProcessProbe + ?Sized>(probe: &P) -> Option<String> {
    let result = if cfg!(target_os = "windows") {
        probe.probe(Path::new("cmd"), &["/C", "date", "/T"])
    } else {
        probe.probe(Path::new("date"), &["-R"])
    };

    match result {
        Ok(out) => Some(out.trim().to_string()).filter(|s| !s.is_empty()),
        Err(e) => {
            tracing::warn!("could not record build timestamp: {}", e);
            None
        }
    }
}
