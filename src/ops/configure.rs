//! Implementation of `ccenv configure`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::cmake::CMakeConfigure;
use crate::builder::errors::EnvError;
use crate::builder::flags::BuildType;
use crate::ops::session::Session;
use crate::util::process::ProcessProbe;

/// Options for the configure command.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Build type passed as `CMAKE_BUILD_TYPE`
    pub build_type: BuildType,

    /// Generator override (defaults to config, then the platform default)
    pub generator: Option<String>,

    /// Project source directory holding `Ccenv.toml` and `.ccenv/`
    pub source_dir: PathBuf,

    /// Separate build directory
    pub build_dir: Option<PathBuf>,
}

impl ConfigureOptions {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        ConfigureOptions {
            build_type: BuildType::Debug,
            generator: None,
            source_dir: source_dir.into(),
            build_dir: None,
        }
    }
}

/// Configure the project in `base_dir` with `generator`.
///
/// Returns the exit status of the configure tool.
pub fn configure(build_type: BuildType, generator: &str, base_dir: &Path) -> Result<i32> {
    configure_with(&ConfigureOptions {
        build_type,
        generator: Some(generator.to_string()),
        ..ConfigureOptions::new(base_dir)
    })
}

/// Resolve, compose flags and run the configure tool.
pub fn configure_with(opts: &ConfigureOptions) -> Result<i32> {
    let session = Session::open(&opts.source_dir, opts.generator.as_deref())?;
    configure_invocation(&session, opts)?.run()
}

/// The configure invocation for an already composed session.
pub fn configure_invocation<P: ProcessProbe>(
    session: &Session<P>,
    opts: &ConfigureOptions,
) -> Result<CMakeConfigure> {
    let env = session.env().ok_or(EnvError::NotResolved)?;

    let mut invocation = CMakeConfigure::new(
        &opts.source_dir,
        &session.system().generator,
        opts.build_type,
    )
    .flags(session.flags())
    .define(
        "CCENV_CXX11",
        if env.standard.has_cxx11_subset { "ON" } else { "OFF" },
    );

    if let Some(ref dir) = opts.build_dir {
        invocation = invocation.build_dir(dir);
    }
    if let Some(ref timestamp) = env.timestamp {
        invocation = invocation.define("CCENV_BUILD_TIMESTAMP", timestamp);
    }

    Ok(invocation)
}
