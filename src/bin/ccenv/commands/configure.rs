//! `ccenv configure` command

use anyhow::Result;

use crate::cli::ConfigureArgs;
use ccenv::builder::BuildType;
use ccenv::ops::{configure_with, ConfigureOptions};

pub fn execute(args: ConfigureArgs) -> Result<()> {
    let opts = ConfigureOptions {
        build_type: if args.release {
            BuildType::Release
        } else {
            BuildType::Debug
        },
        generator: args.generator,
        source_dir: args.source,
        build_dir: args.build_dir,
    };

    let code = configure_with(&opts)?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
