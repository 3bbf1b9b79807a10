//! `ccenv flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use ccenv::builder::{BuildType, Language};
use ccenv::ops::Session;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let session = Session::open(&args.source, None)?;

    let config = if args.release {
        BuildType::Release
    } else {
        BuildType::Debug
    };

    println!("# {} flags:", config.as_cmake());
    println!("CFLAGS={}", session.effective_flags(Language::C, config));
    println!("CXXFLAGS={}", session.effective_flags(Language::Cxx, config));

    Ok(())
}
