//! `ccenv show` command

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use ccenv::builder::ResolvedEnvironment;
use ccenv::ops::Session;

pub fn execute(args: ShowArgs) -> Result<()> {
    let session = Session::open(&args.source, None)?;
    let env = session
        .env()
        .context("toolchain environment was not resolved")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(env)?);
        return Ok(());
    }

    print_environment(env, &session.system().generator);
    Ok(())
}

fn print_environment(env: &ResolvedEnvironment, generator: &str) {
    let tc = &env.toolchain;

    println!("Toolchain:");
    println!("  Compiler:  {}", tc.compiler.display());
    println!("  Family:    {}", tc.family);
    if let Some(ref token) = tc.version_token {
        println!("  Version:   {}", token);
    }
    if let Some(ref generation) = tc.msvc_generation {
        println!("  Studio:    Visual Studio {}", generation);
    }
    println!("  Clang:     {}", yes_no(tc.is_clang()));

    println!();
    println!("Platform:");
    println!("  System:    {}", env.platform);
    println!("  Generator: {}", generator);
    println!("  IDE:       {}", yes_no(env.is_ide_generator));
    println!("  C++11:     {}", yes_no(env.standard.has_cxx11_subset));

    if let Some(ref timestamp) = env.timestamp {
        println!();
        println!("Resolved at {}", timestamp);
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
