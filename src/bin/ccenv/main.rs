//! ccenv CLI - toolchain detection and flag composition for CMake projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ccenv=debug")
    } else {
        EnvFilter::new("ccenv=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Show(args) => commands::show::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Configure(args) => commands::configure::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
