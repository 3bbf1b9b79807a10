//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// ccenv - Toolchain detection and platform-gated compiler flags
#[derive(Parser)]
#[command(name = "ccenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved toolchain environment
    Show(ShowArgs),

    /// Show the composed compiler flags for the project
    Flags(FlagsArgs),

    /// Run the CMake configure step with the composed flags
    Configure(ConfigureArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,

    /// Project directory
    #[arg(long, default_value = ".")]
    pub source: PathBuf,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Show release flags instead of debug
    #[arg(long, short)]
    pub release: bool,

    /// Project directory
    #[arg(long, default_value = ".")]
    pub source: PathBuf,
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Configure a release build
    #[arg(long, short)]
    pub release: bool,

    /// Project generator (e.g., "Ninja", "Unix Makefiles", "Xcode")
    #[arg(short = 'G', long, env = "CMAKE_GENERATOR")]
    pub generator: Option<String>,

    /// Project source directory
    #[arg(long, short = 'S', default_value = ".")]
    pub source: PathBuf,

    /// Build directory
    #[arg(long, short = 'B')]
    pub build_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
