//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

use slipway::linux::DEFAULT_GENERATOR;
use slipway::LinuxArgs;

/// Slipway - a build-environment utility for CMake-based projects
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub env: LinuxArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the project's build system with CMake
    Configure(ConfigureArgs),

    /// Configure, then build with make
    Build(BuildArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// CMake generator to produce build files for
    #[arg(
        short = 'G',
        long = "generator",
        value_name = "NAME",
        default_value = DEFAULT_GENERATOR
    )]
    pub generator: String,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub configure: ConfigureArgs,
}
