//! Build environment for Linux desktop projects.
//!
//! Resolves where cmake lives and which flags it receives, then drives
//! `cmake -G <generator>` against the project directory. Each setting is
//! resolved from, in priority order, an explicit argument, an environment
//! variable, and (for the binary) the executable search path.
//!
//! Environment variables:
//! - `CMAKE_PATH`: path to the cmake binary.
//! - `CMAKE_FLAGS`: raw flag string appended to the cmake command line.

use std::path::PathBuf;

use clap::Args;

use crate::common::{self, BuildEnvironment, CommonArgs, CommonConfig};
use crate::error::BuildError;
use crate::util::process::{find_executable, ProcessBuilder};

/// Environment variable overriding the path to the cmake binary.
pub const CMAKE_PATH_ENV: &str = "CMAKE_PATH";
/// Environment variable overriding the flags passed to cmake.
pub const CMAKE_FLAGS_ENV: &str = "CMAKE_FLAGS";
/// Generator used when the caller does not name one.
pub const DEFAULT_GENERATOR: &str = "Unix Makefiles";

/// Resolved configuration snapshot for a [`LinuxEnvironment`].
#[derive(Debug, Clone)]
pub struct LinuxConfig {
    /// Base configuration shared by every platform.
    pub common: CommonConfig,
    /// Path to the cmake binary, if one could be resolved.
    pub cmake_path: Option<PathBuf>,
    /// Raw flag string appended to cmake invocations.
    pub cmake_flags: Option<String>,
}

impl LinuxConfig {
    /// Resolve defaults from the process environment.
    ///
    /// `CMAKE_PATH` wins when set and non-empty; otherwise the first `cmake`
    /// on the executable search path is used. `CMAKE_FLAGS` is taken
    /// verbatim. Reads the environment and the search path, nothing else,
    /// so repeated calls agree while those are stable.
    pub fn load_defaults() -> Self {
        LinuxConfig {
            common: CommonConfig::load_defaults(),
            cmake_path: common::env_path(CMAKE_PATH_ENV).or_else(|| find_executable("cmake")),
            cmake_flags: std::env::var(CMAKE_FLAGS_ENV).ok(),
        }
    }
}

/// Merge parsed command-line values over the environment defaults.
impl From<&LinuxArgs> for LinuxConfig {
    fn from(args: &LinuxArgs) -> Self {
        let mut config = LinuxConfig::load_defaults();
        config.common.merge_args(&args.common);
        if args.cmake_path.is_some() {
            config.cmake_path = args.cmake_path.clone();
        }
        if args.cmake_flags.is_some() {
            config.cmake_flags = args.cmake_flags.clone();
        }
        config
    }
}

/// Command-line options for the Linux build environment.
///
/// Flatten into a clap parser to register the options; convert into a
/// [`LinuxConfig`] after parsing to apply them over the defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct LinuxArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the CMake binary
    #[arg(short = 'c', long = "cmake_path", value_name = "PATH", global = true)]
    pub cmake_path: Option<PathBuf>,

    /// Flags used to override the default CMake flags
    #[arg(
        short = 'F',
        long = "cmake_flags",
        value_name = "FLAGS",
        global = true,
        allow_hyphen_values = true
    )]
    pub cmake_flags: Option<String>,
}

/// Build environment for Linux desktop projects.
///
/// Fields are plain data; calling code may adjust them between operations.
pub struct LinuxEnvironment {
    /// Shared base environment (project directory, make, subprocess runner).
    pub common: BuildEnvironment,
    /// Path to the cmake binary.
    pub cmake_path: Option<PathBuf>,
    /// Raw flag string appended to cmake invocations.
    pub cmake_flags: Option<String>,
}

impl LinuxEnvironment {
    /// Create an environment from a resolved configuration snapshot.
    pub fn new(config: LinuxConfig) -> Self {
        LinuxEnvironment {
            common: BuildEnvironment::new(config.common),
            cmake_path: config.cmake_path,
            cmake_flags: config.cmake_flags,
        }
    }

    /// Run the CMake generator with [`DEFAULT_GENERATOR`].
    pub fn run_cmake(&self) -> Result<(), BuildError> {
        self.run_cmake_with(DEFAULT_GENERATOR)
    }

    /// Run the CMake generator for the project directory.
    ///
    /// Invokes `cmake -G <generator> [<flags>...] <project_directory>` with
    /// the project directory as working directory and blocks until cmake
    /// exits. Fails with [`BuildError::ToolPath`] before spawning anything
    /// when no usable cmake binary is configured, and with
    /// [`BuildError::SubCommand`] when cmake cannot be launched or exits
    /// non-zero.
    pub fn run_cmake_with(&self, generator: &str) -> Result<(), BuildError> {
        let cmake = common::check_binary("cmake", self.cmake_path.as_deref())?;
        tracing::info!(
            "configuring `{}` with generator `{}`",
            self.common.project_directory.display(),
            generator
        );

        let mut cmd = ProcessBuilder::new(cmake).args(["-G", generator]);
        if let Some(flags) = self.cmake_flags.as_deref().filter(|f| !f.is_empty()) {
            cmd = cmd.args(common::split_flags(flags, self.common.quoting)?);
        }
        cmd = cmd
            .arg(&self.common.project_directory)
            .cwd(&self.common.project_directory);

        self.common.run_subprocess(&cmd)
    }
}
