//! Shared base of the platform build environments.
//!
//! Holds the configuration every platform variant needs (project directory,
//! make tool, parallelism, quoting style), resolves defaults from the
//! process environment, and provides the binary validation and subprocess
//! execution the variants build on.
//!
//! Environment variables:
//! - `MAKE_PATH`: path to the make binary.
//! - `MAKE_FLAGS`: raw flag string appended to the make command line.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::BuildError;
use crate::util::process::{find_executable, CommandRunner, ProcessBuilder, SystemRunner};
use crate::util::words::{self, QuotingStyle};

/// Environment variable overriding the path to the make binary.
pub const MAKE_PATH_ENV: &str = "MAKE_PATH";
/// Environment variable overriding the flags passed to make.
pub const MAKE_FLAGS_ENV: &str = "MAKE_FLAGS";

/// Resolved base configuration snapshot.
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Directory containing the project to configure and build.
    pub project_directory: PathBuf,
    /// Parallel job count handed to make.
    pub jobs: usize,
    /// Path to the make binary, if one could be resolved.
    pub make_path: Option<PathBuf>,
    /// Raw flag string appended to make invocations.
    pub make_flags: Option<String>,
    /// Quoting rules used to tokenize raw flag strings.
    pub quoting: QuotingStyle,
}

impl CommonConfig {
    /// Resolve the base defaults from the process environment.
    ///
    /// `MAKE_PATH` wins over a `make` found on the executable search path;
    /// `MAKE_FLAGS` is taken verbatim. Reads the environment and the search
    /// path, nothing else, so repeated calls agree while those are stable.
    pub fn load_defaults() -> Self {
        CommonConfig {
            project_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            jobs: default_jobs(),
            make_path: env_path(MAKE_PATH_ENV).or_else(|| find_executable("make")),
            make_flags: std::env::var(MAKE_FLAGS_ENV).ok(),
            quoting: QuotingStyle::host(),
        }
    }

    /// Overwrite each field for which the parsed arguments carry a value.
    pub fn merge_args(&mut self, args: &CommonArgs) {
        if let Some(ref dir) = args.project_dir {
            self.project_directory = dir.clone();
        }
        if let Some(jobs) = args.jobs {
            self.jobs = jobs;
        }
        if args.make_path.is_some() {
            self.make_path = args.make_path.clone();
        }
        if args.make_flags.is_some() {
            self.make_flags = args.make_flags.clone();
        }
    }
}

/// Command-line options shared by every platform environment.
///
/// Flatten into a clap parser to register the options. Every option is
/// global, so it may appear before or after a subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory containing the project to build
    #[arg(short = 'C', long = "project_dir", value_name = "DIR", global = true)]
    pub project_dir: Option<PathBuf>,

    /// Number of parallel make jobs
    #[arg(short = 'j', long = "jobs", value_name = "N", global = true)]
    pub jobs: Option<usize>,

    /// Path to the make binary
    #[arg(short = 'm', long = "make_path", value_name = "PATH", global = true)]
    pub make_path: Option<PathBuf>,

    /// Flags used to override the default make flags
    #[arg(
        short = 'f',
        long = "make_flags",
        value_name = "FLAGS",
        global = true,
        allow_hyphen_values = true
    )]
    pub make_flags: Option<String>,

    /// Print the commands being run
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Shared runtime of the platform build environments.
///
/// Fields are plain data; calling code may adjust them between operations.
/// Every subprocess launches through the environment's [`CommandRunner`],
/// which tests replace with a recording double.
pub struct BuildEnvironment {
    /// Directory containing the project to configure and build.
    pub project_directory: PathBuf,
    /// Parallel job count handed to make.
    pub jobs: usize,
    /// Path to the make binary.
    pub make_path: Option<PathBuf>,
    /// Raw flag string appended to make invocations.
    pub make_flags: Option<String>,
    /// Quoting rules used to tokenize raw flag strings.
    pub quoting: QuotingStyle,
    runner: Box<dyn CommandRunner>,
}

impl BuildEnvironment {
    /// Create an environment from a resolved configuration snapshot.
    pub fn new(config: CommonConfig) -> Self {
        BuildEnvironment {
            project_directory: config.project_directory,
            jobs: config.jobs,
            make_path: config.make_path,
            make_flags: config.make_flags,
            quoting: config.quoting,
            runner: Box::new(SystemRunner),
        }
    }

    /// Replace the runner subprocesses launch through.
    pub fn set_runner(&mut self, runner: Box<dyn CommandRunner>) {
        self.runner = runner;
    }

    /// Run a prepared command to completion.
    ///
    /// Blocks until the child exits. Launch failures, non-zero exits, and
    /// signal deaths all map to [`BuildError::SubCommand`]; exit 0 is the
    /// only success.
    pub fn run_subprocess(&self, cmd: &ProcessBuilder) -> Result<(), BuildError> {
        tracing::debug!("running `{}`", cmd.display_command());

        let status = self
            .runner
            .run(cmd)
            .map_err(|source| BuildError::SubCommand {
                command: cmd.display_command(),
                status: None,
                source: Some(source),
            })?;

        match status {
            Some(0) => Ok(()),
            other => Err(BuildError::SubCommand {
                command: cmd.display_command(),
                status: other,
                source: None,
            }),
        }
    }

    /// Build the project's generated makefiles.
    ///
    /// Invokes `make -j <jobs> -C <project_directory>` plus any configured
    /// make flags and blocks until it finishes. Fails with
    /// [`BuildError::ToolPath`] before spawning anything when no usable make
    /// binary is configured.
    pub fn run_make(&self) -> Result<(), BuildError> {
        let make = check_binary("make", self.make_path.as_deref())?;
        tracing::info!("building `{}`", self.project_directory.display());

        let mut cmd = ProcessBuilder::new(make)
            .args(["-j", &self.jobs.to_string()])
            .arg("-C")
            .arg(&self.project_directory);
        if let Some(flags) = self.make_flags.as_deref().filter(|f| !f.is_empty()) {
            cmd = cmd.args(split_flags(flags, self.quoting)?);
        }

        self.run_subprocess(&cmd)
    }
}

/// Validate that a configured tool path points at a runnable binary.
///
/// An unset or empty path, a missing file, or a file without execute
/// permission all yield [`BuildError::ToolPath`]; no subprocess is spawned.
/// Returns the validated path.
pub fn check_binary(tool: &str, path: Option<&Path>) -> Result<PathBuf, BuildError> {
    let path = match path {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => {
            return Err(BuildError::ToolPath {
                tool: tool.to_string(),
                path: None,
            })
        }
    };

    if !is_executable(path) {
        return Err(BuildError::ToolPath {
            tool: tool.to_string(),
            path: Some(path.to_path_buf()),
        });
    }

    Ok(path.to_path_buf())
}

/// Tokenize a raw flag string, mapping tokenizer failures to the crate error.
pub(crate) fn split_flags(flags: &str, quoting: QuotingStyle) -> Result<Vec<String>, BuildError> {
    words::split(flags, quoting).map_err(|_| BuildError::InvalidFlags {
        flags: flags.to_string(),
    })
}

/// Read an environment variable as a path, treating empty as unset.
pub(crate) fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
