//! Subprocess invocation utilities.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Builder for the argument vector of a build-tool invocation.
///
/// Collects the program, its arguments, and an optional working directory,
/// and hands the prepared command to a [`CommandRunner`] for execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory the child process runs in.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Display the command for log and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Execution seam for build-tool invocations.
///
/// A runner launches a prepared command with inherited standard streams and
/// reports how the child ended: `Err` means it never started, `Ok(None)`
/// means it was terminated by a signal, `Ok(Some(code))` carries its exit
/// code. Tests substitute a recording implementation.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion, blocking the calling thread.
    fn run(&self, cmd: &ProcessBuilder) -> io::Result<Option<i32>>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ProcessBuilder) -> io::Result<Option<i32>> {
        cmd.build_command().status().map(|status| status.code())
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cmake").args(["-G", "Ninja", "/tmp/project"]);

        assert_eq!(pb.display_command(), "cmake -G Ninja /tmp/project");
    }

    #[test]
    fn test_builder_accessors() {
        let pb = ProcessBuilder::new("make")
            .arg("-j")
            .arg("4")
            .cwd("/tmp/project");

        assert_eq!(pb.get_program(), Path::new("make"));
        assert_eq!(pb.get_args(), ["-j", "4"]);
        assert_eq!(pb.get_cwd(), Some(Path::new("/tmp/project")));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let pb = ProcessBuilder::new("slipway-no-such-program");

        assert!(SystemRunner.run(&pb).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let ok = ProcessBuilder::new("sh").args(["-c", "exit 0"]);
        let failing = ProcessBuilder::new("sh").args(["-c", "exit 3"]);

        assert_eq!(SystemRunner.run(&ok).unwrap(), Some(0));
        assert_eq!(SystemRunner.run(&failing).unwrap(), Some(3));
    }
}
