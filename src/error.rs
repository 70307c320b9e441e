//! Typed failures shared by the build-environment modules.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating tools or running build subprocesses.
///
/// Every variant is terminal for the operation that produced it; nothing is
/// retried and no fallback tool is attempted.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required build tool is not configured, does not exist, or is not
    /// executable. No subprocess was spawned.
    #[error("couldn't find `{tool}`{}", tool_path_note(.path))]
    ToolPath {
        /// Name of the tool being validated, e.g. `cmake`.
        tool: String,
        /// The path that failed validation, if one was configured.
        path: Option<PathBuf>,
    },

    /// A build subprocess failed to launch, exited non-zero, or was killed
    /// by a signal. Carries the exit code or launch cause for display.
    #[error("command `{command}` {}", sub_command_note(.status, .source))]
    SubCommand {
        /// The full command line, for diagnostic display.
        command: String,
        /// Exit code of the child, when it ran and exited.
        status: Option<i32>,
        /// Launch failure, when the child never started.
        #[source]
        source: Option<io::Error>,
    },

    /// A raw flag string could not be tokenized into arguments.
    #[error("malformed flag string `{flags}`: missing closing quote")]
    InvalidFlags {
        /// The flag string as configured.
        flags: String,
    },
}

fn tool_path_note(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at `{}`", path.display()),
        None => String::from(" (no path configured)"),
    }
}

fn sub_command_note(status: &Option<i32>, source: &Option<io::Error>) -> String {
    match (status, source) {
        (Some(code), _) => format!("exited with status {code}"),
        (None, Some(_)) => String::from("failed to start"),
        (None, None) => String::from("was terminated by a signal"),
    }
}
