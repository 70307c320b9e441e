//! Test doubles shared by the unit tests.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::util::process::{CommandRunner, ProcessBuilder};

/// A subprocess launch recorded by [`MockRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
enum MockOutcome {
    Exit(Option<i32>),
    LaunchFailure,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    outcome: Option<MockOutcome>,
}

/// Runner that records every launch and reports a programmed outcome.
///
/// Clones share the same recording, so a test can move one handle into a
/// build environment and keep the other for assertions.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<MockState>>,
}

impl MockRunner {
    /// Runner whose children all exit 0.
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Runner whose children all exit with the given code.
    pub fn with_exit_code(code: i32) -> Self {
        MockRunner::programmed(MockOutcome::Exit(Some(code)))
    }

    /// Runner whose children all die to a signal.
    pub fn with_signal_death() -> Self {
        MockRunner::programmed(MockOutcome::Exit(None))
    }

    /// Runner whose children never start.
    pub fn with_launch_failure() -> Self {
        MockRunner::programmed(MockOutcome::LaunchFailure)
    }

    fn programmed(outcome: MockOutcome) -> Self {
        let runner = MockRunner::default();
        runner.state.lock().unwrap().outcome = Some(outcome);
        runner
    }

    /// Every launch recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &ProcessBuilder) -> io::Result<Option<i32>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            program: cmd.get_program().to_path_buf(),
            args: cmd.get_args().to_vec(),
            cwd: cmd.get_cwd().map(Path::to_path_buf),
        });

        match state.outcome.unwrap_or(MockOutcome::Exit(Some(0))) {
            MockOutcome::Exit(code) => Ok(code),
            MockOutcome::LaunchFailure => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

/// Write an executable stub tool into `dir` and return its path.
pub fn fake_tool(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").expect("failed to write fake tool");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to mark fake tool executable");
    }

    path
}
