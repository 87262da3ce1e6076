//! One interpreter child process running a (possibly mutated) program.
//!
//! Output is captured into temp files rather than piped, so polling for completion
//! never risks filling an unread pipe buffer and deadlocking the child.

use std::fs::File;
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;

/// Appended to every program (unmodified or mutant) before it is run, so the test
/// engine actually executes the file's `check-expect`-family forms.
pub const PROGRAM_SUFFIX: &str = "(require test-engine/racket-tests)\n(test)";

pub enum PollState {
    Running,
    Exited,
    TimedOut,
}

pub struct InterpreterOutput {
    pub stdout: String,
    pub stderr: String,
    pub returncode: Option<i32>,
}

/// A spawned `<interpreter> <tempfile>` invocation. The backing temp files (source,
/// captured stdout, captured stderr) are deleted when this value drops.
pub struct InterpreterProcess {
    child: Child,
    _source: NamedTempFile,
    stdout_file: NamedTempFile,
    stderr_file: NamedTempFile,
    started: Instant,
    timeout: Duration,
    exit_status: Option<ExitStatus>,
}

impl InterpreterProcess {
    pub fn spawn(interpreter: &str, program_source: &str, timeout: Duration) -> std::io::Result<Self> {
        let mut source = NamedTempFile::new()?;
        write!(source, "{program_source}\n{PROGRAM_SUFFIX}")?;
        let stdout_file = NamedTempFile::new()?;
        let stderr_file = NamedTempFile::new()?;
        let child = Command::new(interpreter)
            .arg(source.path())
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file.reopen()?))
            .stderr(Stdio::from(stderr_file.reopen()?))
            .spawn()?;
        Ok(Self {
            child,
            _source: source,
            stdout_file,
            stderr_file,
            started: Instant::now(),
            timeout,
            exit_status: None,
        })
    }

    /// Checks whether the child has exited, has run past its timeout, or is still
    /// within budget. Idempotent: repeated polling after exit keeps reporting
    /// `Exited` without re-reaping the child.
    pub fn poll(&mut self) -> std::io::Result<PollState> {
        if self.exit_status.is_none() {
            self.exit_status = self.child.try_wait()?;
        }
        if self.exit_status.is_some() {
            return Ok(PollState::Exited);
        }
        if self.started.elapsed() > self.timeout {
            return Ok(PollState::TimedOut);
        }
        Ok(PollState::Running)
    }

    /// Kills the child if it is still running, then reads back its captured output.
    pub fn finish(mut self) -> std::io::Result<InterpreterOutput> {
        if self.exit_status.is_none() {
            let _ = self.child.kill();
            self.exit_status = Some(self.child.wait()?);
        }
        let mut stdout = String::new();
        File::open(self.stdout_file.path())?.read_to_string(&mut stdout)?;
        let mut stderr = String::new();
        File::open(self.stderr_file.path())?.read_to_string(&mut stderr)?;
        Ok(InterpreterOutput { stdout, stderr, returncode: self.exit_status.and_then(|s| s.code()) })
    }
}
