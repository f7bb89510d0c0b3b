//! Interpreter invocation
//!
//! Launches the built interpreter with a single fixture argument and captures
//! its output as text. The child's exit status is logged but never inspected:
//! callers decide pass or fail from stdout and stderr alone.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Executable suffix for the interpreter binary
pub const EXE_SUFFIX: &str = if cfg!(windows) { ".exe" } else { "" };

/// Polling interval while waiting on a child with a timeout
const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed waiting for {program}: {source}")]
    Wait {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("{fixture} did not finish within {timeout:?}")]
    TimedOut { fixture: PathBuf, timeout: Duration },
}

/// Captured output of one interpreter run, trimmed of surrounding whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stdout: String,
    pub stderr: String,
}

/// Location of the interpreter inside the build-output directory
pub fn interpreter_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join("bin").join(format!("{}{}", name, EXE_SUFFIX))
}

/// Build the platform-specific command line for one fixture
///
/// Windows goes through `cmd /c`; everywhere else the interpreter is executed
/// directly.
fn command_for(interpreter: &Path, fixture: &Path) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/c").arg(interpreter).arg(fixture);
        cmd
    } else {
        let mut cmd = Command::new(interpreter);
        cmd.arg(fixture);
        cmd
    }
}

/// Run the interpreter on `fixture` with `cwd` as working directory
///
/// Blocks until the child exits. With a `timeout` the child is killed once the
/// limit passes and `RunError::TimedOut` is returned; `None` waits forever.
pub fn run(
    interpreter: &Path,
    fixture: &Path,
    cwd: &Path,
    timeout: Option<Duration>,
) -> Result<Invocation, RunError> {
    tracing::debug!(
        interpreter = %interpreter.display(),
        fixture = %fixture.display(),
        "launching interpreter"
    );
    let start = Instant::now();

    let mut child = command_for(interpreter, fixture)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunError::Spawn {
            program: interpreter.to_path_buf(),
            source,
        })?;

    // Both pipes drain concurrently so a child filling one never stalls
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        Some(limit) => wait_bounded(&mut child, limit),
        None => child.wait().map(Some),
    }
    .map_err(|source| RunError::Wait {
        program: interpreter.to_path_buf(),
        source,
    })?;

    let Some(status) = status else {
        // Reader threads are detached: a grandchild may still hold the pipes
        tracing::warn!(fixture = %fixture.display(), "interpreter timed out, killed");
        return Err(RunError::TimedOut {
            fixture: fixture.to_path_buf(),
            timeout: timeout.unwrap_or_default(),
        });
    };

    let stdout = collect(stdout);
    let stderr = collect(stderr);

    tracing::debug!(
        ?status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        stdout_len = stdout.len(),
        stderr_len = stderr.len(),
        "interpreter exited"
    );

    Ok(Invocation {
        stdout: stdout.trim().to_string(),
        stderr: stderr.trim().to_string(),
    })
}

/// Poll the child until it exits or `limit` elapses
///
/// Returns `Ok(None)` after killing and reaping a child that ran too long.
fn wait_bounded(child: &mut Child, limit: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        let elapsed = start.elapsed();
        if elapsed >= limit {
            // The child may exit between try_wait and kill; either way reap it
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }

        thread::sleep(POLL_INTERVAL.min(limit - elapsed));
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let bytes = handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
