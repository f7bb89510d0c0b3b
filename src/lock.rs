//! Exclusive lock over the build-output directory
//!
//! Held while the previous build is removed and the new one produced, so two
//! harness runs in one project never delete each other's interpreter.
//!
//! The lock file itself is never removed. Unlinking it while locked would let
//! a waiter holding the old inode and a newcomer creating a fresh one both
//! believe they own the lock.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Lock acquisition timeout (10 minutes, a full interpreter build)
const LOCK_TIMEOUT: Duration = Duration::from_secs(600);

/// Polling interval when waiting for lock (500ms)
const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Error, Debug)]
pub enum LockError {
    #[error("Failed to create lock file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Timeout acquiring lock on {path} after {timeout_secs} seconds")]
    Timeout { path: PathBuf, timeout_secs: u64 },

    #[error("Failed to acquire lock on {path}: {source}")]
    LockFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An exclusive lock on the build-output directory
///
/// Released when dropped and the file handle closes.
#[derive(Debug)]
pub struct BuildLock {
    _file: File,
}

impl BuildLock {
    /// Acquire the lock, blocking until available or timeout
    pub fn acquire(lock_path: &Path) -> Result<Self, LockError> {
        Self::acquire_within(lock_path, LOCK_TIMEOUT)
    }

    fn acquire_within(lock_path: &Path, timeout: Duration) -> Result<Self, LockError> {
        let start = Instant::now();
        let mut announced = false;

        // Ensure parent directory exists
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LockError::CreateFailed {
                path: lock_path.to_path_buf(),
                source,
            })?;
        }

        loop {
            match Self::try_acquire(lock_path)? {
                Some(lock) => return Ok(lock),
                None => {
                    if start.elapsed() >= timeout {
                        return Err(LockError::Timeout {
                            path: lock_path.to_path_buf(),
                            timeout_secs: timeout.as_secs(),
                        });
                    }
                    if !announced {
                        tracing::info!(path = %lock_path.display(), "waiting for another build to finish");
                        announced = true;
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }

    /// Try to acquire the lock without blocking
    ///
    /// Returns `Ok(Some(lock))` if acquired, `Ok(None)` if held elsewhere.
    pub fn try_acquire(lock_path: &Path) -> Result<Option<Self>, LockError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .map_err(|source| LockError::CreateFailed {
                path: lock_path.to_path_buf(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(BuildLock { _file: file })),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            // EAGAIN on some unix platforms
            Err(e) if e.raw_os_error() == Some(11) => Ok(None),
            // EACCES can also mean contention
            Err(e) if e.raw_os_error() == Some(13) => Ok(None),
            Err(source) => Err(LockError::LockFailed {
                path: lock_path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Lock file path for a build-output directory: `<output_dir>.lock`
pub fn lock_path_for(output_dir: &Path) -> PathBuf {
    let mut lock_path = output_dir.as_os_str().to_owned();
    lock_path.push(".lock");
    PathBuf::from(lock_path)
}
