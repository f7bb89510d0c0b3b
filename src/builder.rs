//! Clean rebuild of the interpreter
//!
//! Every harness run deletes the previous build output and invokes the build
//! tool from scratch. A failed build is fatal to the whole run.

use crate::config::{Config, ConfigError};
use crate::lock::{self, BuildLock, LockError};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to remove {path}: {source}")]
    Clean {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}")]
    Failed { command: String, status: ExitStatus },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lock(#[from] LockError),
}

/// Remove the build-output directory if present
///
/// Returns whether anything was removed.
pub fn clean(output_dir: &Path) -> Result<bool, BuildError> {
    if !output_dir.exists() {
        return Ok(false);
    }

    println!("Removing existing build...");
    std::fs::remove_dir_all(output_dir).map_err(|source| BuildError::Clean {
        path: output_dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Clean and rebuild the interpreter in `project_dir`
///
/// The returned lock keeps other harness runs from touching the build output;
/// hold it until the scenarios have finished. Nothing is removed unless the
/// config is valid.
pub fn build(project_dir: &Path, config: &Config) -> Result<BuildLock, BuildError> {
    config.validate()?;
    let (program, args) = config.build_program()?;

    let output_dir = project_dir.join(&config.output_dir);
    let build_lock = BuildLock::acquire(&lock::lock_path_for(&output_dir))?;

    clean(&output_dir)?;

    let command = config.build_command.join(" ");

    println!("Building...");
    tracing::debug!(%command, cwd = %project_dir.display(), "running build tool");

    let status = Command::new(program)
        .args(args)
        .current_dir(project_dir)
        .status()
        .map_err(|source| BuildError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !status.success() {
        return Err(BuildError::Failed { command, status });
    }

    println!("Build successful\n");
    Ok(build_lock)
}
