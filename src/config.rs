//! Configuration file support for doxa-test
//!
//! Looked up, in order, at an explicit `--config` path, `<project>/doxa-test.toml`
//! and `~/.config/doxa-test/config.toml`. Every key is optional:
//!
//! ```toml
//! build_command = ["zig", "build"]
//! output_dir = "zig-out"
//! interpreter = "doxa"
//! fixture_root = "tests"
//! timeout_secs = 30
//! strict_fixtures = false
//! ```

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "doxa-test.toml";

/// Default per-invocation timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config: build_command must not be empty")]
    EmptyBuildCommand,

    #[error("Invalid config: output_dir {output_dir:?} must be a relative path inside the project")]
    InvalidOutputDir { output_dir: PathBuf },
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Build tool and its arguments
    pub build_command: Vec<String>,

    /// Directory the build tool populates, relative to the project
    pub output_dir: PathBuf,

    /// Interpreter executable name, without platform suffix
    pub interpreter: String,

    /// Directory holding the fixture catalog directories
    pub fixture_root: PathBuf,

    /// Per-invocation timeout; 0 waits forever
    pub timeout_secs: u64,

    /// Fail every scenario whose fixture file is absent
    pub strict_fixtures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_command: vec!["zig".to_string(), "build".to_string()],
            output_dir: PathBuf::from("zig-out"),
            interpreter: "doxa".to_string(),
            fixture_root: PathBuf::from("tests"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict_fixtures: false,
        }
    }
}

impl Config {
    /// Load configuration for a project
    ///
    /// An explicit path must exist. Otherwise the project file and then the
    /// user file are tried, falling back to defaults when neither exists.
    pub fn load(explicit: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::load_from(path);
        }

        let project_file = project_dir.join(PROJECT_CONFIG_FILE);
        if project_file.exists() {
            return Self::load_from(&project_file);
        }

        if let Some(user_file) = user_config_path()
            && user_file.exists()
        {
            return Self::load_from(&user_file);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Check the invariants the build step relies on
    ///
    /// `output_dir` is deleted recursively before every build, so it must name
    /// a directory strictly below the project root.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_program()?;

        if !is_project_subpath(&self.output_dir) {
            return Err(ConfigError::InvalidOutputDir {
                output_dir: self.output_dir.clone(),
            });
        }
        Ok(())
    }

    /// Build tool and its arguments
    pub fn build_program(&self) -> Result<(&String, &[String]), ConfigError> {
        self.build_command
            .split_first()
            .ok_or(ConfigError::EmptyBuildCommand)
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The timeout as a duration, or `None` when waits are unbounded
    pub fn timeout(&self) -> Option<std::time::Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}

/// Non-empty and made only of plain names: no root, prefix, `.` or `..`
fn is_project_subpath(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

/// Returns the user config path: `~/.config/doxa-test/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
    let config_base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;

    Some(config_base.join("doxa-test").join("config.toml"))
}
