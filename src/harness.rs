//! Resolved settings shared by every scenario in a run

use crate::config::Config;
use crate::process::{self, Invocation, RunError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fixture catalog directories
///
/// Three negative scenarios read from the misspelled `negetive` directory and
/// the wrong-extension scenario reads from `negative`. Both are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureDir {
    Positive,
    Negetive,
    Negative,
}

impl FixtureDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureDir::Positive => "positive",
            FixtureDir::Negetive => "negetive",
            FixtureDir::Negative => "negative",
        }
    }
}

/// Everything a scenario needs to run its fixture
#[derive(Debug, Clone)]
pub struct Harness {
    /// Absolute project root; children run here
    pub project_dir: PathBuf,
    /// Absolute path to the interpreter executable
    pub interpreter: PathBuf,
    /// Fixture root relative to the project
    pub fixture_root: PathBuf,
    pub timeout: Option<Duration>,
    pub strict_fixtures: bool,
}

impl Harness {
    pub fn new(project_dir: &Path, config: &Config) -> Self {
        let output_dir = project_dir.join(&config.output_dir);
        Self {
            project_dir: project_dir.to_path_buf(),
            interpreter: process::interpreter_path(&output_dir, &config.interpreter),
            fixture_root: config.fixture_root.clone(),
            timeout: config.timeout(),
            strict_fixtures: config.strict_fixtures,
        }
    }

    /// Fixture path relative to the project, as passed to the interpreter
    pub fn fixture(&self, dir: FixtureDir, file: &str) -> PathBuf {
        self.fixture_root.join(dir.as_str()).join(file)
    }

    /// Whether a relative fixture path exists under the project
    pub fn fixture_exists(&self, fixture: &Path) -> bool {
        self.project_dir.join(fixture).exists()
    }

    /// Run the interpreter on a fixture
    pub fn run_fixture(&self, fixture: &Path) -> Result<Invocation, RunError> {
        process::run(&self.interpreter, fixture, &self.project_dir, self.timeout)
    }
}
