//! Per-scenario checks against captured interpreter output
//!
//! Each public scenario function binds one fixture to one expected outcome.
//! Positive scenarios require an exact stdout match; negative scenarios only
//! look at stderr.

use crate::harness::{FixtureDir, Harness};
use crate::process::{Invocation, RunError};
use std::path::PathBuf;
use thiserror::Error;

/// Message the interpreter prints for a fixture without the `.doxa` extension
pub const EXTENSION_ERROR: &str = "Error: File must have .doxa extension";

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("{0}")]
    Assertion(String),

    #[error("Test file not found: {}", path.display())]
    FixtureMissing { path: PathBuf },

    #[error(transparent)]
    Run(#[from] RunError),
}

impl ScenarioError {
    /// Output mismatch, as opposed to anything that stopped the check running
    pub fn is_assertion(&self) -> bool {
        matches!(self, ScenarioError::Assertion(_))
    }
}

pub type ScenarioResult = Result<(), ScenarioError>;

/// stdout must equal `expected` exactly
pub fn expect_stdout(out: &Invocation, expected: &str) -> ScenarioResult {
    if out.stdout == expected {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(format!(
            "Expected '{}', but got '{}'",
            expected, out.stdout
        )))
    }
}

/// stderr must be non-empty
pub fn expect_error(out: &Invocation) -> ScenarioResult {
    if !out.stderr.is_empty() {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(format!(
            "Expected error, but got: '{}'",
            out.stdout
        )))
    }
}

/// stderr must contain `needle`
pub fn expect_stderr_contains(out: &Invocation, needle: &str, what: &str) -> ScenarioResult {
    if out.stderr.contains(needle) {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(format!(
            "Expected error message about {}, but got: '{}'",
            what, out.stderr
        )))
    }
}

fn invoke(
    harness: &Harness,
    dir: FixtureDir,
    file: &str,
    require_fixture: bool,
) -> Result<Invocation, ScenarioError> {
    let fixture = harness.fixture(dir, file);

    if (require_fixture || harness.strict_fixtures) && !harness.fixture_exists(&fixture) {
        return Err(ScenarioError::FixtureMissing { path: fixture });
    }

    Ok(harness.run_fixture(&fixture)?)
}

fn positive(
    harness: &Harness,
    name: &str,
    file: &str,
    expected: &str,
    require_fixture: bool,
) -> ScenarioResult {
    let out = invoke(harness, FixtureDir::Positive, file, require_fixture)?;
    expect_stdout(&out, expected)?;
    println!("expected: {}", expected);
    println!("got: {}", out.stdout);
    println!("✅ {} passed", name);
    Ok(())
}

fn negative(harness: &Harness, name: &str, dir: FixtureDir, file: &str) -> ScenarioResult {
    let out = invoke(harness, dir, file, false)?;
    expect_error(&out)?;
    println!("✅ {} passed", name);
    Ok(())
}

// Positive scenarios

pub fn print(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_print", "p_test_print.doxa", "5", true)
}

pub fn offset_semicolon(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_offset_semicolon", "p_test_offset_semicolon.doxa", "5", false)
}

pub fn math(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_math", "p_test_math.doxa", "5.0", false)
}

pub fn var_num(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_var_num", "p_test_var_num.doxa", "5", false)
}

pub fn const_num(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_const_num", "p_test_const_num.doxa", "5", false)
}

pub fn var_change(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_var_change", "p_test_var_change.doxa", "5", false)
}

pub fn bracket_scope(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_bracket_scope", "p_test_bracket_scope.doxa", "5", false)
}

pub fn var_str(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_var_str", "p_test_var_str.doxa", "five", false)
}

pub fn const_float(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_const_float", "p_test_const_float.doxa", "5.5", false)
}

pub fn div_noremain(harness: &Harness) -> ScenarioResult {
    positive(harness, "test_div_noremain", "p_test_div_noremain.doxa", "5.0", false)
}

// Negative scenarios

pub fn missing_semicolon(harness: &Harness) -> ScenarioResult {
    negative(
        harness,
        "test_semicolon",
        FixtureDir::Negetive,
        "n_test_w_semicolon.doxa",
    )
}

pub fn wrong_extension(harness: &Harness) -> ScenarioResult {
    let out = invoke(harness, FixtureDir::Negative, "n_test_w_ext.met", false)?;
    expect_stderr_contains(&out, EXTENSION_ERROR, ".doxa extension")?;
    println!("✅ test_wrong_extension passed");
    Ok(())
}

pub fn change_const(harness: &Harness) -> ScenarioResult {
    negative(
        harness,
        "test_change_const",
        FixtureDir::Negetive,
        "n_test_change_const.doxa",
    )
}

pub fn open_bracket(harness: &Harness) -> ScenarioResult {
    negative(
        harness,
        "test_open_bracket",
        FixtureDir::Negetive,
        "n_test_open_bracket.doxa",
    )
}
