use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Stand-in for the doxa interpreter: echoes well-formed fixtures to stdout,
/// fixtures starting with `error:` to stderr, and sleeps on `hang`.
const FAKE_INTERPRETER: &str = r#"#!/bin/sh
case "$1" in
  *.doxa) ;;
  *) echo "Error: File must have .doxa extension" >&2; exit 1 ;;
esac
if [ ! -f "$1" ]; then
  echo "Error: could not open $1" >&2
  exit 1
fi
if grep -q '^error:' "$1"; then
  cat "$1" >&2
  exit 1
fi
if grep -q '^hang' "$1"; then
  exec sleep 30
fi
cat "$1"
"#;

/// Build tool that installs the fake interpreter into zig-out/bin
pub const GOOD_BUILD: &str = "mkdir -p zig-out/bin\ncp interpreter.sh zig-out/bin/doxa\nchmod +x zig-out/bin/doxa\n";

pub const FAILING_BUILD: &str = "echo 'error: compilation failed' >&2\nexit 1\n";

/// Fixtures that make every catalog scenario pass
pub const PASSING_FIXTURES: &[(&str, &str)] = &[
    ("positive/p_test_print.doxa", "5"),
    ("positive/p_test_math.doxa", "5.0"),
    ("positive/p_test_offset_semicolon.doxa", "5"),
    ("positive/p_test_var_num.doxa", "5"),
    ("positive/p_test_const_num.doxa", "5"),
    ("positive/p_test_var_change.doxa", "5"),
    ("positive/p_test_bracket_scope.doxa", "5"),
    ("positive/p_test_var_str.doxa", "five"),
    ("positive/p_test_const_float.doxa", "5.5"),
    ("positive/p_test_div_noremain.doxa", "5.0"),
    ("negetive/n_test_w_semicolon.doxa", "error: expected ';'"),
    ("negetive/n_test_change_const.doxa", "error: cannot assign to constant"),
    ("negetive/n_test_open_bracket.doxa", "error: unmatched '{'"),
];

pub struct TestContext {
    pub bin_path: PathBuf,
}

pub struct Project {
    _dir: TempDir,
    pub root: PathBuf,
}

pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            bin_path: PathBuf::from(env!("CARGO_BIN_EXE_doxa-test")),
        }
    }

    /// A project with a working build and fixtures that all pass
    pub fn create_project(&self) -> Result<Project, String> {
        let dir = tempfile::Builder::new()
            .prefix("doxa-test-e2e-")
            .tempdir()
            .map_err(|e| format!("Failed to create temp dir: {}", e))?;
        let root = dir.path().to_path_buf();

        write_file(&root.join("interpreter.sh"), FAKE_INTERPRETER)?;
        write_file(&root.join("build.sh"), GOOD_BUILD)?;
        write_file(
            &root.join("doxa-test.toml"),
            "build_command = [\"sh\", \"build.sh\"]\ntimeout_secs = 10\n",
        )?;
        for (path, content) in PASSING_FIXTURES {
            write_file(&root.join("tests").join(path), content)?;
        }

        Ok(Project { _dir: dir, root })
    }

    pub fn run_harness(&self, project: &Project, args: &[&str]) -> Result<CommandOutput, String> {
        if std::env::var("DOXA_TEST_E2E_LOG").is_ok() {
            eprintln!("command: doxa-test {:?} (cwd: {})", args, project.root.display());
        }
        let output = Command::new(&self.bin_path)
            .args(args)
            .current_dir(&project.root)
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", project.root.join(".config"))
            .output()
            .map_err(|e| format!("Failed to run doxa-test: {}", e))?;

        Ok(CommandOutput::from_output(output))
    }
}

impl Project {
    pub fn write(&self, relative: &str, content: &str) -> Result<(), String> {
        write_file(&self.root.join(relative), content)
    }

    pub fn remove(&self, relative: &str) -> Result<(), String> {
        fs::remove_file(self.root.join(relative))
            .map_err(|e| format!("Failed to remove {}: {}", relative, e))
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

impl CommandOutput {
    pub fn from_output(output: Output) -> Self {
        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        Self {
            status,
            stdout,
            stderr,
        }
    }

    pub fn assert_success(&self) -> Result<(), String> {
        if self.status == 0 {
            Ok(())
        } else {
            Err(format!(
                "Expected success, got exit {}.\nstdout: {}\nstderr: {}",
                self.status, self.stdout, self.stderr
            ))
        }
    }

    pub fn assert_failure(&self) -> Result<(), String> {
        if self.status == 1 {
            Ok(())
        } else {
            Err(format!(
                "Expected exit 1, got {}.\nstdout: {}",
                self.status, self.stdout
            ))
        }
    }

    pub fn assert_stdout_contains(&self, needle: &str) -> Result<(), String> {
        if self.stdout.contains(needle) {
            Ok(())
        } else {
            Err(format!(
                "Expected stdout to contain '{}'.\nstdout: {}",
                needle, self.stdout
            ))
        }
    }

    pub fn assert_stdout_not_contains(&self, needle: &str) -> Result<(), String> {
        if !self.stdout.contains(needle) {
            Ok(())
        } else {
            Err(format!(
                "Expected stdout to not contain '{}'.\nstdout: {}",
                needle, self.stdout
            ))
        }
    }

    pub fn assert_stderr_contains(&self, needle: &str) -> Result<(), String> {
        if self.stderr.contains(needle) {
            Ok(())
        } else {
            Err(format!(
                "Expected stderr to contain '{}'.\nstderr: {}",
                needle, self.stderr
            ))
        }
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create parent dirs: {}", e))?;
    }
    fs::write(path, content).map_err(|e| format!("Failed to write file: {}", e))
}
