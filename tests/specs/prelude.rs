//! Test helpers for black-box `kira` CLI specifications.
//!
//! These tests invoke the built `kira` binary against a temporary vault
//! and verify stdout/stderr/exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to the kira binary, checking llvm-cov target directory
/// first, then the standard target directory, then resolving relative to
/// the test binary itself (covers runs where CARGO_MANIFEST_DIR is stale).
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn kira_binary() -> PathBuf {
    binary_path("kira")
}

/// Build a CLI invocation for a fresh vault.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// Fluent builder for `kira` invocations.
pub struct CliBuilder {
    args: Vec<String>,
    config: Option<PathBuf>,
}

impl CliBuilder {
    fn new() -> Self {
        Self { args: Vec::new(), config: None }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    pub fn command(self) -> Command {
        let mut cmd = Command::new(kira_binary());
        cmd.args(&self.args);
        cmd.env_remove("KIRA_CONFIG");
        if let Some(config) = self.config {
            cmd.env("KIRA_CONFIG", config);
        }
        cmd
    }

    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("kira should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    pub fn fails_with(self, code: i32) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("kira should run");
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {code}, got {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout does not contain '{expected}'\nstdout: {stdout}");
        self
    }
}

/// Temporary vault with its own config file, for a single test.
pub struct Vault {
    _dir: tempfile::TempDir,
    vault_path: PathBuf,
    config_path: PathBuf,
}

impl Vault {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let vault_path = dir.path().join("vault");
        std::fs::create_dir_all(&vault_path).unwrap();
        let config_path = dir.path().join("kira.env");
        std::fs::write(&config_path, format!("vault_path = {}\n", vault_path.display())).unwrap();
        Self { _dir: dir, vault_path, config_path }
    }

    pub fn path(&self) -> &Path {
        &self.vault_path
    }

    /// Run a `kira` command against this vault.
    pub fn kira(&self) -> CliBuilder {
        cli().config(&self.config_path)
    }
}
