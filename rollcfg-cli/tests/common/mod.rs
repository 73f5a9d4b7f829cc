//! Common test utilities for CLI integration tests.
//!
//! Each test gets an isolated configuration directory; fixtures are copied
//! in from the library crate's test fixtures.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated configuration directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path used as `--config-dir`
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            config_dir,
        }
    }

    /// Create an environment holding the named fixtures.
    pub fn with_fixtures(names: &[&str]) -> Self {
        let env = Self::new();
        for name in names {
            env.copy_fixture(name, name);
        }
        env
    }

    /// Bare command with no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("rollcfg").expect("Failed to find rollcfg binary");
        cmd.env_remove("ROLLCFG_CONFIG_DIR")
            .env_remove("ROLLCFG_OUTPUT_FORMAT")
            .env_remove("ROLLCFG_LOG_MODE");
        cmd
    }

    /// Command with `--config-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Copy a library fixture into the environment under `dest`.
    pub fn copy_fixture(&self, fixture: &str, dest: &str) -> PathBuf {
        let target = self.config_dir.join(dest);
        std::fs::copy(fixture_path(fixture), &target).expect("Failed to copy fixture");
        target
    }

    /// Write a document into the environment.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let target = self.config_dir.join(name);
        std::fs::write(&target, contents).expect("Failed to write document");
        target
    }

    /// Read a document back from the environment.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.config_dir.join(name)).expect("Failed to read document")
    }

    pub fn path(&self) -> &Path {
        &self.config_dir
    }
}

/// Path of a configuration fixture shared with the library tests.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../rollcfg/tests/fixtures/configs")
        .join(name)
}

/// Path of an expected-output fixture shared with the library tests.
#[allow(dead_code)]
pub fn expected_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../rollcfg/tests/fixtures/expected")
        .join(name)
}
