//! Common test utilities for integration tests.
//!
//! Fixture documents live under `tests/fixtures/configs`, expected compiler
//! output under `tests/fixtures/expected`.

use std::fs;
use std::path::{Path, PathBuf};

use rollcfg::ConfigSource;

/// Directory holding the fixture configuration documents.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("configs")
}

/// Path to a fixture configuration document.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// A configuration source rooted at the fixtures directory.
#[allow(dead_code)]
pub fn fixture_source() -> ConfigSource {
    ConfigSource::new(fixtures_dir())
}

/// Path to an expected-output fixture.
#[allow(dead_code)]
pub fn expected_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("expected")
        .join(name)
}

/// Write a document into `dir` and return its path.
#[allow(dead_code)]
pub fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}
