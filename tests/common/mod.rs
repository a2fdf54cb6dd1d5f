//! Common test utilities for rulegen integration tests

// Not every helper is used by every harness.
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// `rulegen` binary invoked with `--manifest-path` pointing into `root`.
pub fn rulegen_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rulegen").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .current_dir(root)
        .arg("--manifest-path")
        .arg(root.join("rulegen.toml"));
    cmd
}
