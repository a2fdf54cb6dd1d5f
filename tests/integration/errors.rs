use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::rulegen_cmd;
use rulegen::test_utils::ProjectFixture;

#[test]
fn test_missing_manifest() {
    let temp = TempDir::new().unwrap();

    rulegen_cmd(temp.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("rulegen.toml not found"))
        .stderr(predicate::str::contains("--manifest-path"));
}

#[test]
fn test_invalid_manifest() {
    let fixture = ProjectFixture::new("[[targets]]\nname = 3\n").unwrap();

    rulegen_cmd(fixture.root())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project manifest syntax"));
}

#[test]
fn test_unresolved_processor() {
    let fixture = ProjectFixture::new(
        r#"
[[targets]]
name = "lib"
path = "lib"
kind = "java_library"

[targets.configurations]
annotationProcessor = ["com.example:missing:1.0"]
"#,
    )
    .unwrap();

    rulegen_cmd(fixture.root())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("com.example:missing:1.0"));
}

#[test]
fn test_duplicate_target_path() {
    let fixture = ProjectFixture::new(
        r#"
[[targets]]
name = "a"
path = "lib"
kind = "java_library"

[targets.configurations]
annotationProcessor = ["x:a:1"]

[[targets]]
name = "b"
path = "lib"
kind = "java_library"

[targets.configurations]
annotationProcessor = ["x:b:1"]
"#,
    )
    .unwrap();

    rulegen_cmd(fixture.root())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target path 'lib' is declared more than once"));
    assert!(!fixture.root().join("lib").exists());
}

#[test]
fn test_missing_config_file() {
    let fixture = ProjectFixture::sample().unwrap();

    rulegen_cmd(fixture.root())
        .args(["--config", "nope.toml", "generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("rulegen")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("scopes"))
        .stdout(predicate::str::contains("check"));
}
