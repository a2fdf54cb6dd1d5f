use predicates::prelude::*;

use crate::common::rulegen_cmd;
use rulegen::test_utils::ProjectFixture;

#[test]
fn test_scopes_text() {
    let fixture = ProjectFixture::sample().unwrap();

    rulegen_cmd(fixture.root())
        .args(["scopes", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scopes for 'annotationProcessor' of shop:app"))
        .stdout(predicate::str::contains("processor_dagger_compiler_"))
        .stdout(predicate::str::contains("processor_auto_value_"))
        .stdout(predicate::str::contains("AutoValueParcelExtension"));
}

#[test]
fn test_scopes_json() {
    let fixture = ProjectFixture::sample().unwrap();

    let output = rulegen_cmd(fixture.root())
        .args(["--quiet", "scopes", "app", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let scopes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let scopes = scopes.as_array().unwrap();
    assert_eq!(scopes.len(), 2);

    let combined = &scopes[1];
    assert_eq!(
        combined["dependencies"],
        serde_json::json!([
            "com.google.auto.value:auto-value:1.10.4",
            "com.ryanharter.auto.value:auto-value-parcel:0.2.9"
        ])
    );
    assert_eq!(combined["extensions"].as_array().unwrap().len(), 1);
    assert!(combined["rule"].as_str().unwrap().starts_with("processor_auto_value_"));
}

#[test]
fn test_scopes_unknown_configuration() {
    let fixture = ProjectFixture::sample().unwrap();

    rulegen_cmd(fixture.root())
        .args(["scopes", "app", "--configuration", "kapt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No valid configuration found for 'kapt' in project 'shop:app'",
        ));
}

#[test]
fn test_scopes_unknown_target() {
    let fixture = ProjectFixture::sample().unwrap();

    rulegen_cmd(fixture.root())
        .args(["scopes", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}
