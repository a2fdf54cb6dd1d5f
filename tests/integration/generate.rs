use predicates::prelude::*;
use std::fs;

use crate::common::rulegen_cmd;
use rulegen::test_utils::ProjectFixture;

#[test]
fn test_generate_writes_rule_files() {
    let fixture = ProjectFixture::sample().unwrap();

    rulegen_cmd(fixture.root())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("shop:app (res_app)"))
        .stdout(predicate::str::contains("4 targets, 3 resource rules, 4 processor rules"));

    let app = fixture.read("app/BUCK").unwrap();
    assert!(app.starts_with("# @generated by rulegen."));
    assert!(app.contains("android_resource(\n    name = \"res_app\",\n"));
    assert!(app.contains("    package = \"com.example.shop\",\n"));
    assert!(app.contains("        \"//libs/ui:res_ui\",\n"));
    assert!(!app.contains("res_annotations"));

    let processors = fixture.read(".rulegen/processors/BUCK").unwrap();
    assert_eq!(processors.matches("java_annotation_processor(").count(), 4);
    assert!(processors.contains("\"dagger.internal.codegen.ComponentProcessor\""));
}

#[test]
fn test_generate_is_stable() {
    let fixture = ProjectFixture::sample().unwrap();

    rulegen_cmd(fixture.root()).arg("generate").assert().success();
    let first_app = fixture.read("app/BUCK").unwrap();
    let first_processors = fixture.read(".rulegen/processors/BUCK").unwrap();

    rulegen_cmd(fixture.root()).arg("generate").assert().success();
    assert_eq!(fixture.read("app/BUCK").unwrap(), first_app);
    assert_eq!(fixture.read(".rulegen/processors/BUCK").unwrap(), first_processors);
}

#[test]
fn test_generate_custom_root_and_config() {
    let fixture = ProjectFixture::sample().unwrap();
    let config = fixture
        .write_config(
            r#"
resource_union = true
rule_file_name = "BUCK.generated"
processor_rule_file = "buck/processors/BUCK"
"#,
        )
        .unwrap();
    let out = fixture.root().join("out");

    rulegen_cmd(fixture.root())
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .arg("--root")
        .arg(&out)
        .assert()
        .success();

    let app = fs::read_to_string(out.join("app/BUCK.generated")).unwrap();
    assert!(app.contains("    resource_union = True,\n"));
    assert!(out.join("buck/processors/BUCK").is_file());
    assert!(!fixture.root().join("app/BUCK").exists());
}

#[test]
fn test_generate_warns_on_empty_processors() {
    let fixture = ProjectFixture::with_empty_processor().unwrap();

    rulegen_cmd(fixture.root())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("shop:libs/legacy 'annotationProcessor'"));
}

#[test]
fn test_generate_fails_on_empty_processors_when_configured() {
    let fixture = ProjectFixture::with_empty_processor().unwrap();
    let config = fixture.write_config("fail_on_empty_processors = true\n").unwrap();

    rulegen_cmd(fixture.root())
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Configuration 'annotationProcessor' of 'shop:libs/legacy'",
        ));
}
