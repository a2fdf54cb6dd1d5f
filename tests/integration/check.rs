use predicates::prelude::*;

use crate::common::rulegen_cmd;
use rulegen::test_utils::ProjectFixture;

#[test]
fn test_check_clean_project() {
    let fixture = ProjectFixture::sample().unwrap();

    rulegen_cmd(fixture.root())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("every processor dependency contributes processors"));

    assert!(!fixture.root().join(".rulegen").exists());
}

#[test]
fn test_check_reports_empty_processors() {
    let fixture = ProjectFixture::with_empty_processor().unwrap();

    rulegen_cmd(fixture.root())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("shop:libs/legacy 'annotationProcessor'"))
        .stdout(predicate::str::contains("javax.annotation:jsr250-api:1.0"))
        .stderr(predicate::str::contains("rulegen check"));
}
