use assert_cmd::Command;
use assert_fs::prelude::*;
use serial_test::serial;

fn cmd(config_dir: &assert_fs::TempDir) -> Command {
    let mut c = Command::cargo_bin("batch_rename").unwrap();
    c.env("BATCH_RENAME_CONFIG", config_dir.child("none.xml").path());
    c
}

#[test]
#[serial]
fn declining_the_confirmation_undoes_the_batch() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("old.txt").write_str("x").unwrap();
    let plan = work.child("plan.tsv");
    plan.write_str("old.txt\tnew.txt\n").unwrap();

    cmd(&work)
        .arg(work.path())
        .arg("--plan")
        .arg(plan.path())
        .arg("--confirm")
        .arg("--log-level")
        .arg("quiet")
        .write_stdin("n\n")
        .assert()
        .success();

    assert!(work.child("old.txt").path().exists());
    assert!(!work.child("new.txt").path().exists());
}

#[test]
#[serial]
fn accepting_the_confirmation_keeps_the_batch() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("old.txt").write_str("x").unwrap();
    let plan = work.child("plan.tsv");
    plan.write_str("old.txt\tnew.txt\n").unwrap();

    cmd(&work)
        .arg(work.path())
        .arg("--plan")
        .arg(plan.path())
        .arg("--confirm")
        .arg("--log-level")
        .arg("quiet")
        .write_stdin("y\n")
        .assert()
        .success();

    assert!(work.child("new.txt").path().exists());
    assert!(!work.child("old.txt").path().exists());
}
