use assert_cmd::Command;
use assert_fs::prelude::*;
use serial_test::serial;

fn cmd(config_dir: &assert_fs::TempDir) -> Command {
    let mut c = Command::cargo_bin("batch_rename").unwrap();
    // Point config at a non-existent file so user config is never touched.
    c.env("BATCH_RENAME_CONFIG", config_dir.child("none.xml").path());
    c
}

#[test]
#[serial]
fn renames_files_listed_in_plan_file() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("track01.mp3").write_str("x").unwrap();
    work.child("track02.mp3").write_str("y").unwrap();
    let plan = work.child("plan.tsv");
    plan.write_str("track01.mp3\t01 - Intro.mp3\ntrack02.mp3\t02 - Outro.mp3\n")
        .unwrap();

    cmd(&work)
        .arg(work.path())
        .arg("--plan")
        .arg(plan.path())
        .arg("--log-level")
        .arg("quiet")
        .assert()
        .success();

    assert!(work.child("01 - Intro.mp3").path().exists());
    assert!(work.child("02 - Outro.mp3").path().exists());
    assert!(!work.child("track01.mp3").path().exists());
}

#[test]
#[serial]
fn plan_candidates_are_sanitized_before_execution() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("raw.txt").write_str("x").unwrap();
    let plan = work.child("plan.tsv");
    // Forbidden characters and a trailing period must be cleaned up.
    plan.write_str("raw.txt\ttrack: one?.txt.\n").unwrap();

    cmd(&work)
        .arg(work.path())
        .arg("--plan")
        .arg(plan.path())
        .arg("--log-level")
        .arg("quiet")
        .assert()
        .success();

    assert!(work.child("track - one.txt").path().exists());
}

#[test]
#[serial]
fn malformed_plan_line_is_rejected() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("a.txt").write_str("x").unwrap();
    let plan = work.child("plan.tsv");
    plan.write_str("a.txt no tab here\n").unwrap();

    cmd(&work)
        .arg(work.path())
        .arg("--plan")
        .arg(plan.path())
        .assert()
        .failure();

    assert!(work.child("a.txt").path().exists());
}

#[test]
#[serial]
fn duplicate_targets_fail_without_renaming_anything() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("a.txt").write_str("a").unwrap();
    work.child("b.txt").write_str("b").unwrap();
    let plan = work.child("plan.tsv");
    plan.write_str("a.txt\tsame.txt\nb.txt\tsame.txt\n").unwrap();

    cmd(&work)
        .arg(work.path())
        .arg("--plan")
        .arg(plan.path())
        .assert()
        .failure();

    assert!(work.child("a.txt").path().exists());
    assert!(work.child("b.txt").path().exists());
    assert!(!work.child("same.txt").path().exists());
}
