use std::fs;

use batch_rename::{ExecutionPlan, Session, SessionOptions};
use tempfile::tempdir;

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[test]
fn shift_down_chain_executes_backward_and_round_trips() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("IMG1.JPG"), b"one").unwrap();
    fs::write(dir.path().join("IMG2.JPG"), b"two").unwrap();

    let mut session = Session::new(dir.path(), SessionOptions::default());
    let report = session
        .rename(&pairs(&[
            ("IMG1.JPG", "IMG2.JPG"),
            ("IMG2.JPG", "IMG3.JPG"),
        ]))
        .unwrap();

    assert_eq!(
        report.plan,
        ExecutionPlan::Direct(batch_rename::engine::Direction::Backward)
    );
    assert!(report.fully_succeeded());
    assert_eq!(fs::read(dir.path().join("IMG2.JPG")).unwrap(), b"one");
    assert_eq!(fs::read(dir.path().join("IMG3.JPG")).unwrap(), b"two");
    assert!(!dir.path().join("IMG1.JPG").exists());

    let undo = session.undo_last_batch().unwrap();
    assert!(undo.fully_succeeded());
    assert_eq!(fs::read(dir.path().join("IMG1.JPG")).unwrap(), b"one");
    assert_eq!(fs::read(dir.path().join("IMG2.JPG")).unwrap(), b"two");
}

#[test]
fn four_cycle_round_trips_through_intermediate_plan() {
    let dir = tempdir().unwrap();
    for n in ["1", "2", "3", "4"] {
        fs::write(dir.path().join(n), n.as_bytes()).unwrap();
    }

    let mut session = Session::new(dir.path(), SessionOptions::default());
    let report = session
        .rename(&pairs(&[("1", "2"), ("2", "3"), ("3", "4"), ("4", "1")]))
        .unwrap();
    assert_eq!(report.plan, ExecutionPlan::Intermediate);
    assert!(report.fully_succeeded());
    assert_eq!(fs::read(dir.path().join("2")).unwrap(), b"1");
    assert_eq!(fs::read(dir.path().join("1")).unwrap(), b"4");

    let undo = session.undo_last_batch().unwrap();
    assert!(undo.fully_succeeded());
    for n in ["1", "2", "3", "4"] {
        assert_eq!(fs::read(dir.path().join(n)).unwrap(), n.as_bytes());
    }
}

#[test]
fn undo_of_an_intermediate_batch_is_replanned_independently() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"a").unwrap();
    fs::write(dir.path().join("b"), b"b").unwrap();

    let mut session = Session::new(dir.path(), SessionOptions::default());
    let forward = session.rename(&pairs(&[("a", "b"), ("b", "a")])).unwrap();
    assert_eq!(forward.plan, ExecutionPlan::Intermediate);

    // The reverse of a swap is itself a swap; planning must rediscover that.
    let undo = session.undo_last_batch().unwrap();
    assert_eq!(undo.plan, ExecutionPlan::Intermediate);
    assert_eq!(fs::read(dir.path().join("a")).unwrap(), b"a");
    assert_eq!(fs::read(dir.path().join("b")).unwrap(), b"b");
}
