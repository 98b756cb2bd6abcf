mod support;

use predicates::str::contains;

use support::Sandbox;

/// Seeds three tasks and returns their ids in list order: C, B, A.
fn seed(sandbox: &Sandbox) -> Vec<String> {
    sandbox.add("A");
    sandbox.add("B");
    sandbox.add("C");
    sandbox.task_ids()
}

#[test]
fn mv_down_lands_after_the_target() {
    let sandbox = Sandbox::new();
    let ids = seed(&sandbox);

    // Move the head task one step down.
    sandbox
        .cmd()
        .args(["mv", &ids[0], "--down"])
        .assert()
        .success()
        .stdout(contains("moved"));

    assert_eq!(sandbox.task_titles(), vec!["B", "C", "A"]);
}

#[test]
fn mv_up_lands_before_the_target() {
    let sandbox = Sandbox::new();
    let ids = seed(&sandbox);

    sandbox
        .cmd()
        .args(["mv", &ids[2], "--up"])
        .assert()
        .success();

    assert_eq!(sandbox.task_titles(), vec!["C", "A", "B"]);
}

#[test]
fn mv_to_an_explicit_target_splices() {
    let sandbox = Sandbox::new();
    let ids = seed(&sandbox);

    // Moving down two slots: the task lands after the named target.
    sandbox
        .cmd()
        .args(["mv", &ids[0], &ids[2]])
        .assert()
        .success();

    assert_eq!(sandbox.task_titles(), vec!["B", "A", "C"]);
}

#[test]
fn mv_at_the_top_is_a_noop() {
    let sandbox = Sandbox::new();
    let ids = seed(&sandbox);

    sandbox
        .cmd()
        .args(["mv", &ids[0], "--up"])
        .assert()
        .success()
        .stdout(contains("already at the top"));

    assert_eq!(sandbox.task_titles(), vec!["C", "B", "A"]);
}

#[test]
fn mv_at_the_bottom_is_a_noop() {
    let sandbox = Sandbox::new();
    let ids = seed(&sandbox);

    sandbox
        .cmd()
        .args(["mv", &ids[2], "--down"])
        .assert()
        .success()
        .stdout(contains("already at the bottom"));

    assert_eq!(sandbox.task_titles(), vec!["C", "B", "A"]);
}

#[test]
fn mv_preserves_relative_order_of_others() {
    let sandbox = Sandbox::new();
    sandbox.add("A");
    sandbox.add("B");
    sandbox.add("C");
    sandbox.add("D");
    let ids = sandbox.task_ids();

    // Splice D..A: move the last task to the head.
    sandbox
        .cmd()
        .args(["mv", &ids[3], &ids[0]])
        .assert()
        .success();

    assert_eq!(sandbox.task_titles(), vec!["A", "D", "C", "B"]);
}

#[test]
fn mv_without_direction_or_target_is_a_user_error() {
    let sandbox = Sandbox::new();
    let ids = seed(&sandbox);

    sandbox
        .cmd()
        .args(["mv", &ids[0]])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("mv needs a target"));
}
