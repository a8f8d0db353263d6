#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gym(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gym").unwrap();
    cmd.current_dir(dir.path())
        .env("GYM_ROOT", dir.path())
        .env_remove("GYM_USER");
    cmd
}

/// Initialized root with admin `a1`, operator `o1`, trainers `t1`/`t2`,
/// member `m1`, default settings, and client `c1`.
fn seeded() -> TempDir {
    let dir = TempDir::new().unwrap();
    gym(&dir).arg("init").assert().success();
    for (id, role) in [
        ("a1", "admin"),
        ("o1", "operator"),
        ("t1", "trainer"),
        ("t2", "trainer"),
        ("m1", "member"),
    ] {
        gym(&dir)
            .args(["staff", "add", id, "--tenant", "gym-a", "--name", id, "--role", role])
            .assert()
            .success();
    }
    gym(&dir)
        .args(["--as", "a1", "settings", "set", "gym-a"])
        .assert()
        .success();
    gym(&dir)
        .args(["client", "create", "c1", "--tenant", "gym-a", "--name", "Dana"])
        .assert()
        .success();
    dir
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.arg("--json").output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// gym init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    gym(&dir).arg("init").assert().success();

    assert!(dir.path().join(".gym").is_dir());
    assert!(dir.path().join(".gym/clients").is_dir());
    assert!(dir.path().join(".gym/users").is_dir());
    assert!(dir.path().join(".gym/config.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    gym(&dir).arg("init").assert().success();
    gym(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .gym/config.yaml"));
}

#[test]
fn commands_fail_before_init() {
    let dir = TempDir::new().unwrap();
    gym(&dir)
        .args(["--as", "a1", "client", "show", "c1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn missing_acting_user_is_an_error() {
    let dir = seeded();
    gym(&dir)
        .args(["client", "show", "c1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no acting user"));
}

#[test]
fn acting_user_from_env() {
    let dir = seeded();
    gym(&dir)
        .env("GYM_USER", "o1")
        .args(["client", "show", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dana"));
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn assign_then_show() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "o1", "client", "assign", "c1", "t1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned 'c1' to trainer 't1'"));

    let client = json_of(gym(&dir).args(["--as", "t1", "client", "show", "c1"]));
    assert_eq!(client["assigned_to"], "t1");

    let activity = json_of(gym(&dir).args(["--as", "t1", "client", "activity", "c1"]));
    assert_eq!(activity[0]["action"], "trainer_assigned");
}

#[test]
fn assigning_a_member_fails() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "o1", "client", "assign", "c1", "m1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid trainer"));
}

#[test]
fn unassigned_trainer_cannot_schedule() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "o1", "client", "assign", "c1", "t1"])
        .assert()
        .success();
    gym(&dir)
        .args(["--as", "t2", "meeting", "schedule", "c1", "--date", "2025-03-04"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unauthorized"));
}

#[test]
fn schedule_without_date_fails() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "a1", "meeting", "schedule", "c1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("date is required"));
}

#[test]
fn outcome_requires_completed_meeting() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "a1", "outcome", "record", "c1", "package"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("first meeting not completed"));
}

#[test]
fn full_lifecycle_with_no_purchase() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "a1", "settings", "set", "gym-a", "--followup-days", "5"])
        .assert()
        .success();
    gym(&dir)
        .args(["--as", "o1", "client", "assign", "c1", "t1"])
        .assert()
        .success();
    gym(&dir)
        .args(["--as", "t1", "meeting", "schedule", "c1", "--date", "2025-03-01 18:30"])
        .assert()
        .success();
    gym(&dir)
        .args(["--as", "t1", "meeting", "complete", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed first meeting"));

    let out = json_of(gym(&dir).args([
        "--as",
        "t1",
        "outcome",
        "record",
        "c1",
        "none",
        "--notes",
        "thinking it over",
    ]));
    assert_eq!(out["client"]["purchase_type"], "none");
    assert!(out["client"]["next_confirmation_due"].is_null());
    assert_eq!(out["followup"]["trainer_id"], "t1");
    assert_eq!(out["followup"]["notes"], "thinking it over");

    let followups = json_of(gym(&dir).args(["--as", "t1", "client", "followups", "c1"]));
    let types: Vec<&str> = followups
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["followup_type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["in_app", "post_first_meeting"]);
}

#[test]
fn package_outcome_sets_confirmation_date() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "o1", "client", "assign", "c1", "t1"])
        .assert()
        .success();
    gym(&dir)
        .args(["--as", "t1", "meeting", "complete", "c1", "--date", "2025-03-01"])
        .assert()
        .success();
    let out = json_of(gym(&dir).args(["--as", "t1", "outcome", "record", "c1", "package"]));
    assert_eq!(out["client"]["purchase_type"], "package");
    assert!(out["client"]["next_confirmation_due"].is_string());
    assert!(out["followup"].is_null());
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[test]
fn trainer_cannot_change_settings() {
    let dir = seeded();
    gym(&dir)
        .args(["--as", "t1", "settings", "set", "gym-a", "--package-days", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unauthorized"));
}

#[test]
fn settings_show_reports_defaults() {
    let dir = seeded();
    let settings = json_of(gym(&dir).args(["settings", "show", "gym-a"]));
    assert_eq!(settings["days_to_first_followup"], 3);
    assert_eq!(settings["package_confirmation_days"], 30);
}

#[test]
fn staff_list_filters_by_tenant() {
    let dir = seeded();
    gym(&dir)
        .args(["staff", "add", "tx", "--tenant", "gym-b", "--name", "X", "--role", "trainer"])
        .assert()
        .success();
    let users = json_of(gym(&dir).args(["staff", "list", "--tenant", "gym-b"]));
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["id"], "tx");
}
