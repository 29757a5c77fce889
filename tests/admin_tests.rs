use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{TestEnv, seed_manual};

#[test]
fn init_creates_schema_in_test_mode() {
    let env = TestEnv::new();

    env.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let tables: i64 = env
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('log','class_instances','enrollments','sessions','attendance')",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 5);
    assert!(!env.dir.path().join(".pec-attendance/pec-attendance.conf").exists());
}

#[test]
fn instance_and_roster_listing() {
    let env = TestEnv::new();
    seed_manual(&env);
    env.run_ok(&["enroll", "deactivate", "--id", "1"]);

    env.cmd()
        .args(["instance", "list"])
        .assert()
        .success()
        .stdout(contains("Capoeira"))
        .stdout(contains("manual"));

    env.cmd()
        .args(["enroll", "list", "--instance", "1"])
        .assert()
        .success()
        .stdout(contains("Bruno"))
        .stdout(contains("Ana").not());

    env.cmd()
        .args(["enroll", "list", "--instance", "1", "--all"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("ACTIVE"));
}

#[test]
fn enrolling_into_missing_instance_fails() {
    let env = TestEnv::new();
    env.init();

    env.cmd()
        .args(["enroll", "add", "--instance", "5", "--name", "Davi"])
        .assert()
        .failure()
        .stderr(contains("Class instance 5 not found"));
}

#[test]
fn duplicate_session_date_is_rejected() {
    let env = TestEnv::new();
    seed_manual(&env);

    env.cmd()
        .args(["session", "add", "--instance", "1", "--date", "2025-04-02"])
        .assert()
        .failure()
        .stderr(contains("UNIQUE"));

    env.cmd()
        .args(["session", "list", "--instance", "1"])
        .assert()
        .success()
        .stdout(contains("2025-04-02"));
}

#[test]
fn invalid_session_date_is_rejected() {
    let env = TestEnv::new();
    seed_manual(&env);

    env.cmd()
        .args(["session", "add", "--instance", "1", "--date", "02/04/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format: 02/04/2025"));
}

#[test]
fn db_info_and_integrity_check() {
    let env = TestEnv::new();
    seed_manual(&env);

    env.cmd()
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn compressed_backup_is_written() {
    let env = TestEnv::new();
    seed_manual(&env);
    let dest = env.out_path("bk/pec-copy.sqlite");

    env.run_ok(&["backup", "--file", &dest, "--compress"]);

    assert!(env.dir.path().join("bk/pec-copy.zip").exists());
    assert!(!env.dir.path().join("bk/pec-copy.sqlite").exists());
}

#[test]
fn export_csv_has_header_and_one_row_per_record() {
    let env = TestEnv::new();
    seed_manual(&env);
    env.run_ok(&["take", "--session", "1", "--set", "1=p"]);
    let out = env.out_path("att.csv");

    env.run_ok(&["export", "--format", "csv", "--file", &out, "--instance", "1"]);

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("session_id,date,instance,student_id,student,status"));
    assert!(content.contains("Ana"));
    assert!(content.contains("present"));
}

#[test]
fn export_outside_range_writes_no_file() {
    let env = TestEnv::new();
    seed_manual(&env);
    env.run_ok(&["take", "--session", "1"]);
    let out = env.out_path("none.json");

    env.cmd()
        .args(["export", "--format", "json", "--file", &out, "--range", "2024"])
        .assert()
        .success()
        .stdout(contains("No attendance found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn export_xlsx_with_force_overwrites() {
    let env = TestEnv::new();
    seed_manual(&env);
    env.run_ok(&["take", "--session", "1"]);
    let out = env.out_path("att.xlsx");
    fs::write(&out, "old").unwrap();

    env.run_ok(&[
        "export", "--format", "xlsx", "--file", &out, "--session", "1", "--force",
    ]);

    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn export_requires_absolute_path() {
    let env = TestEnv::new();
    seed_manual(&env);
    env.run_ok(&["take", "--session", "1"]);

    env.cmd()
        .args(["export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}
