#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn pec() -> Command {
    cargo_bin_cmd!("pec-attendance")
}

/// Isolated home, database and access-log directory for one test.
pub struct TestEnv {
    pub dir: TempDir,
    pub db: String,
    pub access_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("pec.sqlite").to_string_lossy().to_string();
        let access_dir = dir.path().join("access");
        fs::create_dir_all(&access_dir).expect("access dir");
        Self {
            dir,
            db,
            access_dir,
        }
    }

    /// Command with HOME, database, access logs and operator pinned to this env.
    pub fn cmd(&self) -> Command {
        let mut c = pec();
        c.env("HOME", self.dir.path())
            .env_remove("RUST_LOG")
            .args(["--db", &self.db, "--operator", "tester", "--access-logs"])
            .arg(&self.access_dir);
        c
    }

    pub fn init(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
    }

    pub fn run_ok(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    pub fn out_path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().to_string()
    }

    pub fn write_access_export(&self, group: &str, body: &str) {
        fs::write(self.access_dir.join(format!("{group}.csv")), body).expect("write export");
    }

    pub fn conn(&self) -> Connection {
        Connection::open(&self.db).expect("open db")
    }

    /// Stored status of one student in one session, if any.
    pub fn stored_status(&self, session: i64, student: i64) -> Option<String> {
        self.conn()
            .query_row(
                "SELECT status FROM attendance WHERE session_id = ?1 AND student_id = ?2",
                [session, student],
                |r| r.get(0),
            )
            .ok()
    }

    /// Audit rows written for one operation.
    pub fn audit_count(&self, operation: &str) -> i64 {
        self.conn()
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = ?1",
                [operation],
                |r| r.get(0),
            )
            .expect("count")
    }

    pub fn attendance_count(&self) -> i64 {
        self.conn()
            .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
            .expect("count")
    }
}

/// Manual instance 1 with students 1 (Ana), 2 (Bruno), 3 (Carla) and
/// session 1 on 2025-04-02.
pub fn seed_manual(env: &TestEnv) {
    env.init();
    env.run_ok(&["instance", "add", "--name", "Capoeira", "--mode", "manual"]);
    for name in ["Ana", "Bruno", "Carla"] {
        env.run_ok(&["enroll", "add", "--instance", "1", "--name", name, "--date", "2025-03-01"]);
    }
    env.run_ok(&["session", "add", "--instance", "1", "--date", "2025-04-02"]);
}

/// Automated instance 1 (group TURMA_A) with students 1 (Ana), 2 (Bruno)
/// and session 1 on 2025-04-02.
pub fn seed_automated(env: &TestEnv) {
    env.init();
    env.run_ok(&[
        "instance", "add", "--name", "Judô", "--mode", "automated", "--group", "TURMA_A",
    ]);
    for name in ["Ana", "Bruno"] {
        env.run_ok(&["enroll", "add", "--instance", "1", "--name", name, "--date", "2025-03-01"]);
    }
    env.run_ok(&["session", "add", "--instance", "1", "--date", "2025-04-02"]);
}
