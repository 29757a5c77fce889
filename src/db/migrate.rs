use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Every other migration records
/// itself there, so it has to come first.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    message: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_class_instances",
        message: "Created class_instances table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS class_instances (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            control_mode  TEXT NOT NULL DEFAULT 'manual' CHECK(control_mode IN ('manual','automated')),
            group_id      TEXT,
            created_at    TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_enrollments",
        message: "Created enrollments table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS enrollments (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            instance_id  INTEGER NOT NULL REFERENCES class_instances(id),
            name         TEXT NOT NULL,
            tax_id       TEXT,
            enrolled_on  TEXT NOT NULL,
            active       INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_enrollments_instance ON enrollments(instance_id, active);
        "#,
    },
    Migration {
        version: "20250301_0003_create_sessions",
        message: "Created sessions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            instance_id  INTEGER NOT NULL REFERENCES class_instances(id),
            date         TEXT NOT NULL,
            UNIQUE(instance_id, date)
        );
        "#,
    },
    Migration {
        version: "20250301_0004_create_attendance",
        message: "Created attendance table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id    INTEGER NOT NULL REFERENCES sessions(id),
            student_id    INTEGER NOT NULL REFERENCES enrollments(id),
            status        TEXT NOT NULL CHECK(status IN ('present','absent','justified_absence','late')),
            entry_time    TEXT,
            exit_time     TEXT,
            total_hours   REAL,
            observations  TEXT NOT NULL DEFAULT '',
            UNIQUE(session_id, student_id)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance(student_id);
        "#,
    },
    Migration {
        version: "20250412_0005_attendance_audit_columns",
        message: "Added recorded_by/updated_at to attendance",
        sql: r#"
        ALTER TABLE attendance ADD COLUMN recorded_by TEXT NOT NULL DEFAULT '';
        ALTER TABLE attendance ADD COLUMN updated_at TEXT NOT NULL DEFAULT '';
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    // schema change and its log row land together or not at all
    let batch = format!(
        "BEGIN;\n{}\nINSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', '{}', '{}');\nCOMMIT;",
        m.sql, m.version, m.message
    );

    if let Err(e) = conn.execute_batch(&batch) {
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(e);
    }

    success(format!("Migration applied: {} → {}", m.version, m.message));
    Ok(())
}

/// Versions not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        assert!(pending_migrations(&conn).unwrap().is_empty());
        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());
    }
}
