use crate::core::attendance::state::CommitBatch;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::class_instance::ClassInstance;
use crate::models::control_mode::ControlMode;
use crate::models::enrollment::Enrollment;
use crate::models::session::{Session, SessionInfo};
use crate::models::status::AttendanceStatus;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_date(idx: usize, raw: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(idx, AppError::InvalidDate(raw)))
}

// ------------------------------------------------
// Class instances
// ------------------------------------------------

pub fn map_instance(row: &Row) -> Result<ClassInstance> {
    let mode_str: String = row.get("control_mode")?;
    let control_mode = ControlMode::from_db_str(&mode_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidControlMode(mode_str.clone())))?;

    Ok(ClassInstance {
        id: row.get("id")?,
        name: row.get("name")?,
        control_mode,
        group_id: row.get("group_id")?,
    })
}

pub fn insert_instance(
    conn: &Connection,
    name: &str,
    mode: ControlMode,
    group_id: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO class_instances (name, control_mode, group_id, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, mode.to_db_str(), group_id, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_instance(conn: &Connection, id: i64) -> AppResult<ClassInstance> {
    conn.query_row(
        "SELECT id, name, control_mode, group_id FROM class_instances WHERE id = ?1",
        [id],
        map_instance,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("Class instance {id}")))
}

pub fn list_instances(conn: &Connection) -> AppResult<Vec<ClassInstance>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, control_mode, group_id FROM class_instances ORDER BY name ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_instance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ------------------------------------------------
// Enrollments
// ------------------------------------------------

pub fn map_enrollment(row: &Row) -> Result<Enrollment> {
    Ok(Enrollment {
        id: row.get("id")?,
        instance_id: row.get("instance_id")?,
        name: row.get("name")?,
        tax_id: row.get("tax_id")?,
        enrolled_on: parse_db_date(4, row.get("enrolled_on")?)?,
        active: row.get::<_, i64>("active")? == 1,
    })
}

pub fn insert_enrollment(
    conn: &Connection,
    instance_id: i64,
    name: &str,
    tax_id: Option<&str>,
    enrolled_on: NaiveDate,
) -> AppResult<i64> {
    load_instance(conn, instance_id)?;
    conn.execute(
        "INSERT INTO enrollments (instance_id, name, tax_id, enrolled_on, active)
         VALUES (?1, ?2, ?3, ?4, 1)",
        params![
            instance_id,
            name,
            tax_id,
            enrolled_on.format("%Y-%m-%d").to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn set_enrollment_active(conn: &Connection, id: i64, active: bool) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE enrollments SET active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Enrollment {id}")));
    }
    Ok(())
}

/// Enrollments of an instance ordered by name; `only_active` filters the roster.
pub fn load_enrollments(
    conn: &Connection,
    instance_id: i64,
    only_active: bool,
) -> AppResult<Vec<Enrollment>> {
    let sql = if only_active {
        "SELECT id, instance_id, name, tax_id, enrolled_on, active FROM enrollments
         WHERE instance_id = ?1 AND active = 1
         ORDER BY name COLLATE NOCASE ASC, id ASC"
    } else {
        "SELECT id, instance_id, name, tax_id, enrolled_on, active FROM enrollments
         WHERE instance_id = ?1
         ORDER BY name COLLATE NOCASE ASC, id ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([instance_id], map_enrollment)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ------------------------------------------------
// Sessions
// ------------------------------------------------

pub fn map_session(row: &Row) -> Result<Session> {
    Ok(Session {
        id: row.get("id")?,
        instance_id: row.get("instance_id")?,
        date: parse_db_date(2, row.get("date")?)?,
    })
}

pub fn insert_session(conn: &Connection, instance_id: i64, date: NaiveDate) -> AppResult<i64> {
    load_instance(conn, instance_id)?;
    conn.execute(
        "INSERT INTO sessions (instance_id, date) VALUES (?1, ?2)",
        params![instance_id, date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_sessions(conn: &Connection, instance_id: i64) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare(
        "SELECT id, instance_id, date FROM sessions WHERE instance_id = ?1 ORDER BY date ASC",
    )?;
    let rows = stmt.query_map([instance_id], map_session)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_session_info(conn: &Connection, session_id: i64) -> AppResult<SessionInfo> {
    let session = conn
        .query_row(
            "SELECT id, instance_id, date FROM sessions WHERE id = ?1",
            [session_id],
            map_session,
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id}")))?;

    let instance = load_instance(conn, session.instance_id)?;
    Ok(SessionInfo { session, instance })
}

// ------------------------------------------------
// Attendance
// ------------------------------------------------

pub fn map_attendance(row: &Row) -> Result<AttendanceRecord> {
    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidStatus(status_str.clone())))?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        student_id: row.get("student_id")?,
        status,
        entry_time: row.get("entry_time")?,
        exit_time: row.get("exit_time")?,
        total_hours: row.get("total_hours")?,
        observations: row.get("observations")?,
    })
}

pub fn load_session_attendance(
    conn: &Connection,
    session_id: i64,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, student_id, status, entry_time, exit_time, total_hours, observations
         FROM attendance
         WHERE session_id = ?1
         ORDER BY student_id ASC",
    )?;
    let rows = stmt.query_map([session_id], map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Write a whole batch inside one transaction, upserting on
/// (session_id, student_id). Any failing row rolls everything back.
pub fn commit_attendance_batch(
    conn: &mut Connection,
    batch: &CommitBatch,
    recorded_by: &str,
) -> AppResult<usize> {
    let now = Local::now().to_rfc3339();
    let tx = conn.transaction()?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO attendance
                 (session_id, student_id, status, entry_time, exit_time, total_hours,
                  observations, recorded_by, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(session_id, student_id) DO UPDATE SET
                 status       = excluded.status,
                 entry_time   = excluded.entry_time,
                 exit_time    = excluded.exit_time,
                 total_hours  = excluded.total_hours,
                 observations = excluded.observations,
                 recorded_by  = excluded.recorded_by,
                 updated_at   = excluded.updated_at",
        )?;

        for rec in &batch.records {
            if rec.session_id != batch.session_id {
                // tx is dropped here → rollback
                return Err(AppError::Commit(format!(
                    "record for student {} belongs to session {}, not {}",
                    rec.student_id, rec.session_id, batch.session_id
                )));
            }
            stmt.execute(params![
                rec.session_id,
                rec.student_id,
                rec.status.to_db_str(),
                rec.entry_time,
                rec.exit_time,
                rec.total_hours,
                rec.observations,
                recorded_by,
                now,
            ])?;
        }
    }

    tx.commit()?;
    Ok(batch.records.len())
}

/// One committed attendance row of a student, with its session context.
#[derive(Debug, Clone)]
pub struct StudentAttendanceRow {
    pub session_id: i64,
    pub date: NaiveDate,
    pub instance_name: String,
    pub status: AttendanceStatus,
    pub total_hours: Option<f64>,
    pub observations: String,
}

pub fn load_student_attendance(
    conn: &Connection,
    student_id: i64,
) -> AppResult<Vec<StudentAttendanceRow>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.date, ci.name, a.status, a.total_hours, a.observations
         FROM attendance a
         JOIN sessions s ON s.id = a.session_id
         JOIN class_instances ci ON ci.id = s.instance_id
         WHERE a.student_id = ?1
         ORDER BY s.date ASC, s.id ASC",
    )?;

    let rows = stmt.query_map([student_id], |row| {
        let status_str: String = row.get(3)?;
        let status = AttendanceStatus::from_db_str(&status_str)
            .ok_or_else(|| conversion_error(3, AppError::InvalidStatus(status_str.clone())))?;
        Ok(StudentAttendanceRow {
            session_id: row.get(0)?,
            date: parse_db_date(1, row.get(1)?)?,
            instance_name: row.get(2)?,
            status,
            total_hours: row.get(4)?,
            observations: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
