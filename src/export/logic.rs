use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Row, params_from_iter};
use std::path::Path;

/// Which committed records to export. Empty filter means everything.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub session_id: Option<i64>,
    pub instance_id: Option<i64>,
    pub range: Option<String>,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export committed attendance rows to `file` (absolute path).
    ///
    /// `filter.range` is `None`, `"all"` or one of the shapes accepted by
    /// `--range`. Returns the number of rows written.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        filter: &ExportFilter,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match filter.range.as_deref() {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let rows = load_rows(pool, filter, bounds)?;
        if rows.is_empty() {
            warning("No attendance found for the selected filter; nothing exported.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
        }

        Ok(rows.len())
    }
}

fn load_rows(
    pool: &DbPool,
    filter: &ExportFilter,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<AttendanceExport>> {
    let mut sql = String::from(
        "SELECT s.id, s.date, ci.name, e.id, e.name, a.status,
                a.entry_time, a.exit_time, a.total_hours, a.observations, a.recorded_by
         FROM attendance a
         JOIN sessions s ON s.id = a.session_id
         JOIN class_instances ci ON ci.id = s.instance_id
         JOIN enrollments e ON e.id = a.student_id
         WHERE 1 = 1",
    );
    let mut args: Vec<Value> = Vec::new();

    if let Some(id) = filter.session_id {
        sql.push_str(" AND s.id = ?");
        args.push(Value::Integer(id));
    }
    if let Some(id) = filter.instance_id {
        sql.push_str(" AND ci.id = ?");
        args.push(Value::Integer(id));
    }
    if let Some((start, end)) = bounds {
        sql.push_str(" AND s.date BETWEEN ? AND ?");
        args.push(Value::Text(start.format("%Y-%m-%d").to_string()));
        args.push(Value::Text(end.format("%Y-%m-%d").to_string()));
    }
    sql.push_str(" ORDER BY s.date ASC, ci.name ASC, e.name COLLATE NOCASE ASC");

    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<AttendanceExport> {
    Ok(AttendanceExport {
        session_id: row.get(0)?,
        date: row.get(1)?,
        instance: row.get(2)?,
        student_id: row.get(3)?,
        student: row.get(4)?,
        status: row.get(5)?,
        entry_time: row.get(6)?,
        exit_time: row.get(7)?,
        total_hours: row.get(8)?,
        observations: row.get(9)?,
        recorded_by: row.get(10)?,
    })
}
