use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, AttendanceState, ManualEdit};
use crate::db::pool::DbPool;
use crate::db::queries::load_enrollments;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::formatting::{hours2readable, time_or_placeholder, truncate};
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { session } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let state = AttendanceLogic::open(&mut pool, *session)?;
        print_attendance(&pool, &state, cfg)?;
    }
    Ok(())
}

/// `--set` and `--note` arguments turned into edits, statuses first.
pub(crate) fn parse_edits(set: &[String], note: &[String]) -> AppResult<Vec<ManualEdit>> {
    let mut edits = Vec::with_capacity(set.len() + note.len());
    for arg in set {
        edits.push(ManualEdit::parse_status_arg(arg)?);
    }
    for arg in note {
        edits.push(ManualEdit::parse_note_arg(arg)?);
    }
    Ok(edits)
}

/// Print the session header, the attendance grid and its statistics.
pub(crate) fn print_attendance(
    pool: &DbPool,
    state: &AttendanceState,
    cfg: &Config,
) -> AppResult<()> {
    let info = state.info();
    header(format!(
        "Session {} · {} · {} ({})",
        info.session.id,
        info.session.date_str(),
        info.instance.name,
        info.instance.control_mode.to_db_str()
    ));

    let Some(working) = state.working() else {
        println!("Attendance not loaded.");
        return Ok(());
    };

    if working.is_empty() {
        println!("No active students enrolled in '{}'.", info.instance.name);
        return Ok(());
    }

    let names: HashMap<i64, String> = load_enrollments(&pool.conn, info.instance.id, true)?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    let sep = cfg.separator_char.chars().next().unwrap_or('-');
    let mut table = Table::new(
        vec![
            Column::new("ID", 5),
            Column::new("STUDENT", 28),
            Column::new("STATUS", 10),
            Column::new("IN", 5),
            Column::new("OUT", 5),
            Column::new("HOURS", 7),
            Column::new("OBSERVATIONS", 30),
        ],
        sep,
    );

    for rec in working.iter() {
        let name = names
            .get(&rec.student_id)
            .map(|n| truncate(n, 28))
            .unwrap_or_else(|| "?".into());
        let status = format!(
            "{}{}{}",
            color_for_status(rec.status),
            rec.status.label(),
            RESET
        );
        table.add_row(vec![
            rec.student_id.to_string(),
            name,
            status,
            colorize_optional(&time_or_placeholder(rec.entry_time.as_deref())),
            colorize_optional(&time_or_placeholder(rec.exit_time.as_deref())),
            colorize_optional(&hours2readable(rec.total_hours)),
            truncate(&rec.observations, 30),
        ]);
    }

    print!("{}", table.render());

    if let Some(stats) = state.stats() {
        println!(
            "\nTotal: {}  Present: {}  Absent: {}  Justified: {}  Rate: {:.1}%",
            stats.total,
            stats.present,
            stats.absent,
            stats.justified,
            stats.presence_rate()
        );
    }

    Ok(())
}
