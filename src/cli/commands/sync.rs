use crate::access::CsvAccessLog;
use crate::cli::commands::show::{parse_edits, print_attendance};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, SyncOutcome};
use crate::core::context::SessionContext;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;

/// Handle `sync`: pull entry/exit times for an automated session, apply
/// any corrections given on the command line, then commit.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync {
        session,
        set,
        note,
        dry_run,
    } = cmd
    {
        let edits = parse_edits(set, note)?;
        let ctx = SessionContext::new(cfg.operator.as_str());
        let access = CsvAccessLog::new(expand_tilde(&cfg.access_log_dir));

        let mut pool = DbPool::new(&cfg.database)?;
        let mut state = AttendanceLogic::open(&mut pool, *session)?;

        let group = state
            .info()
            .instance
            .access_group()
            .unwrap_or_default()
            .to_string();

        let synced = match AttendanceLogic::sync(&mut state, &access)? {
            SyncOutcome::Applied { updated } => {
                info(format!(
                    "{updated} student(s) updated from access-control group '{group}'."
                ));
                Some(updated)
            }
            SyncOutcome::Stale => {
                warning("Access-control result arrived after newer changes and was discarded.");
                None
            }
        };

        AttendanceLogic::edit_all(&mut state, &edits)?;

        if *dry_run {
            print_attendance(&pool, &state, cfg)?;
            info("Dry run: nothing was saved.");
            return Ok(());
        }

        let written = AttendanceLogic::commit(&mut state, &mut pool, &ctx)?;
        if let Some(updated) = synced {
            audit_quiet(
                &pool.conn,
                "sync",
                &format!("session {session}"),
                &format!("{updated} record(s) from group '{group}'"),
            );
        }
        print_attendance(&pool, &state, cfg)?;
        success(format!(
            "Saved {written} attendance record(s) for session {session}."
        ));
    }
    Ok(())
}
