use crate::cli::commands::show::{parse_edits, print_attendance};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::core::context::SessionContext;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle `take`: manual attendance for one session.
///
/// The working set is built from the active roster and whatever was stored
/// before, the edits are applied in order, and the whole set is committed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Take {
        session,
        set,
        note,
        dry_run,
    } = cmd
    {
        // parse everything before touching the database
        let edits = parse_edits(set, note)?;
        let ctx = SessionContext::new(cfg.operator.as_str());

        let mut pool = DbPool::new(&cfg.database)?;
        let mut state = AttendanceLogic::open(&mut pool, *session)?;
        AttendanceLogic::edit_all(&mut state, &edits)?;

        if *dry_run {
            print_attendance(&pool, &state, cfg)?;
            info("Dry run: nothing was saved.");
            return Ok(());
        }

        let written = AttendanceLogic::commit(&mut state, &mut pool, &ctx)?;
        print_attendance(&pool, &state, cfg)?;
        success(format!(
            "Saved {written} attendance record(s) for session {session}."
        ));
    }
    Ok(())
}
