use crate::cli::parser::{Commands, SessionAction};
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_session, list_sessions, load_instance};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_date_or_today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Session { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        SessionAction::Add { instance, date } => {
            let date = parse_date_or_today(date.as_deref())?;
            let id = insert_session(&pool.conn, *instance, date)?;
            audit_quiet(
                &pool.conn,
                "session",
                &format!("instance {instance}"),
                &format!("Scheduled session {id} on {date}"),
            );
            success(format!("Session {id} scheduled on {date}"));
        }
        SessionAction::List { instance } => {
            let inst = load_instance(&pool.conn, *instance)?;
            let sessions = list_sessions(&pool.conn, *instance)?;
            if sessions.is_empty() {
                println!("No sessions for '{}'.", inst.name);
                return Ok(());
            }

            println!("📅 Sessions of '{}':", inst.name);
            for s in sessions {
                println!("  {:>5}  {}", s.id, s.date_str());
            }
        }
    }

    Ok(())
}
