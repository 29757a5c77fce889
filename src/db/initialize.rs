use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring the schema up to date. All tables come from migrations.
/// Returns how many migrations were applied.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    let pending = pending_migrations(conn)?.len();
    run_pending_migrations(conn)?;
    Ok(pending)
}
