use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportFilter, ExportLogic};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        session,
        instance,
        range,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let filter = ExportFilter {
            session_id: *session,
            instance_id: *instance,
            range: range.clone(),
        };
        ExportLogic::export(&pool, *format, file, &filter, *force)?;
    }
    Ok(())
}
