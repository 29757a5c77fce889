use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

fn start(what: &str) {
    println!("{CYAN}▶ {what}…{RESET}");
}

fn done(what: &str) {
    println!("{GREEN}✔ {what}{RESET}\n");
}

/// Handle `db`: each flag is one maintenance step, run in a fixed order
/// on the same connection.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        start("Running migrations");
        match init_db(&pool.conn)? {
            0 => done("Schema already up to date."),
            n => done(&format!("{n} migration(s) applied.")),
        }
    }

    if *info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if *check {
        start("Running integrity check");
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if integrity == "ok" {
            done("Integrity check passed.");
        } else {
            println!("{RED}✘ Integrity check failed:{RESET} {integrity}\n");
        }
    }

    if *vacuum {
        start("Running VACUUM");
        pool.conn.execute_batch("VACUUM;")?;
        done("Vacuum completed.");
    }

    Ok(())
}
