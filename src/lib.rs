//! pec-attendance library root.
//! Exposes the CLI parser, the high-level `run()` function and the
//! attendance model used by the binary.

pub mod access;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use env_logger::Env;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Instance { .. } => commands::instance::handle(&cli.command, cfg),
        Commands::Enroll { .. } => commands::enroll::handle(&cli.command, cfg),
        Commands::Session { .. } => commands::session::handle(&cli.command, cfg),
        Commands::Show { .. } => commands::show::handle(&cli.command, cfg),
        Commands::Take { .. } => commands::take::handle(&cli.command, cfg),
        Commands::Sync { .. } => commands::sync::handle(&cli.command, cfg),
        Commands::History { .. } => commands::history::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the default filter
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .try_init();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(operator) = &cli.operator {
        cfg.operator = operator.clone();
    }
    if let Some(dir) = &cli.access_logs {
        cfg.access_log_dir = dir.clone();
    }

    log::debug!("Using database {}", cfg.database);
    dispatch(&cli, &cfg)
}
