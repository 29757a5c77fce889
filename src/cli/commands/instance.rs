use crate::cli::parser::{Commands, InstanceAction};
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_instance, list_instances};
use crate::errors::{AppError, AppResult};
use crate::models::control_mode::ControlMode;
use crate::ui::messages::{success, warning};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Instance { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        InstanceAction::Add { name, mode, group } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::Other("class instance name must not be empty".into()));
            }
            let group = group.as_deref().map(str::trim).filter(|g| !g.is_empty());
            if *mode == ControlMode::Automated && group.is_none() {
                warning("Automated instance without --group: sync will not be available");
            }

            let id = insert_instance(&pool.conn, name, *mode, group)?;
            audit_quiet(
                &pool.conn,
                "instance",
                &format!("instance {id}"),
                &format!("Created '{}' ({})", name, mode.to_db_str()),
            );
            success(format!("Class instance {id} created: {name}"));
        }
        InstanceAction::List => {
            let instances = list_instances(&pool.conn)?;
            if instances.is_empty() {
                println!("No class instances.");
                return Ok(());
            }

            let sep = cfg.separator_char.chars().next().unwrap_or('-');
            let mut table = Table::new(
                vec![
                    Column::new("ID", 5),
                    Column::new("NAME", 30),
                    Column::new("MODE", 10),
                    Column::new("GROUP", 12),
                ],
                sep,
            );
            for i in instances {
                table.add_row(vec![
                    i.id.to_string(),
                    i.name.clone(),
                    i.control_mode.to_db_str().to_string(),
                    i.group_id.clone().unwrap_or_else(|| "--".into()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
