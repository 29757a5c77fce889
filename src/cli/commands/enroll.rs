use crate::cli::parser::{Commands, EnrollAction};
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_enrollment, load_enrollments, set_enrollment_active};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::parse_date_or_today;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Enroll { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        EnrollAction::Add {
            instance,
            name,
            tax_id,
            date,
        } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::Other("student name must not be empty".into()));
            }
            let enrolled_on = parse_date_or_today(date.as_deref())?;
            let id = insert_enrollment(&pool.conn, *instance, name, tax_id.as_deref(), enrolled_on)?;

            audit_quiet(
                &pool.conn,
                "enroll",
                &format!("instance {instance}"),
                &format!("Enrolled '{name}' as student {id}"),
            );
            success(format!("Student {id} enrolled in instance {instance}: {name}"));
        }
        EnrollAction::Deactivate { id } => {
            set_enrollment_active(&pool.conn, *id, false)?;
            audit_quiet(
                &pool.conn,
                "deactivate",
                &format!("student {id}"),
                "Removed from active roster",
            );
            success(format!("Student {id} removed from the active roster"));
        }
        EnrollAction::List { instance, all } => {
            let students = load_enrollments(&pool.conn, *instance, !*all)?;
            if students.is_empty() {
                println!("No students enrolled in instance {instance}.");
                return Ok(());
            }

            let sep = cfg.separator_char.chars().next().unwrap_or('-');
            let mut columns = vec![
                Column::new("ID", 5),
                Column::new("NAME", 30),
                Column::new("TAX ID", 14),
                Column::new("SINCE", 10),
            ];
            if *all {
                columns.push(Column::new("ACTIVE", 6));
            }

            let mut table = Table::new(columns, sep);
            for s in students {
                let mut row = vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.tax_id.clone().unwrap_or_else(|| "--".into()),
                    s.enrolled_on.format("%Y-%m-%d").to_string(),
                ];
                if *all {
                    row.push(if s.active { "yes" } else { "no" }.to_string());
                }
                table.add_row(row);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
