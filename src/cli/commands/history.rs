use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::formatting::{bold, hours2readable, truncate};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { student } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let history = HistoryLogic::load(&mut pool, *student);

        if history.sessions() == 0 {
            println!("No attendance recorded for student {student}.");
            return Ok(());
        }

        println!("{}\n", bold(&format!("Attendance history of student {student}")));

        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(
            vec![
                Column::new("DATE", 10),
                Column::new("SESSION", 7),
                Column::new("CLASS", 24),
                Column::new("STATUS", 10),
                Column::new("HOURS", 7),
                Column::new("OBSERVATIONS", 30),
            ],
            sep,
        );

        for r in &history.rows {
            table.add_row(vec![
                r.date.format("%Y-%m-%d").to_string(),
                r.session_id.to_string(),
                truncate(&r.instance_name, 24),
                format!("{}{}{}", color_for_status(r.status), r.status.label(), RESET),
                hours2readable(r.total_hours),
                truncate(&r.observations, 30),
            ]);
        }
        print!("{}", table.render());

        println!(
            "\nSessions: {}  Attended: {}  Justified: {}  Hours: {}  Rate: {:.1}%",
            history.sessions(),
            history.attended(),
            history.justified(),
            hours2readable(Some(history.total_hours())),
            history.presence_rate()
        );
    }
    Ok(())
}
