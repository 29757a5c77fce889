use crate::export::ExportFormat;
use crate::models::control_mode::ControlMode;
use clap::{Parser, Subcommand};

/// Command-line interface definition for pec-attendance
#[derive(Parser)]
#[command(
    name = "pec-attendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance for PEC class sessions: roster merge, access-control sync and batch commit",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Operator name recorded with commits (defaults to the config value)
    #[arg(global = true, long = "operator")]
    pub operator: Option<String>,

    /// Directory with access-control CSV exports (overrides config)
    #[arg(global = true, long = "access-logs", value_name = "DIR")]
    pub access_logs: Option<String>,

    /// Verbose diagnostics (same as RUST_LOG=debug)
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Manage class instances
    Instance {
        #[command(subcommand)]
        action: InstanceAction,
    },

    /// Manage enrollments (the roster of a class instance)
    Enroll {
        #[command(subcommand)]
        action: EnrollAction,
    },

    /// Manage class sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show the attendance grid of a session
    Show {
        #[arg(long = "session", help = "Session id")]
        session: i64,
    },

    /// Take attendance by hand and save the whole session
    Take {
        #[arg(long = "session", help = "Session id")]
        session: i64,

        /// Set a status: STUDENT_ID=present|absent|justified|late (repeatable)
        #[arg(long = "set", value_name = "ID=STATUS")]
        set: Vec<String>,

        /// Set observations: STUDENT_ID=TEXT (repeatable)
        #[arg(long = "note", value_name = "ID=TEXT")]
        note: Vec<String>,

        /// Show the result without saving it
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Pull entry/exit times from the access-control system and save the session
    Sync {
        #[arg(long = "session", help = "Session id")]
        session: i64,

        /// Corrections applied after the sync: STUDENT_ID=STATUS (repeatable)
        #[arg(long = "set", value_name = "ID=STATUS")]
        set: Vec<String>,

        /// Observations applied after the sync: STUDENT_ID=TEXT (repeatable)
        #[arg(long = "note", value_name = "ID=TEXT")]
        note: Vec<String>,

        /// Show the result without saving it
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Attendance history of one student
    History {
        #[arg(long = "student", help = "Student (enrollment) id")]
        student: i64,
    },

    /// Export committed attendance
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "session", conflicts_with = "instance")]
        session: Option<i64>,

        #[arg(long = "instance")]
        instance: Option<i64>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum InstanceAction {
    /// Create a class instance
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, value_enum, default_value = "manual")]
        mode: ControlMode,

        /// Access-control group identifier (automated mode)
        #[arg(long)]
        group: Option<String>,
    },
    /// List class instances
    List,
}

#[derive(Subcommand)]
pub enum EnrollAction {
    /// Enroll a beneficiary in a class instance
    Add {
        #[arg(long)]
        instance: i64,

        #[arg(long)]
        name: String,

        #[arg(long = "tax-id")]
        tax_id: Option<String>,

        /// Enrollment date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove a beneficiary from the active roster
    Deactivate {
        #[arg(long)]
        id: i64,
    },
    /// List the roster of a class instance
    List {
        #[arg(long)]
        instance: i64,

        /// Include inactive enrollments
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Schedule a session of a class instance
    Add {
        #[arg(long)]
        instance: i64,

        /// Session date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List sessions of a class instance
    List {
        #[arg(long)]
        instance: i64,
    },
}
