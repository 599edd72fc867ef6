//! Terminal front end for orgbook.
//!
//! # Responsibility
//! - Parse menu actions into exactly one `OrgBook` call each.
//! - Resolve data/log locations from flags, then environment, then defaults.
//! - Map results onto exit codes: 0 for success, 1 for errors and not-found.

mod commands;
mod render;

use clap::{Args, Parser, Subcommand};
use log::error;
use orgbook_core::config::{absolutize, DEFAULT_DATA_DIR};
use orgbook_core::{
    default_log_level, init_logging, AppError, LoggingError, LoggingOptions, OrgBook,
    StoreConfig,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "orgbook")]
#[command(about = "Employee directory, reporting lines and project tasks", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the employee and task stores
    #[arg(long, env = "ORGBOOK_DATA_DIR", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "ORGBOOK_LOG_LEVEL", value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files (defaults to <data-dir>/logs)
    #[arg(long, env = "ORGBOOK_LOG_DIR", value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Print rows as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage employees and reporting lines
    Employee {
        #[command(subcommand)]
        action: EmployeeCommand,
    },
    /// Register accounts and check credentials
    User {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectCommand,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Link tasks to users
    Assignment {
        #[command(subcommand)]
        action: AssignmentCommand,
    },
}

#[derive(Args)]
struct EmployeeArgs {
    name: String,
    department: String,
    position: String,
    /// Manager id; 0 or omitted means no manager
    #[arg(long, value_name = "ID")]
    manager: Option<i64>,
}

#[derive(Subcommand)]
enum EmployeeCommand {
    Add(EmployeeArgs),
    Update {
        id: i64,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    Delete {
        id: i64,
    },
    Get {
        id: i64,
    },
    List,
    /// Case-insensitive substring search on one field
    Search {
        /// name|department|position
        field: String,
        value: String,
    },
    /// Show everyone reporting (directly or not) to an employee
    Hierarchy {
        root_id: i64,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    Register {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
    },
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Args)]
struct ProjectArgs {
    name: String,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand)]
enum ProjectCommand {
    Create(ProjectArgs),
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    Delete {
        id: i64,
    },
    Get {
        id: i64,
    },
    List,
}

#[derive(Args)]
struct TaskArgs {
    title: String,
    #[arg(long, value_name = "ID")]
    project: i64,
    #[arg(long)]
    description: Option<String>,
    /// YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    due: Option<String>,
    /// 1|2|3 or low|medium|high
    #[arg(long, default_value = "2")]
    priority: String,
    /// Not Started|In Progress|Completed
    #[arg(long, default_value = "Not Started")]
    status: String,
}

#[derive(Subcommand)]
enum TaskCommand {
    Create(TaskArgs),
    Update {
        id: i64,
        #[command(flatten)]
        fields: TaskArgs,
    },
    Delete {
        id: i64,
    },
    Get {
        id: i64,
    },
    List {
        /// Only tasks of this project
        #[arg(long, value_name = "ID")]
        project: Option<i64>,
    },
}

#[derive(Subcommand)]
enum AssignmentCommand {
    Add {
        task_id: i64,
        user_id: i64,
    },
    Remove {
        id: i64,
    },
    List {
        #[arg(long, value_name = "ID", required_unless_present = "user", conflicts_with = "user")]
        task: Option<i64>,
        #[arg(long, value_name = "ID")]
        user: Option<i64>,
    },
}

/// Result of one command before it reaches the terminal.
enum Outcome {
    Done(String),
    /// Nothing matched; printed to stderr and exits 1.
    Missing(String),
}

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Logging(LoggingError),
    App(AppError),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::App(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to encode output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::App(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<AppError> for CliError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(Outcome::Done(text)) => {
            if !text.is_empty() {
                println!("{text}");
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Missing(text)) => {
            eprintln!("{text}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("event=command_failed module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Outcome, CliError> {
    let cwd = std::env::current_dir()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let config = StoreConfig::new(absolutize(&data_dir, &cwd));

    let log_dir = match cli.log_dir {
        Some(dir) => absolutize(&dir, &cwd),
        None => config.default_log_dir(&cwd),
    };
    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    let mut logging = LoggingOptions::new(level, log_dir);
    logging.mirror_to_stderr = true;
    init_logging(&logging)?;

    let book = OrgBook::open(&config)?;
    commands::dispatch(&book, cli.command, cli.json)
}
