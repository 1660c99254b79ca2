//! Command-line front end for examination records.
//!
//! # Responsibility
//! - Resolve `CoreConfig` once from flags, environment and `.env`.
//! - Map subcommands onto `ExaminationService` and print the outcome as JSON.
//! - Exit non-zero when the outcome status is not 2xx.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use lablis_core::{
    init_logging, CoreConfig, ExaminationInput, ExaminationService, Outcome, Priority,
    RequestStatus,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lablis")]
#[command(about = "Laboratory examination request records")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "LABLIS_DB_PATH")]
    db: PathBuf,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "LABLIS_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "LABLIS_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all examinations
    List,
    /// Show one examination
    Get {
        /// Examination id
        id: i64,
    },
    /// Create an examination request
    Create {
        #[arg(long)]
        patient_id: i64,
        #[arg(long)]
        doctor_id: i64,
        #[arg(long)]
        service_id: i64,
        #[arg(long)]
        specimen_id: Option<i64>,
        #[arg(long)]
        examination_type: String,
        /// Request time, e.g. 2024-03-18T08:30:00
        #[arg(long)]
        requested_at: NaiveDateTime,
        #[arg(long, value_enum, default_value_t = PriorityArg::Rutin)]
        priority: PriorityArg,
        #[arg(long, value_enum, default_value_t = StatusArg::Menunggu)]
        status: StatusArg,
        /// Doctor's notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Permanently delete an examination
    Delete {
        /// Examination id
        id: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorityArg {
    Rutin,
    Cito,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Rutin => Priority::Rutin,
            PriorityArg::Cito => Priority::Cito,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Menunggu,
    Diproses,
    Selesai,
    Dibatalkan,
}

impl From<StatusArg> for RequestStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Menunggu => RequestStatus::Menunggu,
            StatusArg::Diproses => RequestStatus::Diproses,
            StatusArg::Selesai => RequestStatus::Selesai,
            StatusArg::Dibatalkan => RequestStatus::Dibatalkan,
        }
    }
}

fn main() -> ExitCode {
    // Missing .env is fine; flags and real env vars still apply.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match CoreConfig::new(cli.db, cli.log_level, cli.log_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = config.log_dir() {
        if let Err(err) = init_logging(config.log_level(), log_dir) {
            eprintln!("failed to initialize logging: {err}");
            return ExitCode::from(2);
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        lablis_core::core_version()
    );

    let service = ExaminationService::new(config.connection_provider());

    match cli.command {
        Commands::List => report(service.list()),
        Commands::Get { id } => report(service.get_by_id(id)),
        Commands::Create {
            patient_id,
            doctor_id,
            service_id,
            specimen_id,
            examination_type,
            requested_at,
            priority,
            status,
            notes,
        } => report(service.create(ExaminationInput {
            patient_id,
            doctor_id,
            service_id,
            specimen_id,
            examination_type,
            requested_at,
            priority: priority.into(),
            status: status.into(),
            doctor_notes: notes,
        })),
        Commands::Delete { id } => report(service.delete(id)),
    }
}

fn report<T: Serialize>(outcome: Outcome<T>) -> ExitCode {
    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to render outcome: {err}");
            return ExitCode::FAILURE;
        }
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
