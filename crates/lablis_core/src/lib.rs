//! Core data access for laboratory examination requests (pemeriksaan).
//! This crate is the single source of truth for examination invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use db::{ConnectionProvider, DbError, DbResult, SqliteFileProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::examination::{
    ExaminationId, ExaminationInput, ExaminationRecord, ExaminationValidationError, Priority,
    RequestStatus, NO_SPECIMEN_PLACEHOLDER,
};
pub use repo::examination_repo::{
    ExaminationRepository, RepoError, RepoResult, SqliteExaminationRepository,
};
pub use service::examination_service::ExaminationService;
pub use service::outcome::Outcome;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
