//! Examination use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/delete entry points returning [`Outcome`].
//! - Own the per-operation connection lifecycle: acquire, run one statement,
//!   release.
//!
//! # Invariants
//! - Every failure (connect, query, invalid persisted data) collapses into
//!   `Outcome::InternalError`; the cause is logged, never returned.
//! - Absence is `Outcome::NotFound` and is not logged as an error.
//! - Create input is validated before any connection is opened.
//! - The connection is released on every exit path.

use crate::db::ConnectionProvider;
use crate::model::examination::{ExaminationId, ExaminationInput, ExaminationRecord};
use crate::repo::examination_repo::{
    ExaminationRepository, RepoError, RepoResult, SqliteExaminationRepository,
};
use crate::service::outcome::Outcome;
use log::{error, info, warn};
use std::time::Instant;

const MSG_FETCHED: &str = "Pemeriksaan fetched successfully!";
const MSG_CREATED: &str = "Pemeriksaan created successfully!";
const MSG_NONE_FOUND: &str = "No pemeriksaan found";

/// Use-case service for examination records.
///
/// Holds no connection; each call asks `provider` for a fresh one.
pub struct ExaminationService<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> ExaminationService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Lists every examination with its patient, doctor, specimen and service.
    ///
    /// Row order is whatever storage yields and must not be relied upon.
    pub fn list(&self) -> Outcome<Vec<ExaminationRecord>> {
        self.run("examination_list", |repo| {
            let records = repo.list_examinations()?;
            if records.is_empty() {
                return Ok(Outcome::not_found(MSG_NONE_FOUND));
            }
            Ok(Outcome::ok(MSG_FETCHED, records))
        })
    }

    /// Gets one examination by id.
    pub fn get_by_id(&self, id: ExaminationId) -> Outcome<ExaminationRecord> {
        self.run("examination_get", |repo| {
            Ok(match repo.get_examination(id)? {
                Some(record) => Outcome::ok(MSG_FETCHED, record),
                None => Outcome::not_found(not_found_message(id)),
            })
        })
    }

    /// Creates an examination and echoes the input back.
    ///
    /// The payload is the request as given: it carries neither the generated
    /// id nor the denormalized names that `list`/`get_by_id` return.
    pub fn create(&self, input: ExaminationInput) -> Outcome<ExaminationInput> {
        if let Err(err) = input.validate() {
            warn!(
                "event=examination_create module=service status=rejected reason={}",
                err
            );
            return Outcome::bad_request(err.to_string());
        }

        self.run("examination_create", |repo| {
            let id = repo.create_examination(&input)?;
            info!("event=examination_create module=service status=inserted id={id}");
            Ok(Outcome::created(MSG_CREATED, input))
        })
    }

    /// Permanently deletes an examination by id.
    pub fn delete(&self, id: ExaminationId) -> Outcome<()> {
        self.run("examination_delete", |repo| {
            match repo.delete_examination(id) {
                Ok(()) => Ok(Outcome::ok_message(format!(
                    "Pemeriksaan with id {id} deleted successfully!"
                ))),
                Err(RepoError::NotFound(_)) => Ok(Outcome::not_found(not_found_message(id))),
                Err(err) => Err(err),
            }
        })
    }

    fn run<T>(
        &self,
        event: &str,
        op: impl FnOnce(&SqliteExaminationRepository<'_>) -> RepoResult<Outcome<T>>,
    ) -> Outcome<T> {
        let started_at = Instant::now();

        let conn = match self.provider.connect() {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event={event} module=service status=error duration_ms={} error_code=db_connect_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Outcome::InternalError;
            }
        };

        let result = op(&SqliteExaminationRepository::new(&conn));

        if let Err((_, err)) = conn.close() {
            warn!("event={event} module=service status=warn error_code=db_close_failed error={err}");
        }

        match result {
            Ok(outcome) => {
                info!(
                    "event={event} module=service status={} duration_ms={}",
                    outcome.status(),
                    started_at.elapsed().as_millis()
                );
                outcome
            }
            Err(err) => {
                error!(
                    "event={event} module=service status=error duration_ms={} error_code=db_query_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Outcome::InternalError
            }
        }
    }
}

fn not_found_message(id: ExaminationId) -> String {
    format!("Pemeriksaan with id {id} not found")
}
