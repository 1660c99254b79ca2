//! Examination repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/create/delete APIs over `pemeriksaan` storage.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - All statements are parameterized; ids are never spliced into SQL text.
//! - Read paths reject invalid persisted enum/date values instead of
//!   masking them.
//! - Read paths render a missing specimen as `"-"` via `COALESCE`.

use crate::db::DbError;
use crate::model::examination::{
    ExaminationId, ExaminationInput, ExaminationRecord, Priority, RequestStatus,
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EXAMINATION_SELECT_SQL: &str = "SELECT
    pemeriksaan.id_pemeriksaan,
    pasien.nama_lengkap,
    pasien.id_pasien,
    dokter.nama_dokter,
    dokter.id_dokter,
    COALESCE(spesimen.jenis_spesimen, '-') AS jenis_spesimen,
    layanan.nama_layanan,
    pemeriksaan.jenis_pemeriksaan,
    pemeriksaan.tanggal_permintaan,
    pemeriksaan.prioritas,
    pemeriksaan.status_permintaan,
    pemeriksaan.catatan_dokter
FROM pemeriksaan
JOIN pasien ON pemeriksaan.id_pasien = pasien.id_pasien
JOIN dokter ON pemeriksaan.id_dokter = dokter.id_dokter
LEFT JOIN spesimen ON pemeriksaan.id_spesimen = spesimen.id_spesimen
JOIN layanan ON pemeriksaan.id_layanan = layanan.id_layanan";

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for examination persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ExaminationId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "examination not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted examination data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for examination operations.
pub trait ExaminationRepository {
    /// Returns every joined examination row in storage order.
    fn list_examinations(&self) -> RepoResult<Vec<ExaminationRecord>>;
    /// Returns the first joined row matching `id`.
    fn get_examination(&self, id: ExaminationId) -> RepoResult<Option<ExaminationRecord>>;
    /// Inserts one examination and returns the storage-assigned id.
    fn create_examination(&self, input: &ExaminationInput) -> RepoResult<ExaminationId>;
    /// Hard-deletes by id; `NotFound` when no row was affected.
    fn delete_examination(&self, id: ExaminationId) -> RepoResult<()>;
}

/// SQLite-backed examination repository.
pub struct SqliteExaminationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExaminationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ExaminationRepository for SqliteExaminationRepository<'_> {
    fn list_examinations(&self) -> RepoResult<Vec<ExaminationRecord>> {
        let mut stmt = self.conn.prepare(EXAMINATION_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_examination_row(row)?);
        }

        Ok(records)
    }

    fn get_examination(&self, id: ExaminationId) -> RepoResult<Option<ExaminationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EXAMINATION_SELECT_SQL}
             WHERE pemeriksaan.id_pemeriksaan = ?1;"
        ))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_examination_row(row)?));
        }

        Ok(None)
    }

    fn create_examination(&self, input: &ExaminationInput) -> RepoResult<ExaminationId> {
        self.conn.execute(
            "INSERT INTO pemeriksaan (
                id_pasien,
                id_dokter,
                id_layanan,
                id_spesimen,
                jenis_pemeriksaan,
                tanggal_permintaan,
                prioritas,
                status_permintaan,
                catatan_dokter
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                input.patient_id,
                input.doctor_id,
                input.service_id,
                input.specimen_id,
                input.examination_type.as_str(),
                input.requested_at,
                input.priority.as_str(),
                input.status.as_str(),
                input.doctor_notes.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn delete_examination(&self, id: ExaminationId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM pemeriksaan WHERE id_pemeriksaan = ?1;",
            params![id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_examination_row(row: &Row<'_>) -> RepoResult<ExaminationRecord> {
    let priority_text: String = row.get("prioritas")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in pemeriksaan.prioritas"
        ))
    })?;

    let status_text: String = row.get("status_permintaan")?;
    let status = RequestStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid request status `{status_text}` in pemeriksaan.status_permintaan"
        ))
    })?;

    let requested_text: String = row.get("tanggal_permintaan")?;
    let requested_at = parse_requested_at(&requested_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid date `{requested_text}` in pemeriksaan.tanggal_permintaan"
        ))
    })?;

    Ok(ExaminationRecord {
        id: row.get("id_pemeriksaan")?,
        patient_name: row.get("nama_lengkap")?,
        patient_id: row.get("id_pasien")?,
        doctor_name: row.get("nama_dokter")?,
        doctor_id: row.get("id_dokter")?,
        specimen_type: row.get("jenis_spesimen")?,
        service_name: row.get("nama_layanan")?,
        examination_type: row.get("jenis_pemeriksaan")?,
        requested_at,
        priority,
        status,
        doctor_notes: row.get("catatan_dokter")?,
    })
}

/// Accepts SQLite's text date-time forms and plain dates (read as midnight).
fn parse_requested_at(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
