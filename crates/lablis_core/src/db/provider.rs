//! Connection provider seam used by the service layer.
//!
//! # Responsibility
//! - Produce a ready-to-use connection for exactly one operation.
//!
//! # Invariants
//! - Each `connect` call returns a distinct connection owned by the caller;
//!   dropping it closes the underlying handle.

use super::{open_db, DbResult};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Factory for per-operation database connections.
pub trait ConnectionProvider {
    fn connect(&self) -> DbResult<Connection>;
}

/// Opens the configured SQLite file on every call.
#[derive(Debug, Clone)]
pub struct SqliteFileProvider {
    path: PathBuf,
}

impl SqliteFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionProvider for SqliteFileProvider {
    fn connect(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}
