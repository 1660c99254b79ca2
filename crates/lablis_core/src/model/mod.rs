//! Domain model for laboratory examination requests.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Examinations are identified by a storage-assigned integer id.
//! - Deletion is permanent; there is no tombstone state.

pub mod examination;
