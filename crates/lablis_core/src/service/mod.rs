//! Core use-case services.
//!
//! # Responsibility
//! - Turn repository calls into use-case level APIs with uniform outcomes.
//! - Keep CLI/transport layers decoupled from storage details.

pub mod examination_service;
pub mod outcome;
