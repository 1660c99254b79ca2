//! Uniform use-case outcome.
//!
//! # Responsibility
//! - Represent every result of an examination operation as one tagged type.
//! - Serialize to the `{status, message, payload?}` envelope callers branch on.
//!
//! # Invariants
//! - `status()` is 200/201 for success, 400, 404 or 500 otherwise.
//! - Internal errors never carry the underlying cause.

use serde::{Serialize, Serializer};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Result of one examination use-case call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success {
        status: u16,
        message: String,
        payload: Option<T>,
    },
    NotFound {
        message: String,
    },
    BadRequest {
        message: String,
    },
    InternalError,
}

impl<T> Outcome<T> {
    /// 200 outcome carrying `payload`.
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self::Success {
            status: STATUS_OK,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// 200 outcome with a confirmation message only.
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self::Success {
            status: STATUS_OK,
            message: message.into(),
            payload: None,
        }
    }

    /// 201 outcome carrying the created representation.
    pub fn created(message: impl Into<String>, payload: T) -> Self {
        Self::Success {
            status: STATUS_CREATED,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } => *status,
            Self::NotFound { .. } => STATUS_NOT_FOUND,
            Self::BadRequest { .. } => STATUS_BAD_REQUEST,
            Self::InternalError => STATUS_INTERNAL_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. }
            | Self::NotFound { message }
            | Self::BadRequest { message } => message,
            Self::InternalError => INTERNAL_ERROR_MESSAGE,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            Self::Success { payload, .. } => payload,
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    status: u16,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a T>,
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            status: self.status(),
            message: self.message(),
            payload: self.payload(),
        }
        .serialize(serializer)
    }
}
