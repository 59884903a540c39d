//! Error types for the todo client.
//!
//! # Design
//! `NotFound`, `Forbidden` and `Unauthorized` get dedicated variants because
//! callers branch on them. All other non-2xx responses land in `HttpError`
//! with the raw status code and body. A failure where no response arrived at
//! all is a `Transport` error, never confused with a status failure.

use std::fmt;

use thiserror::Error;

/// No HTTP response was received (connection refused, DNS, timeout, ...).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Errors returned by `TodoClient` parse methods and `TodoService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 — the todo does not exist or belongs to someone else.
    #[error("resource not found")]
    NotFound,

    /// 403
    #[error("access denied")]
    Forbidden,

    /// 401. By the time the caller sees this the session has already been
    /// cleared by `UnauthorizedGuard`.
    #[error("session expired or invalid, please log in again")]
    Unauthorized,

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Which authentication call failed; selects the generic fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    Signup,
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthOperation::Login => f.write_str("Login"),
            AuthOperation::Signup => f.write_str("Signup"),
        }
    }
}

/// Errors returned by `SessionManager::login` and `SessionManager::signup`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server answered successfully but without a usable token.
    #[error("No token received from server")]
    NoToken,

    /// The server rejected the request and explained why in its `error` field.
    #[error("{0}")]
    Rejected(String),

    /// Transport failure, malformed body, or a rejection without a message.
    #[error("{0} failed")]
    Failed(AuthOperation),

    /// The session could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised by a `Storage` backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
