//! Error types for the todo client.
//!
//! # Design
//! `ApiError` keeps the distinct failure kinds of a single exchange
//! (transport, status, payload shape). `SyncError` wraps it with the
//! operation that failed; the user only ever sees `user_message()`, which
//! collapses every request failure into one generic line per operation.
//! Local validation never reaches the network and keeps its own message.

use thiserror::Error;

use crate::types::TodoId;

/// Errors produced while executing or interpreting one HTTP exchange.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The status was 2xx but the envelope's `data` was absent, falsy, or of
    /// the wrong shape. `raw` holds the body when it was not JSON at all.
    #[error("response carried no usable data")]
    MissingData { raw: Option<String> },

    /// `data` was present but did not match the record schema.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Failures caught on the client before any request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required.")]
    EmptyTitle,

    #[error("Enter a valid ID.")]
    InvalidId,

    #[error("Task #{0} is not loaded.")]
    UnknownId(TodoId),

    #[error("Invalid due date: {0}")]
    InvalidDueAt(String),
}

/// The client operations, used to pick the user-facing failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "Could not load the list.",
            Operation::Get => "Not found or lookup failed.",
            Operation::Create => "Could not create the task.",
            Operation::Update => "Could not update the task.",
            Operation::Delete => "Could not delete the task.",
        }
    }
}

/// Errors returned by `SyncLoop` operations.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{op:?} failed: {source}")]
    Request {
        op: Operation,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SyncError {
    pub(crate) fn request(op: Operation, source: ApiError) -> Self {
        SyncError::Request { op, source }
    }

    /// The text shown to the user. Request failures are deliberately
    /// indistinguishable here; use `source()` for the detail.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Request { op, .. } => op.failure_message().to_string(),
            SyncError::Validation(err) => err.to_string(),
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SyncError::Request { source, .. } => Some(source),
            SyncError::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_collapse_to_one_message_per_operation() {
        let network = SyncError::request(Operation::Create, ApiError::Transport("refused".into()));
        let server = SyncError::request(
            Operation::Create,
            ApiError::HttpStatus {
                status: 500,
                body: "boom".into(),
            },
        );
        let shape = SyncError::request(Operation::Create, ApiError::MissingData { raw: None });
        assert_eq!(network.user_message(), "Could not create the task.");
        assert_eq!(server.user_message(), network.user_message());
        assert_eq!(shape.user_message(), network.user_message());
    }

    #[test]
    fn detail_is_kept_for_logging() {
        let err = SyncError::request(
            Operation::Delete,
            ApiError::HttpStatus {
                status: 503,
                body: "down".into(),
            },
        );
        assert!(matches!(
            err.api_error(),
            Some(ApiError::HttpStatus { status: 503, .. })
        ));
        assert_eq!(err.to_string(), "Delete failed: HTTP 503: down");
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = SyncError::from(ValidationError::EmptyTitle);
        assert_eq!(err.user_message(), "Title is required.");
        assert!(err.api_error().is_none());
    }
}
