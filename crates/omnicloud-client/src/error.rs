//! Client error types for the OmniCloud SDK

use std::any::Any;

/// Error type for every client operation.
///
/// Both the HTTP helper and the resource clients surface these unmodified:
/// nothing in this crate retries or swallows a failure.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No response was obtained (DNS, connection refused, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived with a non-2xx status.
    #[error("request failed with status {status}: {status_text}")]
    Request { status: u16, status_text: String },

    /// Required local context was missing before a request could be issued.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    /// A bare message, usually a string payload passed through [`ClientError::normalize`].
    #[error("{0}")]
    Message(String),

    #[error("unknown error")]
    Unknown,
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Normalize an arbitrary caught value into a `ClientError`.
    ///
    /// A `ClientError` is returned as-is, a `String` or `&'static str` is
    /// wrapped into [`ClientError::Message`], and anything else collapses
    /// into [`ClientError::Unknown`]. Panic payloads from
    /// `JoinError::into_panic` have exactly this shape.
    pub fn normalize(value: Box<dyn Any + Send>) -> ClientError {
        let value = match value.downcast::<ClientError>() {
            Ok(err) => return *err,
            Err(other) => other,
        };
        let value = match value.downcast::<String>() {
            Ok(message) => return ClientError::Message(*message),
            Err(other) => other,
        };
        match value.downcast::<&'static str>() {
            Ok(message) => ClientError::Message((*message).to_string()),
            Err(_) => ClientError::Unknown,
        }
    }

    /// HTTP status of a [`ClientError::Request`], if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
