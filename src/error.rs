// Gateway-facing error types
use std::collections::HashMap;
use thiserror::Error;

/// Errors surfaced by the gateway client and the layers above it.
///
/// Transient server errors (status >= 500) are retried inside the gateway
/// and only reach callers once the retry budget is spent. A 401 anywhere is
/// handled centrally (session cleared, expiry broadcast) before the call
/// rejects with `AuthExpired`, so callers never special-case it.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response was received at the transport level. Not retried.
    #[error("Network error: {0}")]
    Network(String),

    /// The webhook did not answer within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Status >= 500 after the retry budget was exhausted.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status. Never retried.
    #[error("Request failed ({status}): {message}")]
    Client { status: u16, message: String },

    /// The backend answered 401; the session has already been cleared.
    #[error("Session expired. Please login again.")]
    AuthExpired,

    /// Local form-level validation failure; never reaches the network.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The response body was not the JSON shape the wire contract promises.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Server { status, message: message.into() }
    }

    pub fn client(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Client { status, message: message.into() }
    }

    /// HTTP status carried by the error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Server { status, .. } => Some(*status),
            GatewayError::Client { status, .. } => Some(*status),
            GatewayError::AuthExpired => Some(401),
            _ => None,
        }
    }
}

/// Form-level validation failure with per-field messages.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field_errors: HashMap<String, String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), field_errors: HashMap::new() }
    }

    pub fn with_field(mut self, field: impl Into<String>, error: impl Into<String>) -> Self {
        self.field_errors.insert(field.into(), error.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_carried_through() {
        assert_eq!(GatewayError::server(503, "down").status(), Some(503));
        assert_eq!(GatewayError::client(404, "missing").status(), Some(404));
        assert_eq!(GatewayError::AuthExpired.status(), Some(401));
        assert_eq!(GatewayError::Network("refused".into()).status(), None);
    }

    #[test]
    fn validation_collects_field_errors() {
        let err = ValidationError::new("Please fix the form errors")
            .with_field("name", "Product name is required")
            .with_field("price", "Price must be a positive number");
        assert_eq!(err.field_errors.len(), 2);
        assert_eq!(err.to_string(), "Please fix the form errors");
    }
}
