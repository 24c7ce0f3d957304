//! Failures of a single trigger action.
//!
//! Every variant is caught at the controller boundary and logged; none is
//! retried and none reaches the page.

use thiserror::Error;

/// Error raised while building, sending or interpreting a trigger request.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Neither the page field nor the cookie carried an anti-forgery token.
    #[error("no CSRF token set")]
    MissingCredential,
    /// The request failed before a response arrived.
    #[error("request failed: {detail}")]
    NetworkFailure {
        /// Transport error description.
        detail: String,
    },
    /// The server answered outside the 2xx range.
    #[error("unexpected response status {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body text, when the server sent one.
        detail: Option<String>,
    },
    /// A success response carried a body that could not be decoded.
    #[error("response body was not valid JSON")]
    MalformedBody {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl ActionError {
    /// HTTP status tied to the failure, when a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Machine-friendly discriminator for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::NetworkFailure { .. } => "network_failure",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::MalformedBody { .. } => "malformed_body",
        }
    }
}
