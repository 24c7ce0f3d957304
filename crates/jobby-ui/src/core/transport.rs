//! Outbound request model and the network seam.
//!
//! # Design
//! - Requests are plain data so builders stay pure and testable.
//! - Responses are read completely before handlers see them.
//! - The seam is `?Send`: everything runs on the UI thread.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::core::credential::Credential;
use crate::core::error::ActionError;
use crate::core::payload::FormPayload;

/// Mutating HTTP verb used by trigger requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// `POST`.
    Post,
}

impl Method {
    /// Verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
        }
    }
}

/// Fully built request for one trigger activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: Method,
    /// Target URL rendered into the trigger markup.
    pub url: String,
    /// Header carrying the anti-forgery token.
    pub credential_header: String,
    /// Anti-forgery token.
    pub credential: Credential,
    /// Form fields sent as the body.
    pub payload: FormPayload,
}

impl RequestDescriptor {
    /// `POST` request with the token attached under `credential_header`.
    #[must_use]
    pub fn post(
        url: impl Into<String>,
        credential_header: impl Into<String>,
        credential: Credential,
        payload: FormPayload,
    ) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            credential_header: credential_header.into(),
            credential,
            payload,
        }
    }

    /// Encoded request body.
    #[must_use]
    pub fn body(&self) -> String {
        self.payload.encode()
    }
}

/// Status and body text of a completed response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body text; empty for bodiless responses.
    pub body: String,
}

impl RawResponse {
    /// Response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    /// Returns [`ActionError::MalformedBody`] when decoding fails.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        serde_json::from_str(&self.body).map_err(|source| ActionError::MalformedBody { source })
    }

    /// Trimmed body text, `None` when empty.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        let trimmed = self.body.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Sends trigger requests.
#[async_trait(?Send)]
pub trait Transport {
    /// Issue `request` once and read the whole response.
    ///
    /// # Errors
    /// Returns [`ActionError::NetworkFailure`] when no response arrives.
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, ActionError>;
}
