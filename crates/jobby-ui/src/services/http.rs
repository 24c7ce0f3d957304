//! Same-origin fetch transport.

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::RequestMode;

use crate::core::error::ActionError;
use crate::core::payload::FORM_CONTENT_TYPE;
use crate::core::transport::{Method, RawResponse, RequestDescriptor, Transport};

/// Sends trigger requests with `fetch`, cookies included.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, ActionError> {
        let builder = match request.method {
            Method::Post => Request::post(&request.url),
        };
        let response = builder
            .mode(RequestMode::SameOrigin)
            .header(&request.credential_header, request.credential.as_str())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(request.body())
            .send()
            .await
            .map_err(|err| ActionError::NetworkFailure {
                detail: err.to_string(),
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ActionError::NetworkFailure {
                detail: err.to_string(),
            })?;
        Ok(RawResponse::new(status, body))
    }
}
