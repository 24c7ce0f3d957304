//! Transport double answering from a queue of scripted replies.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use jobby_ui::core::error::ActionError;
use jobby_ui::core::payload::FormPayload;
use jobby_ui::core::transport::{RawResponse, RequestDescriptor, Transport};

enum Reply {
    Response(RawResponse),
    Failure(String),
}

/// Records every request and answers with the next scripted reply.
///
/// An exhausted script answers with a network failure.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    sent: RefCell<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    /// Empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a text body.
    #[must_use]
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Response(RawResponse::new(status, body)));
        self
    }

    /// Queue a response with a JSON body.
    #[must_use]
    pub fn respond_json(self, status: u16, body: &serde_json::Value) -> Self {
        self.respond(status, &body.to_string())
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn fail(self, detail: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Failure(detail.to_string()));
        self
    }

    /// Requests sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.borrow().clone()
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }

    /// Payload of the last request, decoded back from its wire body.
    #[must_use]
    pub fn last_payload(&self) -> Option<FormPayload> {
        self.sent
            .borrow()
            .last()
            .and_then(|request| FormPayload::parse(&request.body()).ok())
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, ActionError> {
        self.sent.borrow_mut().push(request.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(detail)) => Err(ActionError::NetworkFailure { detail }),
            None => Err(ActionError::NetworkFailure {
                detail: "no scripted reply left".into(),
            }),
        }
    }
}
