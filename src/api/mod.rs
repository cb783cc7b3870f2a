//! Remote submission for the newsletter signup
//!
//! This module provides:
//! - The `RemoteSubmitter` capability the signup widget is driven by
//! - A Mailchimp implementation speaking the JSONP form endpoint
//! - A scripted mock for tests

pub mod error;
pub mod jsonp;
pub mod mailchimp;

pub use error::SubmitError;
pub use mailchimp::MailchimpSubmitter;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::signup::RemoteResponse;

/// Form field the list service expects the address in
pub const EMAIL_FIELD: &str = "EMAIL";

/// One signup submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Form action URL of the list
    pub action_url: String,
    /// Address exactly as it was in the field at submit time
    pub email: String,
}

impl SubmitRequest {
    pub fn new(action_url: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            action_url: action_url.into(),
            email: email.into(),
        }
    }

    /// Form-encoded body fields
    pub fn form_fields(&self) -> [(&'static str, &str); 1] {
        [(EMAIL_FIELD, self.email.as_str())]
    }
}

/// Capability that delivers a signup to the list service
#[async_trait]
pub trait RemoteSubmitter: Send + Sync {
    /// Send the request and classify the service's answer.
    ///
    /// `Err` is reserved for transport-level failures; a provider-side
    /// rejection is `Ok(RemoteResponse::Error { .. })`.
    async fn submit(&self, request: &SubmitRequest) -> Result<RemoteResponse, SubmitError>;
}

/// Mock implementation for testing
#[derive(Default, Clone)]
pub struct MockSubmitter {
    /// Outcomes handed out in order; exhausted queue yields a network error
    outcomes: Arc<Mutex<VecDeque<Result<RemoteResponse, SubmitError>>>>,
    /// Requests received so far
    pub requests: Arc<Mutex<Vec<SubmitRequest>>>,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers every queued call with the given responses
    pub fn with_responses(responses: impl IntoIterator<Item = RemoteResponse>) -> Self {
        let mock = Self::new();
        for response in responses {
            mock.push(Ok(response));
        }
        mock
    }

    /// Queue the next outcome
    pub fn push(&self, outcome: Result<RemoteResponse, SubmitError>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    /// Number of submissions received
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RemoteSubmitter for MockSubmitter {
    async fn submit(&self, request: &SubmitRequest) -> Result<RemoteResponse, SubmitError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front())
            .unwrap_or_else(|| Err(SubmitError::network("mock: no outcome queued")))
    }
}
