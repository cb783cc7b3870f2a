//! Mailchimp list submitter

use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use std::time::Duration;
use tracing::debug;

use super::error::SubmitError;
use super::jsonp::{callback_name, parse_jsonp};
use super::{RemoteSubmitter, SubmitRequest};
use crate::config::HttpConfig;
use crate::signup::RemoteResponse;

/// Path suffix of the hosted form action
const FORM_PATH_SUFFIX: &str = "/post";
/// Path suffix of the JSONP variant of the same endpoint
const JSONP_PATH_SUFFIX: &str = "/post-json";

/// Submits signups to a Mailchimp hosted-form endpoint
pub struct MailchimpSubmitter {
    client: Client,
    callback_param: String,
}

impl MailchimpSubmitter {
    /// Create a submitter with the given request timeout
    pub fn new(timeout: Duration, callback_param: impl Into<String>) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Client(e.to_string()))?;
        Ok(Self {
            client,
            callback_param: callback_param.into(),
        })
    }

    /// Create from the `[http]` config section
    pub fn from_config(config: &HttpConfig) -> Result<Self, SubmitError> {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            config.callback_param.clone(),
        )
    }

    /// Resolve the JSONP endpoint for a form action URL.
    ///
    /// `/subscribe/post?u=..&id=..` becomes `/subscribe/post-json?u=..&id=..&c=<callback>`.
    /// URLs already pointing at `post-json` are left as they are.
    pub fn build_url(&self, action_url: &str, callback: &str) -> Result<Url, SubmitError> {
        let mut url = Url::parse(action_url).map_err(|e| SubmitError::InvalidActionUrl {
            url: action_url.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(SubmitError::InvalidActionUrl {
                url: action_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let path = url.path().trim_end_matches('/').to_string();
        if let Some(base) = path.strip_suffix(FORM_PATH_SUFFIX) {
            url.set_path(&format!("{}{}", base, JSONP_PATH_SUFFIX));
        }

        url.query_pairs_mut()
            .append_pair(&self.callback_param, callback);
        Ok(url)
    }

    /// Build the POST request carrying `EMAIL=<address>` as a form body
    pub fn build_request(
        &self,
        request: &SubmitRequest,
        callback: &str,
    ) -> Result<Request, SubmitError> {
        let url = self.build_url(&request.action_url, callback)?;
        self.client
            .post(url)
            .form(&request.form_fields())
            .build()
            .map_err(|e| SubmitError::Client(e.to_string()))
    }
}

#[async_trait]
impl RemoteSubmitter for MailchimpSubmitter {
    async fn submit(&self, request: &SubmitRequest) -> Result<RemoteResponse, SubmitError> {
        let callback = callback_name();
        let http_request = self.build_request(request, &callback)?;

        debug!(url = %http_request.url().path(), "Submitting newsletter signup");

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| SubmitError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(SubmitError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let raw = parse_jsonp(&body, &callback)?;
        debug!(result = %raw.result, "Newsletter signup answered");
        Ok(RemoteResponse::from(raw))
    }
}
