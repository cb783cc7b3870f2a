//! Classification of mailing-list responses
//!
//! The list service answers every subscribe call with `{result, msg}`.
//! Classification turns that into a [`RemoteResponse`]; sanitization cleans
//! provider error text before it is shown.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Substring the provider uses when the address is already on the list
pub const ALREADY_SUBSCRIBED_MARKER: &str = "is already subscribed";

/// Shown instead of the provider's "already subscribed" text, which leaks
/// list membership
pub const ALREADY_SUBSCRIBED_TEXT: &str =
    "Thank you for signing up! Please check your inbox to confirm your subscription.";

/// Status-code artifact the provider prepends to some error messages
const STATUS_CODE_PREFIX: &str = "0 - ";

/// First anchor element, tag and contents, across lines
static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b[^>]*>.*?</a>").expect("anchor pattern is valid"));

/// Raw response body as decoded from the JSONP payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub result: String,
    #[serde(default)]
    pub msg: String,
}

impl RawResponse {
    pub fn new(result: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            msg: msg.into(),
        }
    }
}

/// Classified outcome of a signup call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResponse {
    Success { message: String },
    AlreadySubscribed,
    Error { message: String },
}

impl From<RawResponse> for RemoteResponse {
    fn from(raw: RawResponse) -> Self {
        classify(raw)
    }
}

/// Classify a raw response.
///
/// The already-subscribed check wins over the `result` tag: the provider
/// reports it as an error, but for the user it is not one.
pub fn classify(raw: RawResponse) -> RemoteResponse {
    if raw.msg.contains(ALREADY_SUBSCRIBED_MARKER) {
        RemoteResponse::AlreadySubscribed
    } else if raw.result == "error" {
        RemoteResponse::Error { message: raw.msg }
    } else {
        RemoteResponse::Success { message: raw.msg }
    }
}

/// Clean a provider error message for display.
///
/// Removes the first anchor element (tag and contents), then a single
/// leading `"0 - "` status prefix.
pub fn sanitize_error_message(message: &str) -> String {
    let without_link = ANCHOR_RE.replacen(message, 1, "");
    match without_link.strip_prefix(STATUS_CODE_PREFIX) {
        Some(rest) => rest.to_string(),
        None => without_link.into_owned(),
    }
}
