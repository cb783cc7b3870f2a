//! JSONP envelope handling
//!
//! The list endpoint answers with a script body of the form
//! `callbackName({...});`. We never execute it; the payload between the
//! parentheses is decoded as JSON once the callback name is confirmed.

use super::error::SubmitError;
use crate::signup::RawResponse;

/// Comment some JSONP servers emit before the callback to defuse content sniffing
const SNIFF_GUARD: &str = "/**/";

/// Generate a unique callback name for one request
pub fn callback_name() -> String {
    format!("jsonp_{}", uuid::Uuid::new_v4().simple())
}

/// Extract the JSON payload wrapped by `callback`
pub fn unwrap_jsonp<'a>(body: &'a str, callback: &str) -> Result<&'a str, SubmitError> {
    let trimmed = body.trim();
    let trimmed = trimmed.strip_prefix(SNIFF_GUARD).unwrap_or(trimmed).trim_start();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();

    let open = trimmed
        .find('(')
        .ok_or_else(|| SubmitError::malformed("missing opening parenthesis"))?;
    if !trimmed.ends_with(')') {
        return Err(SubmitError::malformed("missing closing parenthesis"));
    }

    let found = trimmed[..open].trim();
    if found != callback {
        return Err(SubmitError::CallbackMismatch {
            expected: callback.to_string(),
            found: found.to_string(),
        });
    }

    Ok(trimmed[open + 1..trimmed.len() - 1].trim())
}

/// Decode a JSONP body into the raw `{result, msg}` response
pub fn parse_jsonp(body: &str, callback: &str) -> Result<RawResponse, SubmitError> {
    let payload = unwrap_jsonp(body, callback)?;
    Ok(serde_json::from_str(payload)?)
}
