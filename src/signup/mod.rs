//! Newsletter signup domain types
//!
//! Everything the signup step exchanges with its host wizard: the state
//! machine states, the host-owned step context, the seeded value and the
//! change notification pushed back upstream.

use serde::{Deserialize, Serialize};

pub mod response;

pub use response::{
    classify, sanitize_error_message, RawResponse, RemoteResponse, ALREADY_SUBSCRIBED_TEXT,
};

/// Field name the widget reports under by default
pub const SIGNUP_FIELD: &str = "mailchimpSignup";

/// Field-group key under which the wizard records the newsletter step
pub const NEWSLETTER_GROUP: &str = "newsletter";

/// Step id of the wizard's terminal success step
pub const SUCCESS_STEP: &str = "success";

/// Current state of a signup attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SignupState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Waiting on the remote submitter
    Submitting,
    /// Signup accepted, with the message to display
    Succeeded(String),
    /// Signup rejected, with the sanitized message to display
    Failed(String),
}

impl SignupState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SignupState::Submitting)
    }
}

/// Value of the signup field as stored by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupValue {
    #[serde(default)]
    pub has_signup: bool,
}

impl SignupValue {
    pub fn signed_up() -> Self {
        Self { has_signup: true }
    }
}

/// Notification pushed to the host when the signup flag flips to true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub field: String,
    pub value: SignupValue,
}

/// Static configuration of the signup form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupProperties {
    /// Mailchimp form action URL (the `/subscribe/post?u=..&id=..` form)
    #[serde(default)]
    pub mailchimp_action_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub free_account_notice: Option<String>,
    #[serde(default)]
    pub gdpr_notice: Option<String>,
    /// Prefills the email field when present
    #[serde(default)]
    pub current_user_email: Option<String>,
}

/// Values recorded by the newsletter step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterValues {
    #[serde(rename = "mailchimpSignup", default)]
    pub mailchimp_signup: Option<SignupValue>,
}

/// Field values the wizard has recorded, grouped by step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    #[serde(default)]
    pub newsletter: Option<NewsletterValues>,
}

/// Read-only view of the host wizard passed to the signup step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStepContext {
    pub current_step: String,
    #[serde(default)]
    pub field_values: FieldValues,
}

impl WizardStepContext {
    pub fn new(current_step: impl Into<String>) -> Self {
        Self {
            current_step: current_step.into(),
            field_values: FieldValues::default(),
        }
    }

    /// Whether the newsletter step already recorded a successful signup
    pub fn has_recorded_signup(&self) -> bool {
        self.recorded_signup().has_signup
    }

    /// Recorded signup value, defaulting to not signed up
    pub fn recorded_signup(&self) -> SignupValue {
        self.field_values
            .newsletter
            .as_ref()
            .and_then(|n| n.mailchimp_signup)
            .unwrap_or_default()
    }

    /// Record a value for the newsletter signup field
    pub fn record_signup(&mut self, value: SignupValue) {
        self.field_values
            .newsletter
            .get_or_insert_with(NewsletterValues::default)
            .mailchimp_signup = Some(value);
    }

    /// The widget renders nothing on the success step once signup is recorded
    pub fn skips_signup(&self) -> bool {
        self.current_step == SUCCESS_STEP && self.has_recorded_signup()
    }
}
