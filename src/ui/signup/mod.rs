//! Newsletter signup step
//!
//! `SignupWidget` owns the per-mount signup state machine:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──Success/AlreadySubscribed──▶ Succeeded
//!   ▲                  │
//!   │                  └──Error──▶ Failed
//!   └── (Succeeded/Failed may submit again)
//! ```
//!
//! The host hands in immutable props and gets a `ChangeEvent` back the first
//! time the signup flag flips to true.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::api::{RemoteSubmitter, SubmitError, SubmitRequest};
use crate::i18n::Translate;
use crate::signup::response::ALREADY_SUBSCRIBED_TEXT;
use crate::signup::{
    sanitize_error_message, ChangeEvent, RemoteResponse, SignupProperties, SignupState,
    SignupValue, WizardStepContext, SIGNUP_FIELD,
};

use super::email_input::EmailInput;

mod render;

#[cfg(test)]
mod tests;

/// Callback receiving change notifications for the host
pub type ChangeCallback = Box<dyn FnMut(&ChangeEvent) + Send>;

/// Placeholder shown in an empty email field
pub const EMAIL_PLACEHOLDER: &str = "you@example.com";

/// Immutable inputs the host mounts the widget with
pub struct SignupProps {
    /// Field name reported in change events
    pub name: String,
    pub properties: SignupProperties,
    /// Previously stored value, seeds the signup flag
    pub value: SignupValue,
    pub step_state: WizardStepContext,
    pub translate: Arc<dyn Translate>,
    pub on_change: Option<ChangeCallback>,
}

impl SignupProps {
    /// Props with the default field name and an identity translator
    pub fn new(properties: SignupProperties, step_state: WizardStepContext) -> Self {
        Self {
            name: SIGNUP_FIELD.to_string(),
            properties,
            value: SignupValue::default(),
            step_state,
            translate: Arc::new(|text: &str| text.to_string()),
            on_change: None,
        }
    }

    pub fn with_value(mut self, value: SignupValue) -> Self {
        self.value = value;
        self
    }

    pub fn with_translator(mut self, translate: Arc<dyn Translate>) -> Self {
        self.translate = translate;
        self
    }

    pub fn on_change(mut self, callback: ChangeCallback) -> Self {
        self.on_change = Some(callback);
        self
    }
}

/// Status paragraph polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Success,
    Error,
}

/// How assistive technology should announce a status update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRegion {
    /// Announce immediately, interrupting
    Assertive,
}

/// Status paragraph shown once a submission resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub polarity: Polarity,
    pub text: String,
    pub live: LiveRegion,
}

/// Newsletter signup form and its state machine
pub struct SignupWidget {
    name: String,
    properties: SignupProperties,
    step_state: WizardStepContext,
    translate: Arc<dyn Translate>,
    on_change: Option<ChangeCallback>,
    state: SignupState,
    has_signup: bool,
    email: EmailInput,
}

impl SignupWidget {
    /// Mount a fresh widget
    pub fn new(props: SignupProps) -> Self {
        let email = EmailInput::new(
            props.properties.current_user_email.as_deref(),
            EMAIL_PLACEHOLDER,
        );
        Self {
            name: props.name,
            properties: props.properties,
            step_state: props.step_state,
            translate: props.translate,
            on_change: props.on_change,
            state: SignupState::Idle,
            has_signup: props.value.has_signup,
            email,
        }
    }

    pub fn state(&self) -> &SignupState {
        &self.state
    }

    /// Whether a signup has succeeded (or was already recorded at mount)
    pub fn has_signup(&self) -> bool {
        self.has_signup
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the host context after the wizard records a change
    pub fn set_step_state(&mut self, step_state: WizardStepContext) {
        self.step_state = step_state;
    }

    pub fn step_state(&self) -> &WizardStepContext {
        &self.step_state
    }

    /// Whether anything is drawn at all
    pub fn is_rendered(&self) -> bool {
        !self.step_state.skips_signup()
    }

    /// Whether the busy overlay covers the form
    pub fn shows_overlay(&self) -> bool {
        self.is_rendered() && self.state.is_submitting()
    }

    /// The outcome paragraph for terminal states
    pub fn status(&self) -> Option<StatusMessage> {
        if !self.is_rendered() {
            return None;
        }
        let (polarity, text) = match &self.state {
            SignupState::Succeeded(message) => (Polarity::Success, message),
            SignupState::Failed(message) => (Polarity::Error, message),
            SignupState::Idle | SignupState::Submitting => return None,
        };
        Some(StatusMessage {
            polarity,
            text: text.clone(),
            live: LiveRegion::Assertive,
        })
    }

    pub fn email_input(&self) -> &EmailInput {
        &self.email
    }

    pub fn email_input_mut(&mut self) -> &mut EmailInput {
        &mut self.email
    }

    pub(crate) fn tr(&self, text: &str) -> String {
        self.translate.translate(text)
    }

    /// Start a submission.
    ///
    /// Reads the email field as it is right now and moves to `Submitting`.
    /// Returns `None` when the widget is hidden or a submission is already
    /// in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !self.is_rendered() {
            return None;
        }
        if self.state.is_submitting() {
            debug!(field = %self.name, "Ignoring submit while a signup is in flight");
            return None;
        }

        let request = SubmitRequest::new(
            self.properties.mailchimp_action_url.clone(),
            self.email.value(),
        );
        self.transition(SignupState::Submitting, self.has_signup);
        Some(request)
    }

    /// Apply the outcome of the in-flight submission.
    ///
    /// Transport failures are logged and leave the widget in `Submitting`.
    pub fn resolve(&mut self, outcome: Result<RemoteResponse, SubmitError>) {
        if !self.state.is_submitting() {
            debug!(field = %self.name, "Dropping signup outcome with no submission in flight");
            return;
        }

        match outcome {
            Ok(RemoteResponse::Success { message }) => {
                info!(field = %self.name, "Newsletter signup succeeded");
                self.transition(SignupState::Succeeded(message), true);
            }
            Ok(RemoteResponse::AlreadySubscribed) => {
                info!(field = %self.name, "Address already subscribed");
                let reminder = self.tr(ALREADY_SUBSCRIBED_TEXT);
                self.transition(SignupState::Succeeded(reminder), true);
            }
            Ok(RemoteResponse::Error { message }) => {
                info!(field = %self.name, "Newsletter signup rejected by list service");
                let message = sanitize_error_message(&message);
                self.transition(SignupState::Failed(message), self.has_signup);
            }
            Err(err) => {
                error!(
                    field = %self.name,
                    connection = err.is_connection_failure(),
                    error = %err,
                    "Newsletter signup request failed"
                );
            }
        }
    }

    /// Submit through `submitter` and wait for the outcome
    pub async fn submit(&mut self, submitter: &dyn RemoteSubmitter) {
        if let Some(request) = self.begin_submit() {
            let outcome = submitter.submit(&request).await;
            self.resolve(outcome);
        }
    }

    /// Single entry point for state updates; notifies the host when the
    /// signup flag flips to true
    fn transition(&mut self, next: SignupState, has_signup: bool) {
        let previous = self.has_signup;
        self.state = next;
        self.has_signup = has_signup;

        if !previous && self.has_signup {
            let event = ChangeEvent {
                field: self.name.clone(),
                value: SignupValue {
                    has_signup: self.has_signup,
                },
            };
            if let Some(callback) = self.on_change.as_mut() {
                callback(&event);
            }
        }
    }
}
