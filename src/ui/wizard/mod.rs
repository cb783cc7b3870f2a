//! Onboarding wizard hosting the newsletter signup step

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{SubmitError, SubmitRequest};
use crate::i18n::Translate;
use crate::signup::{
    ChangeEvent, RemoteResponse, SignupProperties, WizardStepContext, SIGNUP_FIELD,
};
use crate::ui::indicator::SpinnerOverlay;
use crate::ui::signup::{SignupProps, SignupWidget};

pub mod steps;


/// Steps of the onboarding wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Welcome,
    Newsletter,
    Success,
}

impl WizardStep {
    /// Step id exposed to the signup widget as `current_step`
    pub fn id(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "welcome",
            WizardStep::Newsletter => crate::signup::NEWSLETTER_GROUP,
            WizardStep::Success => crate::signup::SUCCESS_STEP,
        }
    }

    /// Whether the step mounts the signup widget
    pub fn shows_signup(&self) -> bool {
        matches!(self, WizardStep::Newsletter | WizardStep::Success)
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Welcome => Some(WizardStep::Newsletter),
            WizardStep::Newsletter => Some(WizardStep::Success),
            WizardStep::Success => None,
        }
    }

    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Welcome => None,
            WizardStep::Newsletter => Some(WizardStep::Welcome),
            WizardStep::Success => Some(WizardStep::Newsletter),
        }
    }

    /// 1-based position for the progress header
    pub fn position(&self) -> usize {
        match self {
            WizardStep::Welcome => 1,
            WizardStep::Newsletter => 2,
            WizardStep::Success => 3,
        }
    }

    pub const COUNT: usize = 3;
}

/// A submission the app loop should run in the background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    /// Mount that started the submission; outcomes for other mounts are dropped
    pub mount_id: u64,
    pub request: SubmitRequest,
}

/// Result of handling a key in the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Nothing for the app to do
    Continue,
    /// Run this submission
    Submit(PendingSubmission),
    /// Leave the wizard
    Quit,
}

/// Wizard screen: owns the step context and the mounted signup widget
pub struct WizardScreen {
    step: WizardStep,
    context: WizardStepContext,
    properties: SignupProperties,
    translate: Arc<dyn Translate>,
    signup: Option<SignupWidget>,
    mount_id: u64,
    change_tx: mpsc::UnboundedSender<ChangeEvent>,
    change_rx: mpsc::UnboundedReceiver<ChangeEvent>,
    indicator: SpinnerOverlay,
}

impl WizardScreen {
    pub fn new(properties: SignupProperties, translate: Arc<dyn Translate>) -> Self {
        let (change_tx, change_rx) = mpsc::unbounded_channel();
        let indicator = SpinnerOverlay::new(translate.translate("Signing you up..."));
        Self {
            step: WizardStep::Welcome,
            context: WizardStepContext::new(WizardStep::Welcome.id()),
            properties,
            translate,
            signup: None,
            mount_id: 0,
            change_tx,
            change_rx,
            indicator,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn context(&self) -> &WizardStepContext {
        &self.context
    }

    /// Currently mounted signup widget
    pub fn signup(&self) -> Option<&SignupWidget> {
        self.signup.as_ref()
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub(crate) fn tr(&self, text: &str) -> String {
        self.translate.translate(text)
    }

    /// Move to `step`, unmounting and remounting the signup widget as needed
    pub fn go_to(&mut self, step: WizardStep) {
        // Record anything the outgoing widget reported before it goes away
        self.drain_changes();

        self.step = step;
        self.context.current_step = step.id().to_string();
        self.signup = None;

        if step.shows_signup() {
            self.mount_signup();
        }
        debug!(step = step.id(), mount_id = self.mount_id, "Wizard step entered");
    }

    fn mount_signup(&mut self) {
        self.mount_id += 1;
        let tx = self.change_tx.clone();
        let props = SignupProps::new(self.properties.clone(), self.context.clone())
            .with_value(self.context.recorded_signup())
            .with_translator(self.translate.clone())
            .on_change(Box::new(move |event: &ChangeEvent| {
                let _ = tx.send(event.clone());
            }));
        self.signup = Some(SignupWidget::new(props));
    }

    /// Record change events reported by the signup widget and hand the
    /// updated context back to the mounted widget
    pub fn drain_changes(&mut self) {
        let mut recorded = false;
        while let Ok(event) = self.change_rx.try_recv() {
            if event.field == SIGNUP_FIELD {
                debug!(has_signup = event.value.has_signup, "Recording newsletter signup");
                self.context.record_signup(event.value);
                recorded = true;
            } else {
                debug!(field = %event.field, "Ignoring change for unknown field");
            }
        }

        if recorded {
            if let Some(widget) = self.signup.as_mut() {
                widget.set_step_state(self.context.clone());
            }
        }
    }

    /// Deliver a background submission outcome
    pub fn resolve_submission(
        &mut self,
        mount_id: u64,
        outcome: Result<RemoteResponse, SubmitError>,
    ) {
        match self.signup.as_mut() {
            Some(widget) if mount_id == self.mount_id => {
                widget.resolve(outcome);
                self.drain_changes();
            }
            _ => {
                debug!(
                    mount_id,
                    current = self.mount_id,
                    "Discarding outcome for an unmounted signup"
                );
            }
        }
    }

    fn submit(&mut self) -> WizardAction {
        let mount_id = self.mount_id;
        match self.signup.as_mut().and_then(SignupWidget::begin_submit) {
            Some(request) => WizardAction::Submit(PendingSubmission { mount_id, request }),
            None => WizardAction::Continue,
        }
    }

    /// Advance to the next step, or finish on the last one
    pub fn advance(&mut self) -> WizardAction {
        match self.step.next() {
            Some(next) => {
                self.go_to(next);
                WizardAction::Continue
            }
            None => WizardAction::Quit,
        }
    }

    /// Go back a step, or quit from the first one
    pub fn go_back(&mut self) -> WizardAction {
        match self.step.prev() {
            Some(prev) => {
                self.go_to(prev);
                WizardAction::Continue
            }
            None => WizardAction::Quit,
        }
    }

    fn signup_visible(&self) -> bool {
        self.signup
            .as_ref()
            .is_some_and(SignupWidget::is_rendered)
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> WizardAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return WizardAction::Quit;
        }

        match key.code {
            KeyCode::Esc => return self.go_back(),
            KeyCode::Tab => return self.advance(),
            _ => {}
        }

        match self.step {
            WizardStep::Welcome => match key.code {
                KeyCode::Enter => self.advance(),
                KeyCode::Char('q') => WizardAction::Quit,
                _ => WizardAction::Continue,
            },
            WizardStep::Newsletter | WizardStep::Success => {
                if !self.signup_visible() {
                    return match key.code {
                        KeyCode::Enter | KeyCode::Char('q') => WizardAction::Quit,
                        _ => WizardAction::Continue,
                    };
                }
                if key.code == KeyCode::Enter {
                    return self.submit();
                }
                if let Some(widget) = self.signup.as_mut() {
                    if !widget.state().is_submitting() {
                        widget.email_input_mut().handle_key(key);
                    }
                }
                WizardAction::Continue
            }
        }
    }

    /// Handle a bracketed paste into the email field
    pub fn handle_paste(&mut self, text: &str) {
        if !self.signup_visible() {
            return;
        }
        if let Some(widget) = self.signup.as_mut() {
            if !widget.state().is_submitting() {
                widget.email_input_mut().paste(text);
            }
        }
    }

    /// Render the current step
    pub fn render(&mut self, frame: &mut Frame) {
        match self.step {
            WizardStep::Welcome => self.render_welcome_step(frame),
            WizardStep::Newsletter => self.render_newsletter_step(frame),
            WizardStep::Success => self.render_success_step(frame),
        }
    }
}
