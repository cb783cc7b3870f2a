use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::{MailchimpSubmitter, RemoteSubmitter, SubmitError};
use crate::config::Config;
use crate::i18n::{Catalog, Translate};
use crate::signup::RemoteResponse;
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::wizard::{PendingSubmission, WizardAction, WizardScreen};

/// Outcome of a background submission, tagged with the mount that started it
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub mount_id: u64,
    pub outcome: Result<RemoteResponse, SubmitError>,
}

pub struct App {
    config: Config,
    wizard: WizardScreen,
    submitter: Arc<dyn RemoteSubmitter>,
    outcome_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
    /// Submissions spawned but not yet delivered
    in_flight: usize,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let submitter = MailchimpSubmitter::from_config(&config.http)?;
        Ok(Self::with_submitter(config, Arc::new(submitter)))
    }

    /// Build the app around a specific submitter
    pub fn with_submitter(config: Config, submitter: Arc<dyn RemoteSubmitter>) -> Self {
        let catalog = Catalog::from_config(&config);
        if !catalog.is_empty() {
            debug!(entries = catalog.len(), "Loaded string catalog");
        }
        let translate: Arc<dyn Translate> = Arc::new(catalog);
        let wizard = WizardScreen::new(config.newsletter.clone(), translate);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            config,
            wizard,
            submitter,
            outcome_tx,
            outcome_rx,
            in_flight: 0,
            should_quit: false,
        }
    }

    pub fn wizard(&self) -> &WizardScreen {
        &self.wizard
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let mut guard = TerminalGuard::enter()?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        info!("Wizard started");

        while !self.should_quit {
            guard.terminal_mut().draw(|f| self.wizard.render(f))?;

            if event::poll(tick_rate)? {
                self.handle_event(event::read()?);
            }

            self.pump();
        }

        guard.restore()?;
        info!("Wizard finished");
        Ok(())
    }

    /// Apply a terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.wizard.handle_key(key);
                self.dispatch(action);
            }
            Event::Paste(text) => self.wizard.handle_paste(&text),
            _ => {}
        }
    }

    fn dispatch(&mut self, action: WizardAction) {
        match action {
            WizardAction::Continue => {}
            WizardAction::Submit(pending) => self.spawn_submission(pending),
            WizardAction::Quit => self.should_quit = true,
        }
    }

    /// Run a submission on the runtime; the outcome comes back through the channel
    fn spawn_submission(&mut self, pending: PendingSubmission) {
        let submitter = Arc::clone(&self.submitter);
        let tx = self.outcome_tx.clone();
        self.in_flight += 1;
        debug!(mount_id = pending.mount_id, "Spawning signup submission");

        tokio::spawn(async move {
            let outcome = submitter.submit(&pending.request).await;
            let _ = tx.send(SubmissionOutcome {
                mount_id: pending.mount_id,
                outcome,
            });
        });
    }

    /// Deliver finished submissions and pending change events to the wizard
    pub fn pump(&mut self) {
        while let Ok(SubmissionOutcome { mount_id, outcome }) = self.outcome_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.wizard.resolve_submission(mount_id, outcome);
        }
        self.wizard.drain_changes();
    }

    /// Wait until every spawned submission has reported back
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.outcome_rx.recv().await {
                Some(SubmissionOutcome { mount_id, outcome }) => {
                    self.in_flight -= 1;
                    self.wizard.resolve_submission(mount_id, outcome);
                }
                None => break,
            }
        }
        self.wizard.drain_changes();
    }
}
