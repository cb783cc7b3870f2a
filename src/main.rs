use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use signup_wizard::api::MailchimpSubmitter;
use signup_wizard::app::App;
use signup_wizard::config::Config;
use signup_wizard::i18n::Catalog;
use signup_wizard::logging;
use signup_wizard::signup::{SignupState, WizardStepContext, NEWSLETTER_GROUP};
use signup_wizard::ui::signup::{SignupProps, SignupWidget};

#[derive(Parser)]
#[command(name = "signup-wizard")]
#[command(about = "Onboarding wizard with a newsletter signup step")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Subscribe an address without opening the wizard
    Subscribe {
        /// Address to sign up
        email: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // No subcommand = TUI, which logs to a file instead of the screen
    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Subscribe { email }) => {
            let signed_up = cmd_subscribe(&config, email).await?;
            if !signed_up {
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            cmd_config(&config)?;
        }
        None => {
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    if let Some(log_path) = log_file_path {
        logging::report_log_file(&log_path);
    }

    result
}

/// Run one signup through the same widget the wizard uses.
///
/// Returns whether the address ended up signed up.
async fn cmd_subscribe(config: &Config, email: String) -> Result<bool> {
    let submitter = MailchimpSubmitter::from_config(&config.http)
        .context("Failed to build the Mailchimp client")?;

    let props = SignupProps::new(
        config.newsletter.clone(),
        WizardStepContext::new(NEWSLETTER_GROUP),
    )
    .with_translator(Arc::new(Catalog::from_config(config)));
    let mut widget = SignupWidget::new(props);
    widget.email_input_mut().set_value(&email);

    widget.submit(&submitter).await;

    match widget.state() {
        SignupState::Succeeded(message) => {
            println!("✓ {}", message);
            Ok(true)
        }
        SignupState::Failed(message) => {
            eprintln!("✗ {}", message);
            Ok(false)
        }
        SignupState::Idle | SignupState::Submitting => {
            eprintln!("Signup request did not complete; see the log for details.");
            Ok(false)
        }
    }
}

fn cmd_config(config: &Config) -> Result<()> {
    let rendered = config
        .to_toml()
        .context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
