pub mod email_input;
pub mod indicator;
pub mod layout;
pub mod signup;
pub mod terminal_guard;
pub mod wizard;

pub use signup::SignupWidget;
pub use wizard::WizardScreen;
