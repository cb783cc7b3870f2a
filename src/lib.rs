//! Signup Wizard - onboarding wizard with a Mailchimp newsletter signup step
//!
//! The binary in `main.rs` drives these modules; integration tests use
//! them directly.

pub mod api;
pub mod app;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod signup;
pub mod ui;
