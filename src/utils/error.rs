//! Error display for the CLI.

use hackdeck_core::error::{AuthError, HackdeckError};
use owo_colors::OwoColorize;

/// Print an error with a hint where one helps.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if err.downcast_ref::<AuthError>().is_some() {
        eprintln!("\n{}", "Hint: Check your username and password.".yellow());
        return;
    }

    let Some(err) = err.downcast_ref::<HackdeckError>() else {
        return;
    };

    let hint = match err {
        HackdeckError::NotFound(_) => Some("Hint: Run `hackdeck list` to see available event ids."),
        HackdeckError::Network(_) => Some("Hint: Check your network connection and `api_base_url`."),
        HackdeckError::Fetch { status, .. } if *status >= 500 => {
            Some("Hint: The events API is having trouble. Try again in a moment.")
        }
        HackdeckError::MalformedPayload { .. } => {
            Some("Hint: The events API returned data hackdeck does not understand. Is `api_base_url` correct?")
        }
        HackdeckError::Config(_) => Some("Hint: Check ~/.config/hackdeck/config.toml and HACKDECK_* variables."),
        _ => None,
    };

    if let Some(hint) = hint {
        eprintln!("\n{}", hint.yellow());
    }
}
