//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod posts;
pub mod users;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use blogapp_core::error::{Alert, ScreenError};

/// Turns a failed screen action into the error `main` prints.
///
/// Only the alert reaches the user; the cause goes to the log.
fn shown(err: ScreenError) -> anyhow::Error {
    tracing::debug!(error = %err.source, "action failed");
    anyhow::anyhow!("{}", err.alert)
}

fn print_success(alert: &Alert) {
    println!("✓ {}", alert.message);
}

/// Reads one line from stdin after printing `label`.
fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Asks a yes/no question; anything but `y` declines.
fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().lock().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
