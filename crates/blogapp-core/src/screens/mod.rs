//! Screen controllers.
//!
//! One async function per user action of each view. Every function takes the
//! shared [`AppContext`](crate::context::AppContext), validates input before
//! touching the network, and reports failure as a
//! [`ScreenError`](crate::error::ScreenError) carrying the alert to show.

pub mod header;
pub mod login;
pub mod posts;
pub mod users;

use crate::error::{Alert, AppError};

/// Outcome of a delete: the acknowledgement plus the refetched list.
///
/// `items` is `None` when the refetch failed; the delete itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refreshed<T> {
    pub alert: Alert,
    pub items: Option<Vec<T>>,
}

/// Fails with `message` unless every field has non-whitespace content.
fn require_filled(fields: &[&str], message: &str) -> Result<(), AppError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::validation(message));
    }
    Ok(())
}

fn parse_age(age: &str) -> Result<u32, AppError> {
    age.trim()
        .parse()
        .map_err(|_| AppError::validation("Age must be a whole number."))
}
