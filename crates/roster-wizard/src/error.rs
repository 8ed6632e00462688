//! Driver errors.

use thiserror::Error;

/// Errors from [`crate::Wizard`].
///
/// Everything the user can cause is recorded as a pending error on the
/// state instead; this only covers the host side.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The draft sink rejected the outcome.
    #[error("failed to hand off import outcome: {0:#}")]
    Sink(anyhow::Error),
}
