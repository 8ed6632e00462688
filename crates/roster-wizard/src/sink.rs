//! Where a finished wizard hands its outcome.

use crate::event::WizardExit;

/// Receives the wizard's outcome.
///
/// Called exactly once, when the wizard closes.
pub trait DraftSink {
    fn receive(&mut self, exit: WizardExit) -> anyhow::Result<()>;
}

/// Sink that keeps every outcome in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    exits: Vec<WizardExit>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exits(&self) -> &[WizardExit] {
        &self.exits
    }

    /// The most recent completed draft, if any.
    pub fn last_draft(&self) -> Option<&roster_model::ImportDraft> {
        self.exits.iter().rev().find_map(|exit| match exit {
            WizardExit::Completed(draft) => Some(draft),
            WizardExit::Declined(_) => None,
        })
    }
}

impl DraftSink for MemorySink {
    fn receive(&mut self, exit: WizardExit) -> anyhow::Result<()> {
        self.exits.push(exit);
        Ok(())
    }
}
