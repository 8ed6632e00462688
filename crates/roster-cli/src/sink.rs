//! Draft sink that writes the finished draft as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roster_wizard::{DraftSink, WizardExit};

/// Writes a completed draft to a JSON file. Declined imports write nothing.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    written: bool,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a draft has been written.
    pub fn written(&self) -> bool {
        self.written
    }
}

impl DraftSink for JsonFileSink {
    fn receive(&mut self, exit: WizardExit) -> Result<()> {
        let draft = match exit {
            WizardExit::Completed(draft) => draft,
            WizardExit::Declined(choice) => {
                tracing::info!(?choice, "Import declined, no draft written");
                return Ok(());
            }
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&draft).context("serialize draft")?;
        fs::write(&self.path, json)
            .with_context(|| format!("write draft {}", self.path.display()))?;
        self.written = true;

        tracing::info!(
            path = %self.path.display(),
            rows = draft.rows.len(),
            mappings = draft.mappings.len(),
            "Wrote import draft"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::{ImportDraft, StartChoice};

    #[test]
    fn test_writes_completed_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("draft.json");
        let mut sink = JsonFileSink::new(&path);

        let draft = ImportDraft {
            headers: vec!["Student".to_string()],
            rows: vec![vec!["Ada".to_string()]],
            ..ImportDraft::default()
        };
        sink.receive(WizardExit::Completed(draft.clone())).unwrap();

        assert!(sink.written());
        let written: ImportDraft =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, draft);
    }

    #[test]
    fn test_declined_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        let mut sink = JsonFileSink::new(&path);

        sink.receive(WizardExit::Declined(StartChoice::Later)).unwrap();

        assert!(!sink.written());
        assert!(!path.exists());
    }
}
