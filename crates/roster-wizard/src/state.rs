//! Wizard state.
//!
//! A single [`WizardState`] value holds everything the wizard knows. It is
//! only ever replaced by [`crate::update`].

use roster_map::{MappingReconciler, project_summary};
use roster_model::{ImportDraft, RawTable, SourceSoftware, StartChoice, Summary};

/// Wizard step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Import, start fresh, or decide later.
    #[default]
    Selection,
    /// Waiting for a CSV export.
    Upload,
    /// Reviewing the suggested column mapping.
    Mapping,
    /// Confirmed; the draft can be handed off.
    Ready,
    /// The wizard has exited. No further events are accepted.
    Closed,
}

impl Phase {
    /// Step label for progress displays.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Selection => "Get started",
            Self::Upload => "Upload",
            Self::Mapping => "Review columns",
            Self::Ready => "Ready",
            Self::Closed => "Done",
        }
    }
}

/// Category of a pending error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The upload was not a usable CSV file.
    Input,
    /// The mapping service could not be reached or refused the request.
    Transport,
    /// A mapping edit would break a mapping rule.
    Invariant,
    /// An upload was attempted while one is still being analyzed.
    Busy,
}

/// Error waiting to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingError {
    pub kind: ErrorKind,
    pub message: String,
}

impl PendingError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Working data for one import session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub source_software: SourceSoftware,
    pub choice: Option<StartChoice>,
    /// The uploaded table, replaced wholesale on every upload.
    pub table: RawTable,
    pub reconciler: MappingReconciler,
    pub warnings: Vec<String>,
    pub detected_source: Option<String>,
    pub import_lessons: bool,
}

impl Session {
    /// Rebuilds a session from a saved draft.
    pub fn from_draft(draft: &ImportDraft) -> Self {
        Self {
            source_software: draft.source_software.clone(),
            choice: draft.choice,
            table: draft.table(),
            reconciler: MappingReconciler::new(
                draft.mappings.clone(),
                draft.target_fields.clone(),
            ),
            warnings: draft.warnings.clone(),
            detected_source: draft.detected_source.clone(),
            import_lessons: draft.import_lessons,
        }
    }

    /// Summary projected from the current mappings.
    pub fn summary(&self) -> Option<Summary> {
        project_summary(
            self.reconciler.mappings(),
            &self.table,
            self.reconciler.target_fields(),
        )
    }

    /// Snapshots the session as a draft, with a freshly projected summary.
    pub fn to_draft(&self) -> ImportDraft {
        ImportDraft {
            source_software: self.source_software.clone(),
            choice: self.choice,
            headers: self.table.headers.clone(),
            rows: self.table.rows.clone(),
            mappings: self.reconciler.mappings().to_vec(),
            target_fields: self.reconciler.target_fields().to_vec(),
            warnings: self.warnings.clone(),
            detected_source: self.detected_source.clone(),
            import_lessons: self.import_lessons,
            summary: self.summary(),
        }
    }

    /// Drops the table and everything derived from it.
    pub(crate) fn clear_upload(&mut self) {
        self.table = RawTable::default();
        self.reconciler = MappingReconciler::default();
        self.warnings.clear();
        self.detected_source = None;
        self.import_lessons = false;
    }
}

/// Complete wizard state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub(crate) phase: Phase,
    pub(crate) session: Session,
    /// Draft taken at the last confirm.
    pub(crate) snapshot: Option<ImportDraft>,
    pub(crate) pending_error: Option<PendingError>,
    /// A mapping request is in flight.
    pub(crate) loading: bool,
}

impl WizardState {
    /// Creates a fresh wizard on the selection step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a wizard from a saved draft.
    ///
    /// The starting phase is the furthest one the draft supports: a draft
    /// with a summary was confirmed, one with mappings was being reviewed,
    /// and one that chose to import was waiting for a file.
    pub fn resume(draft: ImportDraft) -> Self {
        let session = Session::from_draft(&draft);
        let (phase, snapshot) = if draft.summary.is_some() {
            (Phase::Ready, Some(draft))
        } else if !draft.mappings.is_empty() {
            (Phase::Mapping, None)
        } else if draft.choice == Some(StartChoice::Import) {
            (Phase::Upload, None)
        } else {
            (Phase::Selection, None)
        };

        tracing::info!(phase = ?phase, "Resumed wizard from draft");
        Self {
            phase,
            session,
            snapshot,
            pending_error: None,
            loading: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn reconciler(&self) -> &MappingReconciler {
        &self.session.reconciler
    }

    /// The draft taken at the last confirm, if any.
    pub fn snapshot(&self) -> Option<&ImportDraft> {
        self.snapshot.as_ref()
    }

    pub fn pending_error(&self) -> Option<&PendingError> {
        self.pending_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the snapshot predates the mappings now being edited.
    pub fn is_stale(&self) -> bool {
        self.phase == Phase::Mapping && self.snapshot.is_some()
    }

    /// Summary projected from the current mappings.
    pub fn summary(&self) -> Option<Summary> {
        self.session.summary()
    }

    /// Whether a confirm would be accepted.
    pub fn can_confirm(&self) -> bool {
        self.phase == Phase::Mapping && self.session.reconciler.is_complete()
    }

    /// Whether an upload would be accepted.
    pub fn can_upload(&self) -> bool {
        self.phase == Phase::Upload && !self.loading
    }
}
