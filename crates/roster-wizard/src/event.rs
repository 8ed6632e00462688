//! Wizard events and the effects they request.

use roster_ingest::IngestError;
use roster_model::{ImportDraft, RawTable, SourceSoftware, StartChoice};
use roster_service::{MappingRequest, MappingResponse, ServiceError};

use crate::state::WizardState;

/// Everything that can happen to a wizard.
#[derive(Debug)]
pub enum WizardEvent {
    /// The user picked which tool the export comes from.
    SelectSource(SourceSoftware),
    /// The user made the start-screen decision.
    Choose(StartChoice),
    /// An upload finished loading.
    FileLoaded(Result<RawTable, IngestError>),
    /// The mapping service answered.
    MappingResolved(Result<MappingResponse, ServiceError>),
    /// The user changed one column's target. `None` skips the column.
    SetTarget {
        csv_header: String,
        target: Option<String>,
    },
    Confirm,
    EditMappings,
    Continue,
    Back,
    DismissError,
}

impl WizardEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectSource(_) => "select_source",
            Self::Choose(_) => "choose",
            Self::FileLoaded(_) => "file_loaded",
            Self::MappingResolved(_) => "mapping_resolved",
            Self::SetTarget { .. } => "set_target",
            Self::Confirm => "confirm",
            Self::EditMappings => "edit_mappings",
            Self::Continue => "continue",
            Self::Back => "back",
            Self::DismissError => "dismiss_error",
        }
    }
}

/// How the wizard ended.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardExit {
    /// The user confirmed the mapping and continued.
    Completed(ImportDraft),
    /// The user chose not to import.
    Declined(StartChoice),
}

/// Work the host must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the mapping service and feed the answer back as
    /// [`WizardEvent::MappingResolved`].
    RequestMapping(MappingRequest),
    /// Hand the outcome to the caller.
    Exit(WizardExit),
}

/// Result of applying one event.
#[derive(Debug)]
pub struct Transition {
    pub state: WizardState,
    pub effect: Option<Effect>,
}

impl Transition {
    pub(crate) fn stay(state: WizardState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    pub(crate) fn with_effect(state: WizardState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}
