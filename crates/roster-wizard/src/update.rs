//! The wizard reducer.

use roster_map::{DuplicateTarget, MappingReconciler};
use roster_model::{RawTable, SourceSoftware, StartChoice};
use roster_service::{MappingRequest, MappingResponse};

use crate::config::ImportConfig;
use crate::event::{Effect, Transition, WizardEvent, WizardExit};
use crate::state::{ErrorKind, PendingError, Phase, Session, WizardState};

const BUSY_MESSAGE: &str = "Still analyzing the previous file. Please wait.";

/// Applies one event to the wizard state.
///
/// Events that make no sense in the current phase leave the state as it
/// was and are logged at `warn`.
pub fn update(mut state: WizardState, event: WizardEvent, config: &ImportConfig) -> Transition {
    let from = state.phase;
    let name = event.name();

    let transition = match (state.phase, event) {
        (Phase::Closed, _) => ignored(state, name),

        (_, WizardEvent::DismissError) => {
            state.pending_error = None;
            Transition::stay(state)
        }

        (Phase::Upload, WizardEvent::SelectSource(_) | WizardEvent::Back) if state.loading => {
            tracing::warn!(event = name, "Refused while a mapping request is in flight");
            state.pending_error = Some(PendingError::new(ErrorKind::Busy, BUSY_MESSAGE));
            Transition::stay(state)
        }

        (Phase::Selection | Phase::Upload, WizardEvent::SelectSource(source)) => {
            select_source(state, source, config)
        }

        (Phase::Selection, WizardEvent::Choose(choice)) => choose(state, choice),

        (Phase::Upload, WizardEvent::FileLoaded(result)) => {
            if state.loading {
                tracing::warn!("Upload refused while a mapping request is in flight");
                state.pending_error = Some(PendingError::new(ErrorKind::Busy, BUSY_MESSAGE));
                return Transition::stay(state);
            }
            match result {
                Ok(table) => file_loaded(state, table, config),
                Err(e) => {
                    tracing::warn!(error = %e, "Upload rejected");
                    state.pending_error =
                        Some(PendingError::new(ErrorKind::Input, e.user_message()));
                    Transition::stay(state)
                }
            }
        }

        (Phase::Upload, WizardEvent::MappingResolved(result)) if state.loading => {
            state.loading = false;
            match result {
                Ok(response) => mapping_resolved(state, response),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        retryable = e.is_retryable(),
                        "Mapping request failed"
                    );
                    state.pending_error =
                        Some(PendingError::new(ErrorKind::Transport, e.user_message()));
                    Transition::stay(state)
                }
            }
        }

        (Phase::Mapping, WizardEvent::SetTarget { csv_header, target }) => {
            match state
                .session
                .reconciler
                .set_target(&csv_header, target.as_deref())
            {
                Ok(()) => {
                    tracing::debug!(column = %csv_header, target = ?target, "Mapping edited");
                    state.pending_error = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Mapping edit refused");
                    state.pending_error =
                        Some(PendingError::new(ErrorKind::Invariant, e.to_string()));
                }
            }
            Transition::stay(state)
        }

        (Phase::Mapping, WizardEvent::Confirm) => {
            if !state.session.reconciler.is_complete() {
                tracing::debug!(
                    missing = state.session.reconciler.missing_required().len(),
                    "Confirm refused, required fields unmapped"
                );
                return Transition::stay(state);
            }
            state.snapshot = Some(state.session.to_draft());
            state.pending_error = None;
            state.phase = Phase::Ready;
            Transition::stay(state)
        }

        (Phase::Ready, WizardEvent::EditMappings | WizardEvent::Back) => {
            state.phase = Phase::Mapping;
            Transition::stay(state)
        }

        (Phase::Ready, WizardEvent::Continue) => {
            let draft = state
                .snapshot
                .take()
                .unwrap_or_else(|| state.session.to_draft());
            state.phase = Phase::Closed;
            Transition::with_effect(state, Effect::Exit(WizardExit::Completed(draft)))
        }

        (Phase::Upload, WizardEvent::Back) => {
            state.pending_error = None;
            state.phase = Phase::Selection;
            Transition::stay(state)
        }

        (Phase::Mapping, WizardEvent::Back) => {
            state.pending_error = None;
            state.phase = Phase::Upload;
            Transition::stay(state)
        }

        (_, _) => ignored(state, name),
    };

    if transition.state.phase != from {
        tracing::info!(from = ?from, to = ?transition.state.phase, "Wizard phase changed");
    }
    transition
}

fn ignored(state: WizardState, event: &'static str) -> Transition {
    tracing::warn!(phase = ?state.phase, event, "Ignoring event not valid in this phase");
    Transition::stay(state)
}

fn select_source(
    mut state: WizardState,
    source: SourceSoftware,
    config: &ImportConfig,
) -> Transition {
    if config.source_option(source.as_str()).is_none() {
        tracing::warn!(source = %source, "Unknown source software");
        state.pending_error = Some(PendingError::new(
            ErrorKind::Input,
            format!("Unknown source software: {source}"),
        ));
        return Transition::stay(state);
    }
    tracing::debug!(source = %source, "Source software selected");
    state.session.source_software = source;
    Transition::stay(state)
}

fn choose(mut state: WizardState, choice: StartChoice) -> Transition {
    if choice.declines_import() {
        let source_software = state.session.source_software.clone();
        state.session = Session {
            source_software,
            choice: Some(choice),
            ..Session::default()
        };
        state.snapshot = None;
        state.pending_error = None;
        state.phase = Phase::Closed;
        return Transition::with_effect(state, Effect::Exit(WizardExit::Declined(choice)));
    }

    state.session.choice = Some(choice);
    state.pending_error = None;
    state.phase = Phase::Upload;
    Transition::stay(state)
}

fn file_loaded(mut state: WizardState, table: RawTable, config: &ImportConfig) -> Transition {
    tracing::debug!(
        columns = table.headers.len(),
        rows = table.row_count(),
        "Upload accepted, requesting mapping"
    );
    let request =
        MappingRequest::from_table(&table, config.sample_rows, &state.session.source_software);

    state.session.clear_upload();
    state.session.table = table;
    state.snapshot = None;
    state.pending_error = None;
    state.loading = true;
    Transition::with_effect(state, Effect::RequestMapping(request))
}

fn mapping_resolved(mut state: WizardState, response: MappingResponse) -> Transition {
    let MappingResponse {
        mappings,
        target_fields,
        mut warnings,
        has_lesson_data,
        detected_source,
    } = response;

    let reconciler = MappingReconciler::seed(&state.session.table.headers, mappings, target_fields);
    warnings.extend(
        reconciler
            .duplicate_targets()
            .iter()
            .map(DuplicateTarget::warning),
    );

    let session = &mut state.session;
    session.reconciler = reconciler;
    session.warnings = warnings;
    session.detected_source = detected_source;
    session.import_lessons = has_lesson_data;

    state.pending_error = None;
    state.phase = Phase::Mapping;
    Transition::stay(state)
}
