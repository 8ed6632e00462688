//! Wizard driver: runs the reducer and carries out its effects.

use roster_ingest::{FileSource, load_table};
use roster_model::{ImportDraft, SourceSoftware, StartChoice};
use roster_service::MappingService;

use crate::config::ImportConfig;
use crate::error::WizardError;
use crate::event::{Effect, Transition, WizardEvent};
use crate::sink::DraftSink;
use crate::state::WizardState;
use crate::update::update;

/// One import session bound to a mapping service and a draft sink.
///
/// Each method feeds one event to [`update`]. A mapping request asked for by
/// an upload is awaited before the method returns, so at most one request is
/// ever in flight.
pub struct Wizard<S, K> {
    state: WizardState,
    config: ImportConfig,
    service: S,
    sink: K,
}

impl<S: MappingService, K: DraftSink> Wizard<S, K> {
    /// Starts a wizard on the selection step.
    pub fn new(config: ImportConfig, service: S, sink: K) -> Self {
        Self {
            state: WizardState::new(),
            config,
            service,
            sink,
        }
    }

    /// Starts a wizard from a saved draft.
    pub fn resume(config: ImportConfig, service: S, sink: K, draft: ImportDraft) -> Self {
        Self {
            state: WizardState::resume(draft),
            config,
            service,
            sink,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Applies an event and every follow-up event its effects produce.
    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<(), WizardError> {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            let state = std::mem::take(&mut self.state);
            let Transition { state, effect } = update(state, event, &self.config);
            self.state = state;

            match effect {
                None => {}
                Some(Effect::RequestMapping(request)) => {
                    let result = self.service.suggest(&request).await;
                    next = Some(WizardEvent::MappingResolved(result));
                }
                Some(Effect::Exit(exit)) => {
                    self.sink.receive(exit).map_err(WizardError::Sink)?;
                }
            }
        }
        Ok(())
    }

    pub async fn select_source(&mut self, source: SourceSoftware) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::SelectSource(source)).await
    }

    pub async fn choose(&mut self, choice: StartChoice) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::Choose(choice)).await
    }

    /// Loads a file and, if it is a usable CSV export, asks the mapping
    /// service about it.
    ///
    /// Upload problems and service failures end up as the state's pending
    /// error, not as an `Err`. Outside the Upload step the file is not read.
    pub async fn upload<F: FileSource + ?Sized>(&mut self, file: &F) -> Result<(), WizardError> {
        if !self.state.can_upload() {
            tracing::warn!(
                name = file.name(),
                phase = ?self.state.phase(),
                "Upload not expected now, file left unread"
            );
            return Ok(());
        }
        let loaded = load_table(file);
        self.dispatch(WizardEvent::FileLoaded(loaded)).await
    }

    /// Points a column at a target field, or skips it with `None`.
    pub async fn set_target(
        &mut self,
        csv_header: &str,
        target: Option<&str>,
    ) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::SetTarget {
            csv_header: csv_header.to_string(),
            target: target.map(str::to_string),
        })
        .await
    }

    pub async fn confirm(&mut self) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::Confirm).await
    }

    pub async fn edit_mappings(&mut self) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::EditMappings).await
    }

    /// Continues past the ready step, handing the draft to the sink.
    pub async fn finish(&mut self) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::Continue).await
    }

    pub async fn back(&mut self) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::Back).await
    }

    pub async fn dismiss_error(&mut self) -> Result<(), WizardError> {
        self.dispatch(WizardEvent::DismissError).await
    }
}
