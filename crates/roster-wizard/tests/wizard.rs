//! End-to-end tests for the wizard driver.

use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use roster_ingest::{FileSource, MemorySource};
use roster_map::ConfidenceLevel;
use roster_model::{
    ColumnMapping, FieldSemantic, ImportDraft, SourceSoftware, StartChoice, Summary, TargetField,
};
use roster_service::{MappingRequest, MappingResponse, MappingService, ServiceError};
use roster_wizard::{
    DraftSink, ErrorKind, ImportConfig, MemorySink, Phase, Wizard, WizardError, WizardExit,
};

const ROSTER_CSV: &str = "\
Student,Guardian Email,Lesson Day
Ada,ada.parent@example.com,Monday
Grace,,Tuesday
Linus,linus.mom@example.com,
";

/// Mapping service answering every request with the same suggestion.
#[derive(Default)]
struct FakeService {
    response: Option<MappingResponse>,
    requests: Mutex<Vec<MappingRequest>>,
}

impl FakeService {
    fn answering(response: MappingResponse) -> Self {
        Self {
            response: Some(response),
            requests: Mutex::default(),
        }
    }

    fn signed_out() -> Self {
        Self::default()
    }
}

impl MappingService for FakeService {
    async fn suggest(&self, request: &MappingRequest) -> Result<MappingResponse, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone().ok_or(ServiceError::NotAuthenticated)
    }
}

struct FailingSink;

impl DraftSink for FailingSink {
    fn receive(&mut self, _exit: WizardExit) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

/// Upload that records how often its content was read.
struct CountingSource {
    inner: MemorySource,
    reads: AtomicUsize,
}

impl FileSource for CountingSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn size(&self) -> io::Result<u64> {
        self.inner.size()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_bytes()
    }
}

fn roster_response() -> MappingResponse {
    MappingResponse {
        mappings: vec![
            ColumnMapping::suggested("Student", "student_name", 0.9),
            ColumnMapping::suggested("Guardian Email", "guardian_email", 0.5),
            ColumnMapping::suggested("Lesson Day", "lesson_day", 0.95),
        ],
        target_fields: vec![
            TargetField::required("student_name").with_semantic(FieldSemantic::Identity),
            TargetField::optional("guardian_email").with_semantic(FieldSemantic::RelatedPerson),
            TargetField::optional("lesson_day").with_semantic(FieldSemantic::ScheduleDay),
        ],
        warnings: vec![],
        has_lesson_data: true,
        detected_source: Some("my_music_staff".to_string()),
    }
}

fn roster_file() -> MemorySource {
    MemorySource::new("students.csv", ROSTER_CSV)
}

fn wizard(service: FakeService) -> Wizard<FakeService, MemorySink> {
    Wizard::new(ImportConfig::default(), service, MemorySink::new())
}

#[tokio::test]
async fn three_row_roster_end_to_end() {
    let mut wizard = wizard(FakeService::answering(roster_response()));

    wizard
        .select_source(SourceSoftware::new("my_music_staff"))
        .await
        .unwrap();
    wizard.choose(StartChoice::Import).await.unwrap();
    assert_eq!(wizard.state().phase(), Phase::Upload);

    wizard.upload(&roster_file()).await.unwrap();
    let state = wizard.state();
    assert_eq!(state.phase(), Phase::Mapping);
    assert!(!state.is_loading());
    assert!(state.session().import_lessons);
    assert_eq!(
        state.session().detected_source.as_deref(),
        Some("my_music_staff")
    );

    let threshold = wizard.config().review_threshold;
    let level = |header: &str| {
        let mapping = wizard.state().reconciler().mapping_for(header).unwrap();
        threshold.categorize(mapping.confidence)
    };
    assert_eq!(level("Student"), ConfidenceLevel::Verified);
    assert_eq!(level("Guardian Email"), ConfidenceLevel::NeedsReview);
    assert_eq!(level("Lesson Day"), ConfidenceLevel::Verified);

    // Unmapping the only required field blocks confirmation.
    wizard.set_target("Student", None).await.unwrap();
    assert!(!wizard.state().can_confirm());
    wizard.confirm().await.unwrap();
    assert_eq!(wizard.state().phase(), Phase::Mapping);

    wizard
        .set_target("Student", Some("student_name"))
        .await
        .unwrap();
    assert_eq!(
        wizard
            .state()
            .reconciler()
            .mapping_for("Student")
            .map(|m| m.confidence),
        Some(1.0)
    );
    wizard.confirm().await.unwrap();
    assert_eq!(wizard.state().phase(), Phase::Ready);

    wizard.finish().await.unwrap();
    assert_eq!(wizard.state().phase(), Phase::Closed);

    let sink = wizard.into_sink();
    let draft = sink.last_draft().unwrap();
    assert_eq!(
        draft.summary,
        Some(Summary {
            entities_count: 3,
            sub_entities_count: 2,
            schedule_entries_count: 2,
        })
    );
    assert_eq!(draft.source_software, SourceSoftware::new("my_music_staff"));
    assert_eq!(draft.choice, Some(StartChoice::Import));
    assert_eq!(draft.rows.len(), 3);
    assert!(draft.import_lessons);
}

#[tokio::test]
async fn upload_sends_samples_and_source_hint() {
    let mut wizard = wizard(FakeService::answering(roster_response()));
    wizard
        .select_source(SourceSoftware::new("teachworks"))
        .await
        .unwrap();
    wizard.choose(StartChoice::Import).await.unwrap();
    wizard.upload(&roster_file()).await.unwrap();

    let requests = wizard_requests(&wizard);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.len(), 3);
    assert_eq!(requests[0].sample_rows.len(), 3);
    assert_eq!(requests[0].source_hint.as_deref(), Some("teachworks"));
}

fn wizard_requests(wizard: &Wizard<FakeService, MemorySink>) -> Vec<MappingRequest> {
    wizard.service().requests.lock().unwrap().clone()
}

#[tokio::test]
async fn non_csv_upload_stays_on_upload() {
    let mut wizard = wizard(FakeService::answering(roster_response()));
    wizard.choose(StartChoice::Import).await.unwrap();
    wizard
        .upload(&MemorySource::new("students.xlsx", ROSTER_CSV))
        .await
        .unwrap();

    let state = wizard.state();
    assert_eq!(state.phase(), Phase::Upload);
    assert_eq!(state.pending_error().map(|e| e.kind), Some(ErrorKind::Input));
    assert!(wizard_requests(&wizard).is_empty());

    wizard.dismiss_error().await.unwrap();
    assert!(wizard.state().pending_error().is_none());
}

#[tokio::test]
async fn signed_out_service_keeps_upload_retryable() {
    let mut wizard = wizard(FakeService::signed_out());
    wizard.choose(StartChoice::Import).await.unwrap();
    wizard.upload(&roster_file()).await.unwrap();

    let state = wizard.state();
    assert_eq!(state.phase(), Phase::Upload);
    assert!(state.can_upload());
    let error = state.pending_error().unwrap();
    assert_eq!(error.kind, ErrorKind::Transport);
    assert!(error.message.contains("sign in again"));
}

#[tokio::test]
async fn duplicate_suggestions_surface_as_warning() {
    let mut response = roster_response();
    response.mappings[2] = ColumnMapping::suggested("Lesson Day", "guardian_email", 0.6);
    let mut wizard = wizard(FakeService::answering(response));
    wizard.choose(StartChoice::Import).await.unwrap();
    wizard.upload(&roster_file()).await.unwrap();

    let warnings = &wizard.state().session().warnings;
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("guardian_email"));
    assert_eq!(
        wizard.state().reconciler().duplicate_targets()[0].columns,
        vec!["Guardian Email", "Lesson Day"]
    );
}

#[tokio::test]
async fn reupload_discards_previous_mappings() {
    let mut wizard = wizard(FakeService::answering(roster_response()));
    wizard.choose(StartChoice::Import).await.unwrap();
    wizard.upload(&roster_file()).await.unwrap();
    wizard.set_target("Guardian Email", None).await.unwrap();

    wizard.back().await.unwrap();
    assert_eq!(wizard.state().phase(), Phase::Upload);
    wizard.upload(&roster_file()).await.unwrap();

    assert_eq!(wizard.state().phase(), Phase::Mapping);
    assert_eq!(
        wizard
            .state()
            .reconciler()
            .mapping_for("Guardian Email")
            .and_then(|m| m.target()),
        Some("guardian_email")
    );
}

#[tokio::test]
async fn edit_after_confirm_then_reconfirm() {
    let mut wizard = wizard(FakeService::answering(roster_response()));
    wizard.choose(StartChoice::Import).await.unwrap();
    wizard.upload(&roster_file()).await.unwrap();
    wizard.confirm().await.unwrap();
    assert_eq!(
        wizard
            .state()
            .snapshot()
            .and_then(|d| d.summary)
            .map(|s| s.sub_entities_count),
        Some(2)
    );

    wizard.edit_mappings().await.unwrap();
    assert!(wizard.state().is_stale());
    wizard.set_target("Guardian Email", None).await.unwrap();
    wizard.confirm().await.unwrap();

    assert!(!wizard.state().is_stale());
    assert_eq!(
        wizard
            .state()
            .snapshot()
            .and_then(|d| d.summary)
            .map(|s| s.sub_entities_count),
        Some(0)
    );
}

#[tokio::test]
async fn declining_import_hands_off_choice() {
    let mut wizard = wizard(FakeService::signed_out());
    wizard.choose(StartChoice::Fresh).await.unwrap();

    assert_eq!(wizard.state().phase(), Phase::Closed);
    let sink = wizard.into_sink();
    assert_eq!(sink.exits(), &[WizardExit::Declined(StartChoice::Fresh)]);
    assert!(sink.last_draft().is_none());
}

#[tokio::test]
async fn resume_confirmed_draft_and_finish() {
    let draft = ImportDraft {
        choice: Some(StartChoice::Import),
        headers: vec!["Student".to_string()],
        rows: vec![vec!["Ada".to_string()]],
        mappings: vec![ColumnMapping::suggested("Student", "student_name", 0.9)],
        target_fields: vec![TargetField::required("student_name")],
        summary: Some(Summary {
            entities_count: 1,
            sub_entities_count: 0,
            schedule_entries_count: 0,
        }),
        ..ImportDraft::default()
    };
    let mut wizard = Wizard::resume(
        ImportConfig::default(),
        FakeService::signed_out(),
        MemorySink::new(),
        draft.clone(),
    );
    assert_eq!(wizard.state().phase(), Phase::Ready);

    wizard.finish().await.unwrap();
    assert_eq!(wizard.into_sink().last_draft(), Some(&draft));
}

#[tokio::test]
async fn sink_failure_is_reported() {
    let mut wizard = Wizard::new(
        ImportConfig::default(),
        FakeService::signed_out(),
        FailingSink,
    );
    let err = wizard.choose(StartChoice::Later).await.unwrap_err();

    assert!(matches!(err, WizardError::Sink(_)));
    assert!(err.to_string().contains("disk full"));
}

#[tokio::test]
async fn upload_before_choosing_import_is_not_read() {
    let mut wizard = wizard(FakeService::answering(roster_response()));
    let file = CountingSource {
        inner: roster_file(),
        reads: AtomicUsize::new(0),
    };
    let before = wizard.state().clone();

    wizard.upload(&file).await.unwrap();

    assert_eq!(file.reads.load(Ordering::SeqCst), 0);
    assert_eq!(wizard.state(), &before);
    assert!(wizard_requests(&wizard).is_empty());

    wizard.choose(StartChoice::Import).await.unwrap();
    wizard.upload(&file).await.unwrap();
    assert_eq!(file.reads.load(Ordering::SeqCst), 1);
    assert_eq!(wizard.state().phase(), Phase::Mapping);
}
