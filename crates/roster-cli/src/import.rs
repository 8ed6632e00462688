//! Non-interactive import: drives the wizard from command-line choices.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, bail};
use roster_ingest::PathSource;
use roster_map::{ConfidenceLevel, MappingProgress};
use roster_model::{SourceSoftware, StartChoice, Summary};
use roster_service::MappingService;
use roster_wizard::{ImportConfig, Phase, Wizard};

use crate::logging::redact_value;
use crate::sink::JsonFileSink;

/// Marker that skips a column in a mapping override.
const SKIP_TARGET: &str = "-";

/// A `HEADER=TARGET` (or `HEADER=-`) override from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOverride {
    pub csv_header: String,
    /// `None` skips the column.
    pub target: Option<String>,
}

impl FromStr for MappingOverride {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((header, target)) = s.rsplit_once('=') else {
            return Err(format!("expected HEADER=TARGET or HEADER=-, got '{s}'"));
        };
        let header = header.trim();
        let target = target.trim();
        if header.is_empty() {
            return Err(format!("missing column header in '{s}'"));
        }
        if target.is_empty() {
            return Err(format!("missing target field in '{s}', use '-' to skip"));
        }
        Ok(Self {
            csv_header: header.to_string(),
            target: (target != SKIP_TARGET).then(|| target.to_string()),
        })
    }
}

/// What to import and where the draft goes.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub file: PathBuf,
    pub source: Option<String>,
    pub overrides: Vec<MappingOverride>,
    pub output: PathBuf,
}

/// One line of the mapping review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub csv_header: String,
    pub target: Option<String>,
    pub required: bool,
    pub confidence: f32,
    pub level: ConfidenceLevel,
    /// First non-blank value in the column.
    pub example: Option<String>,
}

/// Outcome of an import run.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub rows: Vec<ReviewRow>,
    pub warnings: Vec<String>,
    pub detected_source: Option<String>,
    pub progress: MappingProgress,
    /// Required target fields no column maps to. Non-empty means no draft.
    pub missing_required: Vec<String>,
    pub summary: Option<Summary>,
    /// Where the draft was written, if the mapping was complete.
    pub draft_path: Option<PathBuf>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Runs the wizard end to end against `service`.
///
/// Upload, service and override problems are returned as errors carrying the
/// wizard's user-facing message. An incomplete mapping is not an error; the
/// report lists the missing fields and no draft is written.
pub async fn run_import<S: MappingService>(
    config: ImportConfig,
    service: S,
    options: &ImportOptions,
) -> Result<ImportReport> {
    let threshold = config.review_threshold;
    let mut wizard = Wizard::new(config, service, JsonFileSink::new(&options.output));

    if let Some(source) = &options.source {
        wizard
            .select_source(SourceSoftware::new(source.as_str()))
            .await?;
        fail_on_pending(&wizard)?;
    }

    wizard.choose(StartChoice::Import).await?;
    wizard.upload(&PathSource::new(&options.file)).await?;
    fail_on_pending(&wizard)?;
    let phase = wizard.state().phase();
    if phase != Phase::Mapping {
        bail!("import stopped at the {} step", phase.label());
    }

    for entry in &options.overrides {
        tracing::debug!(column = %entry.csv_header, target = ?entry.target, "Applying override");
        wizard
            .set_target(&entry.csv_header, entry.target.as_deref())
            .await?;
        fail_on_pending(&wizard)?;
    }

    let state = wizard.state();
    let reconciler = state.reconciler();
    let table = &state.session().table;
    let rows = reconciler
        .mappings()
        .iter()
        .map(|mapping| {
            let example = table.column_index(&mapping.csv_header).and_then(|column| {
                table
                    .column_values(column)
                    .find(|value| !value.trim().is_empty())
                    .map(str::to_string)
            });
            if let Some(value) = &example {
                tracing::trace!(column = %mapping.csv_header, example = redact_value(value));
            }
            ReviewRow {
                csv_header: mapping.csv_header.clone(),
                target: mapping.target_field.clone(),
                required: mapping
                    .target()
                    .and_then(|name| reconciler.target_field(name))
                    .is_some_and(|field| field.required),
                confidence: mapping.confidence,
                level: threshold.categorize(mapping.confidence),
                example,
            }
        })
        .collect();

    let mut report = ImportReport {
        rows,
        warnings: state.session().warnings.clone(),
        detected_source: state.session().detected_source.clone(),
        progress: reconciler.progress(threshold),
        missing_required: reconciler
            .missing_required()
            .iter()
            .map(|field| field.name.clone())
            .collect(),
        summary: state.summary(),
        draft_path: None,
    };

    if !state.can_confirm() {
        tracing::warn!(missing = ?report.missing_required, "Mapping incomplete, no draft written");
        return Ok(report);
    }

    wizard.confirm().await?;
    wizard.finish().await?;
    if wizard.sink().written() {
        report.draft_path = Some(wizard.sink().path().to_path_buf());
    }
    Ok(report)
}

fn fail_on_pending<S: MappingService>(wizard: &Wizard<S, JsonFileSink>) -> Result<()> {
    if let Some(error) = wizard.state().pending_error() {
        bail!("{}", error.message);
    }
    Ok(())
}
