use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use roster_cli::import::{ImportOptions, ImportReport, run_import};
use roster_cli::timeout::TimeoutService;
use roster_ingest::{PathSource, load_table};
use roster_service::HttpMappingService;
use roster_wizard::{ImportConfig, default_config_path};
use tracing::info;

use crate::cli::{ImportArgs, InspectArgs};
use crate::summary::{print_raw_table, print_sources};

/// Loads the config from `--config`, or the default location if it exists.
pub fn load_config(path: Option<&Path>) -> Result<ImportConfig> {
    match path {
        Some(path) => ImportConfig::load(path).context("load config"),
        None => match default_config_path() {
            Some(path) => ImportConfig::load_or_default(&path).context("load config"),
            None => Ok(ImportConfig::default()),
        },
    }
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let table = load_table(&PathSource::new(&args.file))
        .with_context(|| format!("read {}", args.file.display()))?;
    info!(
        columns = table.headers.len(),
        rows = table.row_count(),
        "Loaded CSV export"
    );
    print_raw_table(&table, args.rows);
    Ok(())
}

pub fn run_sources(config: &ImportConfig) {
    print_sources(&config.source_options);
}

pub async fn run_import_command(config: ImportConfig, args: ImportArgs) -> Result<ImportReport> {
    let endpoint = args
        .endpoint
        .or_else(|| config.service.endpoint.clone())
        .ok_or_else(|| {
            anyhow!("no mapping service endpoint, pass --endpoint or set service.endpoint")
        })?;
    let timeout = Duration::from_secs(config.service.timeout_secs);
    let service = HttpMappingService::new(endpoint, args.token).context("create service client")?;
    let service = TimeoutService::new(service, timeout);
    info!(endpoint = %service.inner().endpoint(), "Starting import");

    let options = ImportOptions {
        file: args.file,
        source: args.source,
        overrides: args.overrides,
        output: args.output,
    };
    run_import(config, service, &options).await
}
