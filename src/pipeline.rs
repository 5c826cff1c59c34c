//! Load, filter and write in one pass.

use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::core::ProximityFilter;
use crate::services::{load_customers_from_path, write_outputs, LoadError, OutputPaths, WriteError};

/// Errors that stop a run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file has no content; callers treat this as a clean exit
    #[error("the provided data file is empty")]
    EmptySource,

    #[error(transparent)]
    Load(LoadError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl From<LoadError> for PipelineError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::EmptySource => PipelineError::EmptySource,
            other => PipelineError::Load(other),
        }
    }
}

/// Counters for a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records_loaded: usize,
    pub lines_skipped: usize,
    pub records_skipped: usize,
    pub customers_selected: usize,
    pub outputs: OutputPaths,
}

/// Run the full pipeline described by `settings`
pub fn run(settings: &Settings) -> Result<RunSummary, PipelineError> {
    let input = &settings.paths.input;
    info!("Loading customers from {}", input.display());

    let report = load_customers_from_path(input)?;
    info!("Loaded {} customers ({} malformed lines skipped)", report.customers.len(), report.skipped_lines);

    let filter = ProximityFilter::new(
        settings.reference.latitude,
        settings.reference.longitude,
        settings.filter.max_distance_km,
    );
    let result = filter.find_nearby(&report.customers);
    info!(
        "{} of {} customers within {} km ({} records skipped)",
        result.customers.len(),
        result.total_records,
        filter.max_distance_km(),
        result.skipped_records
    );

    let outputs = write_outputs(&settings.paths.output_dir, &result.customers)?;
    info!("Wrote {} and {}", outputs.text.display(), outputs.csv.display());

    Ok(RunSummary {
        records_loaded: report.customers.len(),
        lines_skipped: report.skipped_lines,
        records_skipped: result.skipped_records,
        customers_selected: result.customers.len(),
        outputs,
    })
}
