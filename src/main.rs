use customer_proximity::config::Settings;
use customer_proximity::pipeline::{self, PipelineError};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Selecting customers within {} km of ({}, {})",
        settings.filter.max_distance_km, settings.reference.latitude, settings.reference.longitude
    );

    match pipeline::run(&settings) {
        Ok(summary) => {
            println!(
                "{} customers within {} km written to {} and {}",
                summary.customers_selected,
                settings.filter.max_distance_km,
                summary.outputs.text.display(),
                summary.outputs.csv.display()
            );
            ExitCode::SUCCESS
        }
        Err(PipelineError::EmptySource) => {
            println!("The provided data file is empty, program will now exit.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
