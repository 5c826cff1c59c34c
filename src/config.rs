use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Errors produced while assembling [`Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub reference: ReferenceSettings,
    #[validate(nested)]
    pub filter: FilterSettings,
    pub paths: PathSettings,
}

/// Point customers are measured from
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ReferenceSettings {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct FilterSettings {
    #[validate(range(exclusive_min = 0.0))]
    pub max_distance_km: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

// Dublin office
const DEFAULT_REFERENCE_LATITUDE: f64 = 53.339428;
const DEFAULT_REFERENCE_LONGITUDE: f64 = -6.257664;
const DEFAULT_MAX_DISTANCE_KM: f64 = 100.0;
const DEFAULT_INPUT_PATH: &str = "data/customers.txt";
const DEFAULT_OUTPUT_DIR: &str = "output_files";

impl Default for Settings {
    fn default() -> Self {
        Self {
            reference: ReferenceSettings {
                latitude: DEFAULT_REFERENCE_LATITUDE,
                longitude: DEFAULT_REFERENCE_LONGITUDE,
            },
            filter: FilterSettings {
                max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            },
            paths: PathSettings {
                input: PathBuf::from(DEFAULT_INPUT_PATH),
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            },
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PROXIMITY_)
    pub fn load() -> Result<Self, SettingsError> {
        let builder = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment());

        finish(builder)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let builder = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        finish(builder)
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("reference.latitude", DEFAULT_REFERENCE_LATITUDE)?
        .set_default("reference.longitude", DEFAULT_REFERENCE_LONGITUDE)?
        .set_default("filter.max_distance_km", DEFAULT_MAX_DISTANCE_KM)?
        .set_default("paths.input", DEFAULT_INPUT_PATH)?
        .set_default("paths.output_dir", DEFAULT_OUTPUT_DIR)
}

// e.g., PROXIMITY_FILTER__MAX_DISTANCE_KM -> filter.max_distance_km
fn environment() -> Environment {
    Environment::with_prefix("PROXIMITY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, SettingsError> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
