//! Customer Proximity - selects customers within a great-circle radius
//!
//! This library computes haversine distances from a reference point and runs
//! customer records through a filter, de-duplicate and sort pipeline.

pub mod config;
pub mod core;
pub mod models;
pub mod pipeline;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ProximityFilter, ProximityResult, filter_by_distance, distance::haversine_distance};
pub use models::{CustomerRecord, CustomerShapeError};
pub use pipeline::{run, PipelineError, RunSummary};
