// Model exports
pub mod domain;

pub use domain::{coordinate_degrees, CustomerRecord, CustomerShapeError};
