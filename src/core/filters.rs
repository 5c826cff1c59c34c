use geo::Point;
use serde_json::Value;
use thiserror::Error;

use crate::models::{coordinate_degrees, CustomerRecord};

/// Reasons a record cannot be placed on the map
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a number: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Extract a record's location as a `geo` point (x = longitude, y = latitude)
pub fn customer_location(record: &CustomerRecord) -> Result<Point<f64>, RecordError> {
    let latitude = coerce_degrees("latitude", record.field("latitude"))?;
    let longitude = coerce_degrees("longitude", record.field("longitude"))?;

    Ok(Point::new(longitude, latitude))
}

fn coerce_degrees(
    field: &'static str,
    value: Option<&Value>,
) -> Result<f64, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?;

    coordinate_degrees(value).ok_or_else(|| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Strictly inside the radius; a record exactly on the boundary is excluded
#[inline]
pub fn is_within_distance(distance_km: f64, max_distance_km: f64) -> bool {
    distance_km < max_distance_km
}

/// Structural membership check against the records accepted so far
#[inline]
pub fn is_already_accepted(accepted: &[&CustomerRecord], record: &CustomerRecord) -> bool {
    accepted.iter().any(|existing| *existing == record)
}
