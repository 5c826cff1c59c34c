// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod proximity;

pub use distance::{haversine_distance, distance_between};
pub use filters::{customer_location, is_within_distance, is_already_accepted, RecordError};
pub use proximity::{ProximityFilter, ProximityResult, filter_by_distance};
