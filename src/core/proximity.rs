use geo::Point;
use tracing::{debug, warn};

use crate::core::{
    distance::distance_between,
    filters::{customer_location, is_already_accepted, is_within_distance},
};
use crate::models::CustomerRecord;

/// Result of a proximity pass
#[derive(Debug)]
pub struct ProximityResult<'a> {
    /// Accepted records, ascending by `user_id`, borrowed from the input
    pub customers: Vec<&'a CustomerRecord>,
    pub total_records: usize,
    /// Records dropped because their coordinates were missing or unreadable
    pub skipped_records: usize,
}

/// Selects customers within a radius of a reference point
///
/// # Pipeline Stages
/// 1. Coordinate extraction (malformed records are skipped)
/// 2. Great-circle distance check against the radius
/// 3. Structural de-duplication
/// 4. Stable sort by `user_id`
#[derive(Debug, Clone, Copy)]
pub struct ProximityFilter {
    reference: Point<f64>,
    max_distance_km: f64,
}

impl ProximityFilter {
    pub fn new(reference_lat: f64, reference_lng: f64, max_distance_km: f64) -> Self {
        Self {
            reference: Point::new(reference_lng, reference_lat),
            max_distance_km,
        }
    }

    pub fn reference(&self) -> Point<f64> {
        self.reference
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Run every record through the pipeline
    ///
    /// Never fails: records that cannot be located are logged and counted in
    /// `skipped_records`, and processing carries on with the rest.
    pub fn find_nearby<'a>(&self, records: &'a [CustomerRecord]) -> ProximityResult<'a> {
        let mut customers: Vec<&CustomerRecord> = Vec::new();
        let mut skipped_records = 0;

        for record in records {
            let location = match customer_location(record) {
                Ok(location) => location,
                Err(e) => {
                    warn!("Skipping customer {}: {}", record.user_id(), e);
                    skipped_records += 1;
                    continue;
                }
            };

            let distance_km = distance_between(self.reference, location);

            if !is_within_distance(distance_km, self.max_distance_km) {
                debug!("Customer {} is {} km away, outside radius", record.user_id(), distance_km);
                continue;
            }

            if is_already_accepted(&customers, record) {
                debug!("Customer {} already accepted, dropping duplicate", record.user_id());
                continue;
            }

            customers.push(record);
        }

        // sort_by_key is stable
        customers.sort_by_key(|customer| customer.user_id());

        ProximityResult {
            customers,
            total_records: records.len(),
            skipped_records,
        }
    }
}

/// Filter `records` down to those strictly within `max_distance_km` of the
/// reference coordinate, de-duplicated and sorted by `user_id`
pub fn filter_by_distance(
    reference_lat: f64,
    reference_lng: f64,
    records: &[CustomerRecord],
    max_distance_km: f64,
) -> Vec<&CustomerRecord> {
    ProximityFilter::new(reference_lat, reference_lng, max_distance_km)
        .find_nearby(records)
        .customers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OFFICE: (f64, f64) = (53.339428, -6.257664);
    const ENNISKERRY: (f64, f64) = (53.192807, -6.170260);

    fn user_ids(customers: &[&CustomerRecord]) -> Vec<i64> {
        customers.iter().map(|c| c.user_id()).collect()
    }

    #[test]
    fn test_nearby_customer_included() {
        let records = vec![CustomerRecord::new(4, "Ian Kehoe", "53.2451022", "-6.238335")];
        let result = filter_by_distance(OFFICE.0, OFFICE.1, &records, 100.0);

        assert_eq!(result, vec![&records[0]]);
    }

    #[test]
    fn test_far_customer_excluded() {
        let records = vec![
            CustomerRecord::new(1, "London", "51.5074", "-0.1278"),
            CustomerRecord::new(5, "Nora Dempsey", "53.1302756", "-6.2397222"),
        ];
        let result = filter_by_distance(OFFICE.0, OFFICE.1, &records, 100.0);

        assert_eq!(user_ids(&result), vec![5]);
    }

    #[test]
    fn test_duplicates_collapsed() {
        let records = vec![
            CustomerRecord::new(8, "Eoin Ahearn", "54.0894797", "-6.18671"),
            CustomerRecord::new(8, "Eoin Ahearn", "54.0894797", "-6.18671"),
        ];
        let result = filter_by_distance(ENNISKERRY.0, ENNISKERRY.1, &records, 100.0);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0], &records[0]);
    }

    #[test]
    fn test_same_id_different_fields_both_kept_in_input_order() {
        let records = vec![
            CustomerRecord::new(8, "Eoin Ahearn", "54.0894797", "-6.18671"),
            CustomerRecord::new(3, "Jack Enright", "52.986375", "-6.043701"),
            CustomerRecord::new(8, "Eoin A.", "54.0894797", "-6.18671"),
        ];
        let result = filter_by_distance(ENNISKERRY.0, ENNISKERRY.1, &records, 100.0);

        assert_eq!(user_ids(&result), vec![3, 8, 8]);
        assert_eq!(result[1].display_name(), "Eoin Ahearn");
        assert_eq!(result[2].display_name(), "Eoin A.");
    }

    #[test]
    fn test_sorted_by_user_id() {
        let records = vec![
            CustomerRecord::new(29, "Oliver Ahearn", "53.74452", "-7.11167"),
            CustomerRecord::new(11, "Richard Finnegan", "53.008769", "-6.1056711"),
            CustomerRecord::new(4, "Ian Kehoe", "53.2451022", "-6.238335"),
            CustomerRecord::new(5, "Nora Dempsey", "53.1302756", "-6.2397222"),
        ];
        let result = filter_by_distance(OFFICE.0, OFFICE.1, &records, 100.0);

        assert_eq!(user_ids(&result), vec![4, 5, 11, 29]);
    }

    #[test]
    fn test_malformed_records_skipped_and_counted() {
        let missing_latitude: CustomerRecord =
            serde_json::from_value(json!({"user_id": 2, "name": "No Latitude", "longitude": "-6.0"})).unwrap();

        let records = vec![
            missing_latitude,
            CustomerRecord::new(3, "Bad Longitude", "53.0", "minus six"),
            CustomerRecord::new(4, "Ian Kehoe", "53.2451022", "-6.238335"),
        ];
        let result = ProximityFilter::new(OFFICE.0, OFFICE.1, 100.0).find_nearby(&records);

        assert_eq!(user_ids(&result.customers), vec![4]);
        assert_eq!(result.total_records, 3);
        assert_eq!(result.skipped_records, 2);
    }

    #[test]
    fn test_non_string_name_still_selected() {
        let numbered: CustomerRecord =
            serde_json::from_value(json!({"user_id": 3, "latitude": 53.3, "longitude": -6.2, "name": 7})).unwrap();
        let records = vec![CustomerRecord::new(5, "Nora Dempsey", "53.1302756", "-6.2397222"), numbered];

        let result = filter_by_distance(OFFICE.0, OFFICE.1, &records, 100.0);

        assert_eq!(user_ids(&result), vec![3, 5]);
        assert_eq!(result[0].display_name(), "7");
    }

    #[test]
    fn test_empty_input() {
        let result = ProximityFilter::new(OFFICE.0, OFFICE.1, 100.0).find_nearby(&[]);

        assert!(result.customers.is_empty());
        assert_eq!(result.total_records, 0);
        assert_eq!(result.skipped_records, 0);
    }

    #[test]
    fn test_zero_radius_accepts_nothing() {
        let records = vec![CustomerRecord::new(1, "At The Office", "53.339428", "-6.257664")];
        let result = filter_by_distance(OFFICE.0, OFFICE.1, &records, 0.0);

        assert!(result.is_empty());
    }
}
