use crate::dataset::VehicleRecord;

use super::criteria::FilterCriteria;

/// Returns the records passing every active predicate, in dataset order.
///
/// A record passes when:
/// * price and mileage are present and inside their ranges
/// * the fuel type contains `fuel_type` (if given)
/// * the vehicle type contains ANY of `vehicle_types` (if non-empty)
/// * the brand contains ANY of `brands` (if non-empty)
///
/// All substring checks are case-insensitive. An empty result is not an error.
pub fn filter_records<'a>(
    records: &'a [VehicleRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a VehicleRecord> {
    let predicate = Predicate::from_criteria(criteria);
    records.iter().filter(|r| predicate.matches(r)).collect()
}

/// Criteria with the match needles lowercased once per query.
struct Predicate<'c> {
    criteria: &'c FilterCriteria,
    fuel: Option<String>,
    types: Vec<String>,
    brands: Vec<String>,
}

impl<'c> Predicate<'c> {
    fn from_criteria(criteria: &'c FilterCriteria) -> Self {
        let lower = |values: &[String]| -> Vec<String> {
            values.iter().map(|v| v.to_lowercase()).collect()
        };
        Predicate {
            criteria,
            fuel: criteria.fuel_type.as_deref().map(str::to_lowercase),
            types: lower(&criteria.vehicle_types),
            brands: lower(&criteria.brands),
        }
    }

    fn matches(&self, record: &VehicleRecord) -> bool {
        let in_price = record
            .price
            .map(|p| self.criteria.price.contains(p))
            .unwrap_or(false);
        let in_mileage = record
            .mileage
            .map(|m| self.criteria.mileage.contains(m))
            .unwrap_or(false);
        if !in_price || !in_mileage {
            return false;
        }

        if let Some(fuel) = &self.fuel {
            if !record.fuel.to_lowercase().contains(fuel.as_str()) {
                return false;
            }
        }
        contains_any(&record.vehicle_type, &self.types) && contains_any(&record.make, &self.brands)
    }
}

/// True when `needles` is empty or any needle is a substring of `haystack`.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if needles.is_empty() {
        return true;
    }
    let haystack = haystack.to_lowercase();
    needles.iter().any(|n| haystack.contains(n.as_str()))
}
