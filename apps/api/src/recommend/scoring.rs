//! Purpose scoring — weighted linear suitability per declared purpose.
//!
//! Urban:   0.5·mileage + 0.3·(1/price) + 0.2·(1/displacement)
//! Touring: 0.4·mileage + 0.3·(1/price) + 0.2·fuel_code + 0.1·displacement
//! Racing:  0.4·cylinders + 0.3·body_code + 0.2·price + 0.1·displacement
//!
//! Reciprocal terms clamp their denominator to at least `EPSILON`, so a zero or
//! negative price/displacement yields a large finite term instead of a division by zero.

use crate::dataset::{Dataset, VehicleRecord};

use super::criteria::Purpose;

/// Smallest denominator used by reciprocal terms.
pub const EPSILON: f64 = 1e-9;

/// Attributes a formula may read, extracted once per record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub mileage: f64,
    pub price: f64,
    pub displacement: f64,
    pub cylinders: f64,
    pub fuel_code: f64,
    pub body_code: f64,
}

impl Features {
    /// Missing price/mileage read as 0; the filter stage never lets those through.
    pub fn extract(record: &VehicleRecord, dataset: &Dataset) -> Self {
        Features {
            mileage: record.mileage.unwrap_or(0.0),
            price: record.price.unwrap_or(0.0),
            displacement: record.displacement,
            cylinders: record.cylinders,
            fuel_code: dataset.fuel_codes.code(&record.fuel),
            body_code: dataset.body_codes.code(&record.body),
        }
    }
}

impl Purpose {
    pub fn score(self, f: &Features) -> f64 {
        match self {
            Purpose::Urban => {
                0.5 * f.mileage + 0.3 * reciprocal(f.price) + 0.2 * reciprocal(f.displacement)
            }
            Purpose::Touring => {
                0.4 * f.mileage
                    + 0.3 * reciprocal(f.price)
                    + 0.2 * f.fuel_code
                    + 0.1 * f.displacement
            }
            Purpose::Racing => {
                0.4 * f.cylinders + 0.3 * f.body_code + 0.2 * f.price + 0.1 * f.displacement
            }
        }
    }
}

pub fn score_record(record: &VehicleRecord, dataset: &Dataset, purpose: Purpose) -> f64 {
    purpose.score(&Features::extract(record, dataset))
}

fn reciprocal(value: f64) -> f64 {
    1.0 / value.max(EPSILON)
}
