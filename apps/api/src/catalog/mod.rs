// Catalog: read-only views over the dataset for browsing (full listing and
// the distinct values the recommendation filters accept).

pub mod handlers;

use serde::Serialize;

use crate::dataset::{Dataset, VehicleRecord};

/// One vehicle as shown in the browse listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleListing {
    pub id: usize,
    pub name: String,
    pub brand: String,
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub mileage: Option<f64>,
    pub fuel_type: String,
    pub year: i32,
    pub image_url: String,
}

impl From<&VehicleRecord> for VehicleListing {
    fn from(record: &VehicleRecord) -> Self {
        VehicleListing {
            id: record.id,
            name: record.name.clone(),
            brand: record.make.clone(),
            price: record.price,
            vehicle_type: record.vehicle_type.clone(),
            mileage: record.mileage,
            fuel_type: record.fuel.clone(),
            year: record.year,
            image_url: record.image_url.clone(),
        }
    }
}

pub fn list_vehicles(dataset: &Dataset) -> Vec<VehicleListing> {
    dataset.records.iter().map(VehicleListing::from).collect()
}
