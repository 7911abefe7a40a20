use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Placeholder for categorical fields missing from the source.
pub const UNKNOWN: &str = "Unknown";

/// One normalized dataset row. Every field is populated; `price` and `mileage`
/// stay `None` when the source cell could not be read as a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    /// Row index in the source file.
    pub id: usize,
    pub name: String,
    #[serde(rename = "brand")]
    pub make: String,
    pub model: String,
    pub price: Option<f64>,
    pub mileage: Option<f64>,
    pub displacement: f64,
    pub cylinders: f64,
    #[serde(rename = "fuel_type")]
    pub fuel: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub body: String,
    pub drivetrain: String,
    pub purpose: String,
    pub detailed_purpose: String,
    pub year: i32,
    pub image_url: String,
}

/// Sorted distinct values of a categorical column mapped to their index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelEncoding {
    codes: BTreeMap<String, usize>,
}

impl LabelEncoding {
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let classes: BTreeSet<&str> = values.into_iter().collect();
        let codes = classes
            .into_iter()
            .enumerate()
            .map(|(i, class)| (class.to_string(), i))
            .collect();
        Self { codes }
    }

    /// Code for `value`; values never seen at fit time encode as 0.
    pub fn code(&self, value: &str) -> f64 {
        self.codes.get(value).copied().unwrap_or(0) as f64
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// The complete loaded dataset, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<VehicleRecord>,
    pub fuel_codes: LabelEncoding,
    pub body_codes: LabelEncoding,
}

impl Dataset {
    /// Builds the categorical encodings from the records.
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let fuel_codes = LabelEncoding::fit(records.iter().map(|r| r.fuel.as_str()));
        let body_codes = LabelEncoding::fit(records.iter().map(|r| r.body.as_str()));
        Dataset {
            records,
            fuel_codes,
            body_codes,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct vehicle types, without the placeholder.
    pub fn vehicle_types(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.vehicle_type.as_str()))
    }

    /// Sorted distinct brands, without the placeholder.
    pub fn brands(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.make.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| *v != UNKNOWN)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
