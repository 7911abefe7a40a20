//! CSV loader — reads the vehicle dataset and normalizes every row.
//!
//! Normalization rules:
//! - a required column absent from the header is substituted (0 for numbers,
//!   `"Unknown"` for categories) and reported once
//! - `price` / `mileage` cells that are empty or not numbers become `None`,
//!   so range filters can never match them
//! - `cylinders` / `displacement` cells that are empty or not numbers are
//!   imputed with the column median
//! - empty categorical cells become `"Unknown"`

use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use super::model::{Dataset, VehicleRecord, UNKNOWN};
use super::DatasetError;

const DEFAULT_YEAR: i32 = 2023;

/// What the loader had to substitute or drop while normalizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub rows: usize,
    pub substituted_columns: Vec<String>,
    pub missing_prices: usize,
    pub missing_mileages: usize,
    pub imputed_cells: usize,
}

/// Loads and normalizes the dataset at `path`.
pub fn load_csv(path: &Path) -> Result<(Dataset, LoadReport), DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let (dataset, report) = parse_csv(file)?;
    debug!("Loaded {} vehicles from {}", dataset.len(), path.display());
    Ok((dataset, report))
}

/// Parses CSV from any reader. Header row required.
pub fn parse_csv<R: Read>(reader: R) -> Result<(Dataset, LoadReport), DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnMap::resolve(&headers);

    let mut report = LoadReport {
        substituted_columns: columns.substituted(),
        ..LoadReport::default()
    };
    for column in &report.substituted_columns {
        warn!("Dataset has no '{column}' column; substituting defaults");
    }

    let mut raw_rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        raw_rows.push(columns.extract(&record));
    }

    let cylinders_median = median(raw_rows.iter().filter_map(|r| r.cylinders.parsed()));
    let displacement_median = median(raw_rows.iter().filter_map(|r| r.displacement.parsed()));

    let records: Vec<VehicleRecord> = raw_rows
        .into_iter()
        .enumerate()
        .map(|(id, raw)| {
            normalize(
                id,
                raw,
                Imputation {
                    cylinders: cylinders_median,
                    displacement: displacement_median,
                },
                &mut report,
            )
        })
        .collect();

    report.rows = records.len();
    if report.missing_prices > 0 || report.missing_mileages > 0 {
        warn!(
            "{} rows have no usable price and {} no usable mileage; they will never match range filters",
            report.missing_prices, report.missing_mileages
        );
    }
    if report.imputed_cells > 0 {
        debug!("Imputed {} numeric cells with column medians", report.imputed_cells);
    }

    Ok((Dataset::from_records(records), report))
}

// ────────────────────────────────────────────────────────────────────────────
// Header resolution
// ────────────────────────────────────────────────────────────────────────────

/// Header positions for each field. `None` means the column is absent.
struct ColumnMap {
    name: Option<usize>,
    make: Option<usize>,
    model: Option<usize>,
    price: Option<usize>,
    mileage: Option<usize>,
    displacement: Option<usize>,
    cylinders: Option<usize>,
    fuel: Option<usize>,
    vehicle_type: Option<usize>,
    body: Option<usize>,
    drivetrain: Option<usize>,
    purpose: Option<usize>,
    detailed_purpose: Option<usize>,
    year: Option<usize>,
    image_url: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Self {
        ColumnMap {
            name: find_column(headers, &["name"]),
            make: find_column(headers, &["make", "brand"]),
            model: find_column(headers, &["model"]),
            price: find_column(headers, &["price"]),
            mileage: find_column(headers, &["mileage"]),
            displacement: find_column(headers, &["Displacement (cc)", "displacement"]),
            cylinders: find_column(headers, &["cylinders"]),
            fuel: find_column(headers, &["fuel", "fuel_type"]),
            vehicle_type: find_column(headers, &["type", "vehicle_type"]),
            body: find_column(headers, &["body"]),
            drivetrain: find_column(headers, &["drivetrain"]),
            purpose: find_column(headers, &["Purpose", "purpose"]),
            detailed_purpose: find_column(headers, &["Detailed_Purpose", "detailed_purpose"]),
            year: find_column(headers, &["year"]),
            image_url: find_column(headers, &["image_url"]),
        }
    }

    /// Required columns that are missing and will be defaulted.
    fn substituted(&self) -> Vec<String> {
        [
            ("price", self.price),
            ("mileage", self.mileage),
            ("fuel", self.fuel),
            ("type", self.vehicle_type),
            ("make", self.make),
            ("body", self.body),
            ("Purpose", self.purpose),
            ("Detailed_Purpose", self.detailed_purpose),
            ("cylinders", self.cylinders),
            ("Displacement (cc)", self.displacement),
            ("drivetrain", self.drivetrain),
        ]
        .into_iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    fn extract(&self, record: &csv::StringRecord) -> RawRow {
        let text = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let number = |idx: Option<usize>| match idx {
            None => NumericCell::Absent,
            Some(i) => match record.get(i).and_then(parse_number) {
                Some(v) => NumericCell::Parsed(v),
                None => NumericCell::Unparsable,
            },
        };
        RawRow {
            name: text(self.name),
            make: text(self.make),
            model: text(self.model),
            price: number(self.price),
            mileage: number(self.mileage),
            displacement: number(self.displacement),
            cylinders: number(self.cylinders),
            fuel: text(self.fuel),
            vehicle_type: text(self.vehicle_type),
            body: text(self.body),
            drivetrain: text(self.drivetrain),
            purpose: text(self.purpose),
            detailed_purpose: text(self.detailed_purpose),
            year: text(self.year),
            image_url: text(self.image_url),
        }
    }
}

/// Position of the first alias present in the header.
fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumericCell {
    Absent,
    Parsed(f64),
    Unparsable,
}

impl NumericCell {
    fn parsed(&self) -> Option<f64> {
        match self {
            NumericCell::Parsed(v) => Some(*v),
            _ => None,
        }
    }
}

struct RawRow {
    name: Option<String>,
    make: Option<String>,
    model: Option<String>,
    price: NumericCell,
    mileage: NumericCell,
    displacement: NumericCell,
    cylinders: NumericCell,
    fuel: Option<String>,
    vehicle_type: Option<String>,
    body: Option<String>,
    drivetrain: Option<String>,
    purpose: Option<String>,
    detailed_purpose: Option<String>,
    year: Option<String>,
    image_url: Option<String>,
}

#[derive(Clone, Copy)]
struct Imputation {
    cylinders: f64,
    displacement: f64,
}

fn normalize(
    id: usize,
    raw: RawRow,
    imputation: Imputation,
    report: &mut LoadReport,
) -> VehicleRecord {
    let price = match raw.price {
        NumericCell::Parsed(v) => Some(v),
        NumericCell::Absent => Some(0.0),
        NumericCell::Unparsable => {
            report.missing_prices += 1;
            None
        }
    };
    let mileage = match raw.mileage {
        NumericCell::Parsed(v) => Some(v),
        NumericCell::Absent => Some(0.0),
        NumericCell::Unparsable => {
            report.missing_mileages += 1;
            None
        }
    };
    let mut impute = |cell: NumericCell, median: f64| match cell {
        NumericCell::Parsed(v) => v,
        NumericCell::Absent => 0.0,
        NumericCell::Unparsable => {
            report.imputed_cells += 1;
            median
        }
    };
    let displacement = impute(raw.displacement, imputation.displacement);
    let cylinders = impute(raw.cylinders, imputation.cylinders);

    let name = raw.name.unwrap_or_else(|| {
        let joined = format!(
            "{} {}",
            raw.make.as_deref().unwrap_or(""),
            raw.model.as_deref().unwrap_or("")
        );
        match joined.trim() {
            "" => UNKNOWN.to_string(),
            trimmed => trimmed.to_string(),
        }
    });
    let category = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());

    VehicleRecord {
        id,
        name,
        make: category(raw.make),
        model: category(raw.model),
        price,
        mileage,
        displacement,
        cylinders,
        fuel: category(raw.fuel),
        vehicle_type: category(raw.vehicle_type),
        body: category(raw.body),
        drivetrain: category(raw.drivetrain),
        purpose: category(raw.purpose),
        detailed_purpose: category(raw.detailed_purpose),
        year: raw.year.as_deref().and_then(parse_year).unwrap_or(DEFAULT_YEAR),
        image_url: raw.image_url.unwrap_or_default(),
    }
}

/// Finite numbers only; `NaN`/`inf` spellings count as unparsable.
fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `2019` and float-formatted years such as `2019.0`.
fn parse_year(cell: &str) -> Option<i32> {
    cell.parse::<i32>()
        .ok()
        .or_else(|| parse_number(cell).map(|v| v.trunc() as i32))
}

fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
