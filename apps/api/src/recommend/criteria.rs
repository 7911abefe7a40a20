use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("{field}: minimum {min} is greater than maximum {max}")]
    InvertedRange { field: &'static str, min: f64, max: f64 },

    #[error("{field}: bounds must be finite numbers")]
    NonFiniteBound { field: &'static str },

    #[error("limit must be at least 1")]
    ZeroLimit,

    #[error("{field} must be a JSON array of strings: {reason}")]
    BadList { field: &'static str, reason: String },
}

/// Declared usage category; selects the scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Purpose {
    Urban,
    Touring,
    Racing,
}

impl Purpose {
    /// Used when the caller names a purpose we do not know.
    pub const FALLBACK: Purpose = Purpose::Touring;

    /// Lenient parse: unknown values fall back to `Touring` instead of failing.
    pub fn parse_or_fallback(value: &str) -> Purpose {
        value.parse().unwrap_or_else(|_| {
            warn!("Unknown purpose '{value}', falling back to {}", Purpose::FALLBACK);
            Purpose::FALLBACK
        })
    }
}

impl FromStr for Purpose {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(Purpose::Urban),
            "touring" => Ok(Purpose::Touring),
            "racing" => Ok(Purpose::Racing),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Purpose::Urban => "Urban",
            Purpose::Touring => "Touring",
            Purpose::Racing => "Racing",
        };
        f.write_str(name)
    }
}

/// Inclusive numeric range. Only `Range::new` builds one, so bounds are
/// always finite and ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    pub fn new(field: &'static str, min: f64, max: f64) -> Result<Self, CriteriaError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CriteriaError::NonFiniteBound { field });
        }
        if min > max {
            return Err(CriteriaError::InvertedRange { field, min, max });
        }
        Ok(Range { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Caller-supplied criteria for one recommendation query.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub price: Range,
    pub mileage: Range,
    pub purpose: Purpose,
    /// Case-insensitive substring matched against the fuel type.
    pub fuel_type: Option<String>,
    /// Matches when ANY entry is a substring of the vehicle type. Empty = no filter.
    pub vehicle_types: Vec<String>,
    /// Matches when ANY entry is a substring of the brand. Empty = no filter.
    pub brands: Vec<String>,
    pub limit: NonZeroUsize,
}

impl FilterCriteria {
    pub fn new(price: Range, mileage: Range, purpose: Purpose) -> Self {
        Self {
            price,
            mileage,
            purpose,
            fuel_type: None,
            vehicle_types: Vec::new(),
            brands: Vec::new(),
            limit: NonZeroUsize::new(DEFAULT_LIMIT).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Result<Self, CriteriaError> {
        self.limit = NonZeroUsize::new(limit).ok_or(CriteriaError::ZeroLimit)?;
        Ok(self)
    }
}

/// Parses a JSON-encoded string list as sent in query parameters (`["SUV","Sedan"]`).
/// A missing or blank parameter is an empty list.
pub fn parse_string_list(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Vec<String>, CriteriaError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str::<Vec<String>>(text).map_err(|e| {
            CriteriaError::BadList {
                field,
                reason: e.to_string(),
            }
        }),
    }
}
