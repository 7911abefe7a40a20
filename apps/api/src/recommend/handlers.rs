//! Axum route handler for the Recommendation API.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::recommend::criteria::{parse_string_list, DEFAULT_LIMIT};
use crate::recommend::{recommend, FilterCriteria, Purpose, Range, Recommendation, ScoredResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Query string of GET /api/recommendations. Every parameter is optional.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_mileage: Option<f64>,
    pub max_mileage: Option<f64>,
    pub purpose: Option<String>,
    pub fuel_type: Option<String>,
    /// JSON array, e.g. `["SUV","Sedan"]`.
    pub vehicle_types: Option<String>,
    /// JSON array, e.g. `["Toyota"]`.
    pub brands: Option<String>,
    pub limit: Option<usize>,
}

impl RecommendationQuery {
    pub fn into_criteria(self) -> Result<FilterCriteria, AppError> {
        let price = Range::new(
            "price",
            self.min_price.unwrap_or(0.0),
            self.max_price.unwrap_or(100_000.0),
        )?;
        let mileage = Range::new(
            "mileage",
            self.min_mileage.unwrap_or(0.0),
            self.max_mileage.unwrap_or(50.0),
        )?;
        let purpose = self
            .purpose
            .as_deref()
            .map(Purpose::parse_or_fallback)
            .unwrap_or(Purpose::Urban);

        let mut criteria = FilterCriteria::new(price, mileage, purpose)
            .with_limit(self.limit.unwrap_or(DEFAULT_LIMIT))?;
        criteria.fuel_type = self.fuel_type.filter(|f| !f.trim().is_empty());
        criteria.vehicle_types = parse_string_list("vehicle_types", self.vehicle_types.as_deref())?;
        criteria.brands = parse_string_list("brands", self.brands.as_deref())?;
        Ok(criteria)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Ok,
    NoMatches,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub status: RecommendationStatus,
    pub purpose: Purpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<ScoredResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/recommendations
///
/// Filters the dataset by the query, scores survivors for the declared purpose,
/// and returns the top `limit`. Zero matches is a 200 with `status: "no_matches"`.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    debug!("Recommendation query: {query:?}");
    let criteria = query.into_criteria()?;

    let pipeline_criteria = criteria.clone();
    let outcome = state
        .with_dataset(move |dataset| recommend(dataset, &pipeline_criteria))
        .await?;

    let response = match outcome {
        Recommendation::Ranked(results) => {
            info!(
                "Returning {} recommendations for purpose {}",
                results.len(),
                criteria.purpose
            );
            RecommendationResponse {
                status: RecommendationStatus::Ok,
                purpose: criteria.purpose,
                message: None,
                results,
            }
        }
        Recommendation::NoMatches => {
            info!("No vehicles match criteria for purpose {}", criteria.purpose);
            RecommendationResponse {
                status: RecommendationStatus::NoMatches,
                purpose: criteria.purpose,
                message: Some("No vehicles match your criteria".to_string()),
                results: Vec::new(),
            }
        }
    };

    Ok(Json(response))
}
