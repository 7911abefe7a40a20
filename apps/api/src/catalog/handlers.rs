//! Axum route handlers for browsing the vehicle catalog.

use axum::{extract::State, Json};
use tracing::debug;

use crate::catalog::{list_vehicles, VehicleListing};
use crate::dataset::Dataset;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/vehicles
pub async fn handle_list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleListing>>, AppError> {
    let listing = state.with_dataset(list_vehicles).await?;
    debug!("Sending {} vehicles", listing.len());
    Ok(Json(listing))
}

/// GET /api/vehicle-types
pub async fn handle_vehicle_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.with_dataset(Dataset::vehicle_types).await?))
}

/// GET /api/brands
pub async fn handle_brands(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.with_dataset(Dataset::brands).await?))
}
