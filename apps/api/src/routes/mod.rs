pub mod health;

use axum::{routing::get, Router};

use crate::catalog::handlers as catalog;
use crate::recommend::handlers as recommend;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendations
        .route(
            "/api/recommendations",
            get(recommend::handle_recommendations),
        )
        // Catalog
        .route("/api/vehicles", get(catalog::handle_list_vehicles))
        .route("/api/vehicle-types", get(catalog::handle_vehicle_types))
        .route("/api/brands", get(catalog::handle_brands))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    const DATASET: &str = "\
make,model,price,mileage,type,fuel,body,Purpose,Detailed_Purpose,cylinders,Displacement (cc),drivetrain,year
Toyota,Corolla,15000,18,Sedan,Petrol,Sedan,Daily,Urban,4,1800,FWD,2021
Honda,Civic,12000,20,Sedan,Petrol,Sedan,Daily,Urban,4,1500,FWD,2020
Ford,Ranger,32000,11,Pickup,Diesel,Truck,Work,Touring,4,3200,4WD,2022
Porsche,911,95000,9,Coupe,Petrol,Coupe,Sport,Racing,6,3000,RWD,2023
";

    fn app_with(path: PathBuf) -> Router {
        build_router(AppState::from_config(Config {
            dataset_path: path,
            dataset_cache: false,
            port: 0,
            rust_log: "debug".to_string(),
        }))
    }

    fn fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();
        file
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app_with(PathBuf::from("unused.csv")), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_recommendations_ranked() {
        let file = fixture();
        let (status, body) = get_json(
            app_with(file.path().to_path_buf()),
            "/api/recommendations?max_price=40000&purpose=Urban",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        // Civic (mileage 20) leads under Urban
        assert_eq!(results[0]["name"], "Honda Civic");
    }

    #[tokio::test]
    async fn test_recommendations_brand_filter() {
        let file = fixture();
        let (status, body) = get_json(
            app_with(file.path().to_path_buf()),
            "/api/recommendations?max_price=200000&brands=%5B%22pors%22%5D&purpose=Racing",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["brand"], "Porsche");
    }

    #[tokio::test]
    async fn test_recommendations_no_matches_is_ok() {
        let file = fixture();
        let (status, body) = get_json(
            app_with(file.path().to_path_buf()),
            "/api/recommendations?max_price=1000",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_matches");
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recommendations_bad_list_is_400() {
        let file = fixture();
        let (status, body) = get_json(
            app_with(file.path().to_path_buf()),
            "/api/recommendations?vehicle_types=SUV",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_dataset_is_500() {
        let (status, body) = get_json(
            app_with(PathBuf::from("/no/such/vehicles.csv")),
            "/api/recommendations",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATASET_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_numeric_param_is_json_400() {
        let file = fixture();
        let (status, body) = get_json(
            app_with(file.path().to_path_buf()),
            "/api/recommendations?min_price=cheap",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_dataset_is_500() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"make,price,mileage\n\xff\xfe,1,1\n").unwrap();
        let (status, body) = get_json(
            app_with(file.path().to_path_buf()),
            "/api/recommendations",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATASET_ERROR");
    }

    #[tokio::test]
    async fn test_catalog_endpoints() {
        let file = fixture();
        let path = file.path().to_path_buf();

        let (status, body) = get_json(app_with(path.clone()), "/api/vehicles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (_, body) = get_json(app_with(path.clone()), "/api/vehicle-types").await;
        assert_eq!(body, serde_json::json!(["Coupe", "Pickup", "Sedan"]));

        let (_, body) = get_json(app_with(path), "/api/brands").await;
        assert_eq!(
            body,
            serde_json::json!(["Ford", "Honda", "Porsche", "Toyota"])
        );
    }
}
