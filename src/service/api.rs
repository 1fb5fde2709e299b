//! HTTP handlers for `GET /health` and `POST /predict`.
//!
//! Client-facing error messages come from the closed [`ApiError`] set.
//! Underlying causes are only written to the server log.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::data::crops::requirements_for;
use crate::data::features::FEATURE_NAMES;
use crate::service::validator::{validate_request, ValidationError};
use crate::service::AppState;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("model not loaded")]
    ModelNotLoaded,

    #[error("unusable request body: {0}")]
    InvalidBody(String),

    #[error("missing fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("invalid value for {field}: {detail}")]
    InvalidValue { field: &'static str, detail: String },

    #[error("inference failed: {0}")]
    Inference(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NotAnObject => ApiError::InvalidBody("not an object".to_string()),
            ValidationError::MissingFields(fields) => ApiError::MissingFields(fields),
            ValidationError::InvalidValue { field, detail } => ApiError::InvalidValue { field, detail },
        }
    }
}

/// `['N', 'P', ...]`, the way the required field list is presented to clients.
fn required_fields_list() -> String {
    let quoted: Vec<String> = FEATURE_NAMES.iter().map(|f| format!("'{}'", f)).collect();
    format!("[{}]", quoted.join(", "))
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelNotLoaded
            | ApiError::InvalidBody(_)
            | ApiError::InvalidValue { .. }
            | ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Sanitized message returned in the `error` field.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::ModelNotLoaded => "Model not loaded".to_string(),
            ApiError::InvalidBody(_) => "Invalid request body".to_string(),
            ApiError::MissingFields(_) => {
                format!("Missing fields. Required: {}", required_fields_list())
            }
            ApiError::InvalidValue { field, .. } => {
                format!("Invalid value for field '{}': expected a number", field)
            }
            ApiError::Inference(_) => "Prediction failed".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Inference(_) | ApiError::ModelNotLoaded => error!(error = %self, "predict failed"),
            _ => warn!(error = %self, "rejected predict request"),
        }
        (self.status(), Json(json!({ "error": self.client_message() }))).into_response()
    }
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.service_name,
    }))
}

pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let recommender = state.recommender.as_ref().ok_or(ApiError::ModelNotLoaded)?;

    let input: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let features = validate_request(&input)?;

    let crop = recommender
        .recommend(&features)
        .map_err(|e| ApiError::Inference(e.to_string()))?;

    if let Some(reference) = requirements_for(&crop) {
        let outside = reference.out_of_range(&features);
        if !outside.is_empty() {
            warn!(%crop, fields = ?outside, "input outside reference ranges for recommended crop");
        }
    }
    debug!(%crop, "prediction served");

    Ok(Json(json!({
        "success": true,
        "crop": crop,
        "input_received": input,
    })))
}

/// Build the axum [`Router`] with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::recommender::CropRecommender;
    use crate::training::trainer::tests::separable_dataset;
    use crate::training::trainer::{train_model, TrainConfig};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn loaded_app() -> Router {
        let outcome = train_model(&separable_dataset(20), &TrainConfig::default()).unwrap();
        let recommender = CropRecommender::new(outcome.model, outcome.scaler).unwrap();
        build_router(Arc::new(AppState::new("Test Service", Some(recommender))))
    }

    fn unloaded_app() -> Router {
        build_router(Arc::new(AppState::new("Test Service", None)))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn predict_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn health_request() -> Request<Body> {
        Request::builder().uri("/health").body(Body::empty()).unwrap()
    }

    const EXAMPLE: &str =
        r#"{"N":90,"P":42,"K":43,"temperature":20.8,"humidity":82,"ph":6.5,"rainfall":202.9}"#;

    #[tokio::test]
    async fn test_health_is_healthy_without_model() {
        for app in [loaded_app(), unloaded_app()] {
            let (status, json) = send(app, health_request()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json, json!({"status": "healthy", "service": "Test Service"}));
        }
    }

    #[tokio::test]
    async fn test_predict_example_request() {
        let (status, json) = send(loaded_app(), predict_request(EXAMPLE)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let crop = json["crop"].as_str().unwrap();
        assert!(["chickpea", "maize", "rice"].contains(&crop));
        assert_eq!(json["input_received"]["rainfall"], 202.9);
    }

    #[tokio::test]
    async fn test_predict_echoes_extra_fields() {
        let body = r#"{"N":"50","P":51,"K":52,"temperature":53,"humidity":54,"ph":55,"rainfall":56,"note":"x"}"#;
        let (status, json) = send(loaded_app(), predict_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["crop"], "rice");
        assert_eq!(json["input_received"]["note"], "x");
        assert_eq!(json["input_received"]["N"], "50");
    }

    #[tokio::test]
    async fn test_missing_fields_lists_all_required() {
        let expected = "Missing fields. Required: ['N', 'P', 'K', 'temperature', 'humidity', 'ph', 'rainfall']";
        for body in [r#"{}"#, r#"{"N":1,"P":2,"K":3,"temperature":4,"humidity":5,"ph":6}"#] {
            let (status, json) = send(loaded_app(), predict_request(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], expected);
        }
    }

    #[tokio::test]
    async fn test_non_numeric_value_is_server_error() {
        let body = r#"{"N":"lots","P":42,"K":43,"temperature":20.8,"humidity":82,"ph":6.5,"rainfall":202.9}"#;
        let (status, json) = send(loaded_app(), predict_request(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Invalid value for field 'N': expected a number");
    }

    #[tokio::test]
    async fn test_model_not_loaded() {
        let (status, json) = send(unloaded_app(), predict_request(EXAMPLE)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Model not loaded");
    }

    #[tokio::test]
    async fn test_unusable_body_is_server_error() {
        let overflow =
            r#"{"N":1e400,"P":42,"K":43,"temperature":20.8,"humidity":82,"ph":6.5,"rainfall":202.9}"#;
        for body in ["not json", "null", "[1,2,3]", "", overflow] {
            let (status, json) = send(loaded_app(), predict_request(body)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {:?}", body);
            assert_eq!(json["error"], "Invalid request body");
        }
    }
}
