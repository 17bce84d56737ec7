//! HTTP routes
//!
//! Every endpoint is stateless: callers send the full calculator state and
//! get the result back. The server only shares the read-only catalog.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use devis_common::OfferCatalog;
use devis_pricing::{CalculatorState, PricingService, Quote, Selection};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, instrument};

/// Shared state for handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub pricing: PricingService,
}

impl AppState {
    pub fn new(pricing: PricingService) -> Self {
        Self { pricing }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    #[serde(default)]
    pub selected_services: Selection,
    pub offer_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub selected_services: Selection,
}

/// Request body rejected before pricing
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected request body");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": devis_common::VERSION,
    }))
}

async fn get_catalog(State(state): State<AppState>) -> Json<OfferCatalog> {
    Json(state.pricing.catalog().clone())
}

#[instrument(skip_all)]
async fn toggle_selection(
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let Json(request) = payload?;
    let selected_services = request.selected_services.toggled(&request.offer_id);
    Ok(Json(ToggleResponse { selected_services }))
}

#[instrument(skip_all)]
async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<CalculatorState>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let Json(calculator_state) = payload?;
    Ok(Json(state.pricing.quote(&calculator_state)))
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/catalog", get(get_catalog))
        .route("/api/v1/selection/toggle", post(toggle_selection))
        .route("/api/v1/quotes", post(create_quote))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
