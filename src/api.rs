//! HTTP surface: health and predict endpoints plus OpenAPI docs.

use axum::{extract::State, routing::get, Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::config::SeedPolicy;
use crate::dataset::CanonicalTable;
use crate::error::{ApiError, ErrorBody};
use crate::predict::{self, PredictionReport};
use crate::sentiment::SentimentAdapter;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub table: Arc<CanonicalTable>,
    pub sentiment: SentimentAdapter,
    pub seed: SeedPolicy,
}

impl AppState {
    pub fn new(table: CanonicalTable, sentiment: SentimentAdapter, seed: SeedPolicy) -> Self {
        Self {
            table: Arc::new(table),
            sentiment,
            seed,
        }
    }

    /// Random source for one request.
    pub fn request_rng(&self) -> StdRng {
        match self.seed {
            SeedPolicy::Entropy => StdRng::from_entropy(),
            SeedPolicy::Fixed(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Products available for analysis.
    pub rows: usize,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, predict_trends),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            PredictionReport,
            crate::predict::SentimentSummary,
            crate::trend::TrendResult,
            crate::trend::TrendLabel,
            crate::keywords::KeywordCount,
            crate::forecast::ForecastPoint
        )
    ),
    tags(
        (name = "trend", description = "Product Trend Analysis API")
    )
)]
pub struct ApiDoc;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/trend-swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(health))
        .route("/api/predict", get(predict_trends))
        .layer(cors)
        .with_state(state)
}

/// Liveness plus the number of loaded products.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "trend"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        rows: state.table.len(),
    })
}

/// Scores a fresh random sample of the catalog.
#[utoipa::path(
    get,
    path = "/api/predict",
    responses(
        (status = 200, description = "Trend report for a random sample", body = PredictionReport),
        (status = 400, description = "No data loaded", body = ErrorBody),
        (status = 500, description = "Scoring failed", body = ErrorBody)
    ),
    tag = "trend"
)]
pub async fn predict_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PredictionReport>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", request_id = %request_id);

    let report = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        let mut rng = state.request_rng();
        predict::predict(&state.table, &state.sentiment, &mut rng)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("prediction task failed: {e}")))??;

    Ok(Json(report))
}
