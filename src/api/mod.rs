use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    SustainEarthError,
    aqi::{AqiCategory, AqiSource, client::validate_location},
    emissions,
    models::{AqiResult, EmissionsInput, EmissionsResult},
};

#[derive(Debug, Deserialize)]
pub struct AqiQuery {
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCategory {
    pub label: String,
    /// Inclusive upper bound; absent for the top band
    pub upper_bound: Option<f64>,
    pub advisory: String,
}

impl From<AqiCategory> for ApiCategory {
    fn from(category: AqiCategory) -> Self {
        Self {
            label: category.label().to_string(),
            upper_bound: category.upper_bound(),
            advisory: category.advisory().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    pub status: String,
    pub version: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn router<S>(source: Arc<S>) -> Router
where
    S: AqiSource + Send + Sync + 'static,
{
    Router::new()
        .route("/aqi", get(get_aqi::<S>))
        .route("/aqi/categories", get(get_categories))
        .route("/footprint", post(post_footprint))
        .route("/health", get(get_health))
        .with_state(source)
}

fn error_response(err: &SustainEarthError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        SustainEarthError::Validation { .. } => StatusCode::BAD_REQUEST,
        SustainEarthError::Api { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ApiError {
            error: err.user_message(),
        }),
    )
}

async fn get_aqi<S>(State(source): State<Arc<S>>, Query(query): Query<AqiQuery>) -> ApiResult<AqiResult>
where
    S: AqiSource + Send + Sync + 'static,
{
    let city = validate_location(&query.city).map_err(|e| error_response(&e))?;
    match source.fetch(city).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            warn!("AQI lookup for '{}' failed: {}", city, e);
            Err(error_response(&e))
        }
    }
}

async fn get_categories() -> Json<Vec<ApiCategory>> {
    Json(AqiCategory::ALL.into_iter().map(ApiCategory::from).collect())
}

async fn post_footprint(Json(input): Json<EmissionsInput>) -> Json<EmissionsResult> {
    Json(emissions::estimate(&input))
}

async fn get_health() -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}
