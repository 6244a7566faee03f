use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::feed::date::FeedDate;
use crate::feed::types::DayFeed;
use crate::feed::FeedAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<FeedAggregator>,
}

impl AppState {
    pub fn new(aggregator: FeedAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/feed", get(day_feed))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct FeedQuery {
    date: Option<String>,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

/// One fetch cycle per request. Upstream failures are absorbed inside the
/// aggregator; the only error this handler reports is a bad date, which
/// aborts the cycle before any request is issued.
async fn day_feed(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Result<Json<DayFeed>, (StatusCode, Json<ErrorBody>)> {
    let raw = q
        .date
        .ok_or_else(|| bad_request("missing 'date' query parameter".to_string()))?;
    let date: FeedDate = raw
        .parse()
        .map_err(|e| bad_request(format!("invalid date '{raw}': {e}")))?;

    Ok(Json(state.aggregator.fetch_day(&date).await))
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error }))
}
