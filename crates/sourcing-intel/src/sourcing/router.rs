use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::CooperativeId;
use super::price_feed::PriceFeed;
use super::repository::CooperativeRepository;
use super::service::{SourcingAnalyzer, SourcingServiceError};

/// Router builder exposing the sourcing analysis endpoints.
pub fn sourcing_router<R, P>(analyzer: Arc<SourcingAnalyzer<R, P>>) -> Router
where
    R: CooperativeRepository + 'static,
    P: PriceFeed + 'static,
{
    Router::new()
        .route(
            "/api/v1/cooperatives/analyze-all",
            post(analyze_all_handler::<R, P>),
        )
        .route(
            "/api/v1/cooperatives/:cooperative_id/sourcing-analysis",
            get(analyze_handler::<R, P>),
        )
        .route(
            "/api/v1/cooperatives/:cooperative_id/analyze",
            post(analyze_handler::<R, P>),
        )
        .route(
            "/api/v1/cooperatives/:cooperative_id/sourcing-history",
            get(history_handler::<R, P>),
        )
        .route("/api/v1/regions", get(regions_handler::<R, P>))
        .route(
            "/api/v1/regions/:name/intelligence",
            get(region_handler::<R, P>),
        )
        .with_state(analyzer)
}

pub(crate) async fn analyze_handler<R, P>(
    State(analyzer): State<Arc<SourcingAnalyzer<R, P>>>,
    Path(cooperative_id): Path<u64>,
) -> Response
where
    R: CooperativeRepository + 'static,
    P: PriceFeed + 'static,
{
    match analyzer.analyze(CooperativeId(cooperative_id)) {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R, P>(
    State(analyzer): State<Arc<SourcingAnalyzer<R, P>>>,
    Path(cooperative_id): Path<u64>,
) -> Response
where
    R: CooperativeRepository + 'static,
    P: PriceFeed + 'static,
{
    let id = CooperativeId(cooperative_id);
    match analyzer.history(id) {
        Ok(snapshots) => {
            let payload = json!({
                "cooperative_id": id,
                "snapshots": snapshots,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analyze_all_handler<R, P>(
    State(analyzer): State<Arc<SourcingAnalyzer<R, P>>>,
) -> Response
where
    R: CooperativeRepository + 'static,
    P: PriceFeed + 'static,
{
    match analyzer.analyze_all() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn region_handler<R, P>(
    State(analyzer): State<Arc<SourcingAnalyzer<R, P>>>,
    Path(name): Path<String>,
) -> Response
where
    R: CooperativeRepository + 'static,
    P: PriceFeed + 'static,
{
    match analyzer.region_intelligence(&name) {
        Ok(intelligence) => (StatusCode::OK, axum::Json(intelligence)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn regions_handler<R, P>(
    State(analyzer): State<Arc<SourcingAnalyzer<R, P>>>,
) -> Response
where
    R: CooperativeRepository + 'static,
    P: PriceFeed + 'static,
{
    match analyzer.regions() {
        Ok(regions) => (StatusCode::OK, axum::Json(regions)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SourcingServiceError) -> Response {
    let status = if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
