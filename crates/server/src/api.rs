//! JSON HTTP API over the recommendation orchestrator.
//!
//! Routes:
//! - `GET /api/health`
//! - `GET /api/options/:axis`
//! - `GET /api/recommendations?axis=..&value=..`

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

use pipeline::{ActiveFilter, Axis};
use poster_client::PosterLookup;

use crate::orchestrator::{AxisOptions, MovieRecommendation, RecommendationOrchestrator};

/// A request the API refuses to answer, rendered as `400 {"error": ...}`
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Rejected request: {:#}", self.0);
        let body = ErrorBody {
            error: format!("{:#}", self.0),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub movies: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub axis: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    /// "none" when no axis was selected
    pub active: &'static str,
    pub value: Option<String>,
    pub movies: Vec<MovieRecommendation>,
}

/// Build the API router around a shared orchestrator
pub fn router<L>(orchestrator: RecommendationOrchestrator<L>) -> Router
where
    L: PosterLookup + 'static,
{
    Router::new()
        .route("/api/health", get(health::<L>))
        .route("/api/options/:axis", get(options::<L>))
        .route("/api/recommendations", get(recommendations::<L>))
        .with_state(orchestrator)
}

/// Bind `addr` and serve the API until the process is stopped
pub async fn serve<L>(addr: SocketAddr, orchestrator: RecommendationOrchestrator<L>) -> anyhow::Result<()>
where
    L: PosterLookup + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Serving recommendations on http://{}", listener.local_addr()?);

    axum::serve(listener, router(orchestrator))
        .await
        .context("HTTP server failed")
}

async fn health<L: PosterLookup + 'static>(
    State(orchestrator): State<RecommendationOrchestrator<L>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        movies: orchestrator.dataset().len(),
    })
}

async fn options<L: PosterLookup + 'static>(
    State(orchestrator): State<RecommendationOrchestrator<L>>,
    Path(axis): Path<String>,
) -> Result<Json<AxisOptions>, ApiError> {
    let axis = Axis::from_str(&axis)?;
    Ok(Json(orchestrator.options(axis)))
}

async fn recommendations<L: PosterLookup + 'static>(
    State(orchestrator): State<RecommendationOrchestrator<L>>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let active = match params.axis.as_deref() {
        Some(axis) => ActiveFilter::Selected(Axis::from_str(axis)?),
        None => ActiveFilter::None,
    };

    let movies = orchestrator.browse(active, params.value.as_deref()).await?;

    Ok(Json(RecommendationsResponse {
        active: active.as_str(),
        value: params.value,
        movies,
    }))
}
