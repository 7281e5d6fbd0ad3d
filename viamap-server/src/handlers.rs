//! Request handlers for the routing service.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use geojson::FeatureCollection;
use serde::Deserialize;
use viamap_core::prelude::*;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub origins: Vec<NamedPoint>,
    pub destinations: Vec<NamedPoint>,
    /// Overrides the configured travel mode for this request.
    pub mode: Option<TravelMode>,
    /// Overrides the configured extent margin, in degrees.
    pub margin: Option<f64>,
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Computes shortest routes for every origin-destination pair and returns
/// them as a WGS-84 GeoJSON FeatureCollection, with skipped pairs noted
/// under `skipped_pairs`.
pub async fn routes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let origins = to_point_set(request.origins);
    let destinations = to_point_set(request.destinations);

    let mut options = state.options;
    if let Some(mode) = request.mode {
        options.mode = mode;
    }
    if let Some(margin) = request.margin {
        options.extent_margin = margin;
    }

    // The route batch is CPU-bound; keep it off the async workers.
    let state = state.clone();
    let map = tokio::task::spawn_blocking(move || {
        plan_route_map(&state.provider, &origins, &destinations, &options)
    })
    .await
    .map_err(|e| ApiError::internal(format!("routing task failed: {e}")))??;

    tracing::info!(
        routes = map.routes.len(),
        skipped = map.routes.skipped.len(),
        "Computed route batch"
    );
    Ok(Json(map.to_geojson()))
}

fn to_point_set(points: Vec<NamedPoint>) -> PointSet {
    PointSet::wgs84(points.into_iter().map(|p| (p.name, p.lon, p.lat)))
}
