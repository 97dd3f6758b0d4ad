use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::debug;

use super::error::ApiError;
use crate::{
    models::{Category, PointEntry, PointId, PointsQuery, PointsResponse},
    state::AppState,
};

/// List catalog points, optionally limited to one category.
///
/// An unrecognized category tag is a 400.
pub async fn list_points(
    State(state): State<AppState>,
    query: Result<Query<PointsQuery>, QueryRejection>,
) -> Result<Json<PointsResponse>, ApiError> {
    let Query(query) = query?;

    let category = query
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let points: Vec<PointEntry> = match category {
        Some(category) => state
            .catalog
            .by_category(category)
            .into_iter()
            .cloned()
            .map(PointEntry::from)
            .collect(),
        None => state
            .catalog
            .points()
            .iter()
            .cloned()
            .map(PointEntry::from)
            .collect(),
    };

    debug!("Listing {} points (filter: {:?})", points.len(), category);

    Ok(Json(PointsResponse {
        total_count: points.len(),
        points,
    }))
}

pub async fn get_point(
    State(state): State<AppState>,
    id: Result<Path<PointId>, PathRejection>,
) -> Result<Json<PointEntry>, ApiError> {
    let Path(id) = id?;

    state
        .catalog
        .get(id)
        .cloned()
        .map(|point| Json(point.into()))
        .ok_or_else(|| ApiError::not_found(format!("Point {} not found.", id)))
}
