use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::debug;

use super::{caller::Caller, error::ApiError};
use crate::{
    models::{Location, NearestQuery, NearestResponse},
    services::acquisition::ProvidedLocation,
    state::AppState,
};

/// Find the points nearest to the coordinates the client sent.
///
/// The client takes the device fix or map pick itself; missing or invalid
/// coordinates still produce results, ranked from the city center.
pub async fn find_nearest(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Result<Json<NearestResponse>, ApiError> {
    let Query(query) = query?;

    let k = match query.k {
        Some(0) => return Err(ApiError::bad_request("k must be a positive number.")),
        Some(k) => k,
        None => state.config.default_result_count,
    };

    let location = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Some(Location {
            latitude: lat,
            longitude: lon,
            accuracy: query.accuracy,
        }),
        _ => None,
    };

    debug!(
        "Nearest search for {} at {:?} (k = {})",
        caller.user_id(),
        location,
        k
    );

    let result = state
        .search
        .search(caller.user_id(), &ProvidedLocation(location), k)
        .await?;

    Ok(Json(result.into()))
}
