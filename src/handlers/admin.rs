use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::{caller::Caller, error::ApiError};
use crate::{
    models::{
        AdminInboxResponse, ReplyRequest, RequestEntry, RequestResponse, UpdateStatusRequest,
    },
    state::AppState,
};

fn ensure_admin(state: &AppState, caller: &Caller) -> Result<(), ApiError> {
    if state.admins.is_admin(caller.user_id()) {
        return Ok(());
    }

    warn!("Rejected admin call from {}", caller.user_id());
    Err(ApiError::forbidden())
}

/// All requests with inbox counters
pub async fn inbox(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<AdminInboxResponse>, ApiError> {
    ensure_admin(&state, &caller)?;

    let stats = state.requests.stats().await;
    let requests = state.requests.list_all().await;

    Ok(Json(AdminInboxResponse {
        requests: requests.into_iter().map(RequestEntry::from).collect(),
        total_count: stats.total,
        new_count: stats.new,
    }))
}

pub async fn update_status(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<RequestResponse>, ApiError> {
    ensure_admin(&state, &caller)?;
    let Path(id) = id?;
    let Json(body) = body?;

    let request = state.requests.update_status(id, body.status).await?;
    info!(
        "{} set request {} to {:?}",
        caller.user_id(),
        id,
        request.status
    );

    Ok(Json(RequestResponse::with_message(
        request,
        "Status updated.",
    )))
}

/// Reply to the author. Replying resolves the request.
pub async fn reply(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ReplyRequest>, JsonRejection>,
) -> Result<Json<RequestResponse>, ApiError> {
    ensure_admin(&state, &caller)?;
    let Path(id) = id?;
    let Json(body) = body?;

    let request = state.requests.reply(id, &body.reply).await?;
    info!("{} replied to request {}", caller.user_id(), id);

    Ok(Json(RequestResponse::with_message(
        request,
        "✅ Reply sent to the user.",
    )))
}
