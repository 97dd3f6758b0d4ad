use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use super::{caller::Caller, error::ApiError};
use crate::{
    models::{RequestResponse, RequestsResponse, SubmitProblemRequest, SubmitSuggestionRequest},
    state::AppState,
};

/// Report a problem with an existing point
pub async fn submit_problem(
    State(state): State<AppState>,
    Caller(author): Caller,
    body: Result<Json<SubmitProblemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RequestResponse>), ApiError> {
    let Json(body) = body?;
    let point = body.point_id.and_then(|id| state.catalog.get(id));

    let request = state
        .requests
        .submit_problem(
            author,
            body.point_id,
            point,
            body.problem_type,
            &body.description,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RequestResponse::with_message(
            request,
            "✅ Report sent! Thank you for the feedback.",
        )),
    ))
}

/// Suggest a location for a new point
pub async fn submit_suggestion(
    State(state): State<AppState>,
    Caller(author): Caller,
    body: Result<Json<SubmitSuggestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RequestResponse>), ApiError> {
    let Json(body) = body?;
    let request = state
        .requests
        .submit_suggestion(author, &body.address, &body.reason)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RequestResponse::with_message(
            request,
            "💡 Suggestion sent! Thank you for the idea.",
        )),
    ))
}

/// Requests submitted by the caller
pub async fn my_requests(
    State(state): State<AppState>,
    caller: Caller,
) -> Json<RequestsResponse> {
    let requests = state.requests.list_for_user(caller.user_id()).await;

    Json(RequestsResponse::from(requests))
}
