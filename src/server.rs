use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, health, nearest, points, requests},
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/points", get(points::list_points))
        .route("/api/points/:id", get(points::get_point))
        .route("/api/nearest", get(nearest::find_nearest))
        .route("/api/requests/problem", post(requests::submit_problem))
        .route("/api/requests/suggestion", post(requests::submit_suggestion))
        .route("/api/requests/mine", get(requests::my_requests))
        .route("/api/admin/requests", get(admin::inbox))
        .route("/api/admin/requests/:id/status", put(admin::update_status))
        .route("/api/admin/requests/:id/reply", post(admin::reply))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
