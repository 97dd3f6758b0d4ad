pub mod admin;
pub mod caller;
pub mod error;
pub mod nearest;
pub mod points;
pub mod requests;

use axum::{response::IntoResponse, Json};

pub use caller::Caller;
pub use error::ApiError;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "wifi-locator-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
