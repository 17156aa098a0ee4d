use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use common::types::{MessageBody, ROOT_ACK};
use serde_json::Value;
use service::{booking::Record, errors::ServiceError};
use tracing::error;

use crate::errors::ApiError;
use crate::routes::AppState;

pub const SAVED_MESSAGE: &str = "Data saved successfully!";

/// Liveness check
pub async fn root() -> &'static str {
    ROOT_ACK
}

/// Accept one booking; the body must be a JSON object with all four fields.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        error!(event = "invalid_body", reason = %rejection.body_text(), "request is not JSON");
        ApiError::from(ServiceError::InvalidFormat)
    })?;

    state.bookings.submit(&payload).await?;
    Ok((StatusCode::CREATED, Json(MessageBody::new(SAVED_MESSAGE))))
}

/// Every stored booking in submission order.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.bookings.list().await?;
    Ok(Json(records))
}
