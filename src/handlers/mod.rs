use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    Json,
};

use crate::errors::ApiError;
use crate::models::common::{ErrorResponse, MessageResponse};

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod order;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Royal Bee API!".to_string(),
    })
}

/// Turns an unreadable JSON body into the standard error payload.
pub(crate) fn body_rejection(rejection: JsonRejection) -> ApiError {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
}

/// Same as [`body_rejection`] for url-encoded form bodies.
pub(crate) fn form_rejection(rejection: FormRejection) -> ApiError {
    tracing::warn!("Rejected form body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
}
