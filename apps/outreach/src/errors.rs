use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Missing sender credentials. Blocks the action before any gateway call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An upload or send is already running for this session.
    #[error("Busy: {0}")]
    Busy(String),

    /// A whole flow failed at the gateway. `message` is what the user sees.
    #[error("{message}")]
    Gateway {
        message: String,
        #[source]
        source: GatewayError,
    },
}

impl AppError {
    pub fn gateway(message: impl Into<String>, source: GatewayError) -> Self {
        AppError::Gateway {
            message: message.into(),
            source,
        }
    }

    /// Prefers the gateway's own rejection message over `fallback`.
    pub fn gateway_or(fallback: &str, source: GatewayError) -> Self {
        let message = source.api_message().unwrap_or(fallback).to_string();
        AppError::Gateway { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "You are not logged in.".to_string(),
            ),
            AppError::Configuration(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CONFIGURATION_ERROR",
                msg.clone(),
            ),
            AppError::Busy(msg) => (StatusCode::CONFLICT, "BUSY", msg.clone()),
            AppError::Gateway { message, source } => {
                tracing::error!("Gateway error: {source}");
                (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR", message.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
