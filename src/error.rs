//! Error types for the onboarding service
//!
//! Library errors use thiserror; [`AppError`] is the HTTP-facing type and
//! renders as `{ "message": ... }` with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Configuration errors raised while reading the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors from submitting the form to the onboarding API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Failed to submit form: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected response from onboarding API: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid onboarding URL '{0}'")]
    InvalidUrl(String),
}

/// Errors returned by HTTP handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingRequiredFields,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingRequiredFields => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
