//! Onboarding API endpoints
//!
//! POST /api/onboard — presence check on fullName/email, echo the payload
//! GET  /api/health  — liveness

use axum::{
    body::Bytes,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::AppError;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Fields that must be present for the API to accept a payload
const REQUIRED_FIELDS: &[&str] = &["fullName", "email"];

/// Acknowledgment returned by `POST /api/onboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardAck {
    pub message: String,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// POST /api/onboard
///
/// Only `fullName` and `email` are checked; everything else is echoed
/// back unchanged.
async fn onboard(body: Bytes) -> Result<(StatusCode, Json<OnboardAck>), AppError> {
    let payload = parse_payload(&body);
    info!(payload = %payload, "Received form data");

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| !is_present(payload.get(**field)))
    {
        info!(field = *missing, "Rejecting submission with missing field");
        return Err(AppError::MissingRequiredFields);
    }

    Ok((
        StatusCode::CREATED,
        Json(OnboardAck {
            message: SUCCESS_MESSAGE.to_string(),
            data: payload,
        }),
    ))
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Body as a JSON object; anything else counts as an empty object.
fn parse_payload(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::Object(Map::new()),
    }
}

/// Present means truthy: not missing, null, "", false or 0.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Create router for the onboarding API
pub fn create_onboard_router() -> Router {
    Router::new()
        .route("/api/onboard", post(onboard))
        .route("/api/health", get(health))
}
