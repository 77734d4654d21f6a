//! # API Request/Response Types
//!
//! JSON bodies exchanged with the dashboard pages. Engine values
//! (`Overview`, `Patient`, `Alert`, `MoveRecord`, ...) are serialized as-is;
//! this module only holds the envelopes around them.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use wardflow_core::{Alert, AutoBalanceConfig, FlowError, MoveRecord};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_IDLE: &str = "idle";
pub const STATUS_ERROR: &str = "error";

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// `{status, message}` body used by simulate, reset and every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
        }
    }
}

// =============================================================================
// FLOW MODE
// =============================================================================

/// Flow mode update. A missing or null `auto` means manual.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowModeRequest {
    #[serde(default, deserialize_with = "null_as_false")]
    pub auto: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Flow mode snapshot; `status` is present only after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowModeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub auto: bool,
}

impl FlowModeResponse {
    pub fn current(auto: bool) -> Self {
        Self { status: None, auto }
    }

    pub fn updated(auto: bool) -> Self {
        Self {
            status: Some(STATUS_SUCCESS.to_string()),
            auto,
        }
    }
}

// =============================================================================
// MOVES
// =============================================================================

/// Manual move request. Both fields are required; they are optional here so
/// that a missing one is reported as such instead of as malformed JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveRequest {
    pub id: Option<u64>,
    pub to_stage: Option<String>,
}

/// Result of advance, manual move and balance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowResponse {
    pub status: String,
    pub moved: Vec<MoveRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
}

impl FlowResponse {
    /// Moves applied, with the alert feed as it stands afterwards.
    pub fn success(moved: Vec<MoveRecord>, alerts: Vec<Alert>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            moved,
            alerts: Some(alerts),
        }
    }

    /// Accepted, nothing to do (same-stage manual move).
    pub fn unchanged() -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            moved: Vec::new(),
            alerts: None,
        }
    }

    /// Balance check in manual mode.
    pub fn idle() -> Self {
        Self {
            status: STATUS_IDLE.to_string(),
            moved: Vec::new(),
            alerts: None,
        }
    }
}

// =============================================================================
// AUTO-BALANCE CONFIG
// =============================================================================

/// Config after a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub status: String,
    pub config: AutoBalanceConfig,
}

impl ConfigResponse {
    pub fn updated(config: AutoBalanceConfig) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            config,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// A rejected request: HTTP status plus a `{status: "error", message}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        let status = match err {
            FlowError::NotFound(_) => StatusCode::NOT_FOUND,
            FlowError::InvalidStage(_)
            | FlowError::InvalidConfig(_)
            | FlowError::MissingArgument(_) => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, "Request rejected: {}", self.message);
        (self.status, Json(StatusResponse::error(self.message))).into_response()
    }
}
