//! Serialization tests for the API envelopes and error mapping.

#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use serde_json::json;
use wardflow::api::{
    ApiError, ConfigResponse, FlowModeRequest, FlowModeResponse, FlowResponse, HealthResponse,
    MoveRequest, StatusResponse,
};
use wardflow_core::{AutoBalanceConfig, FlowError, MoveRecord, PatientId, Priority, Stage};

// =============================================================================
// HEALTH / STATUS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_status_response_shapes() {
    let ok = serde_json::to_value(StatusResponse::success("done")).unwrap();
    let err = serde_json::to_value(StatusResponse::error("nope")).unwrap();

    assert_eq!(ok, json!({ "status": "success", "message": "done" }));
    assert_eq!(err, json!({ "status": "error", "message": "nope" }));
}

// =============================================================================
// FLOW MODE
// =============================================================================

#[test]
fn test_flow_mode_request_defaults_to_manual() {
    let request: FlowModeRequest = serde_json::from_str("{}").unwrap();
    assert!(!request.auto);

    let request: FlowModeRequest = serde_json::from_str(r#"{"auto":true}"#).unwrap();
    assert!(request.auto);

    let request: FlowModeRequest = serde_json::from_str(r#"{"auto":null}"#).unwrap();
    assert!(!request.auto);
}

#[test]
fn test_flow_mode_response_omits_status_on_read() {
    let read = serde_json::to_value(FlowModeResponse::current(true)).unwrap();
    let write = serde_json::to_value(FlowModeResponse::updated(false)).unwrap();

    assert_eq!(read, json!({ "auto": true }));
    assert_eq!(write, json!({ "status": "success", "auto": false }));
}

// =============================================================================
// MOVES
// =============================================================================

#[test]
fn test_move_request_fields_are_optional() {
    let request: MoveRequest = serde_json::from_str(r#"{"id":3}"#).unwrap();
    assert_eq!(request.id, Some(3));
    assert!(request.to_stage.is_none());
}

#[test]
fn test_move_request_rejects_string_id() {
    let result: Result<MoveRequest, _> = serde_json::from_str(r#"{"id":"three"}"#);
    assert!(result.is_err());
}

#[test]
fn test_flow_response_shapes() {
    let record = MoveRecord {
        id: PatientId(7),
        from: Stage::Imaging,
        to: Stage::Consultation,
        priority: Priority::High,
    };

    let success = serde_json::to_value(FlowResponse::success(vec![record], Vec::new())).unwrap();
    assert_eq!(
        success,
        json!({
            "status": "success",
            "moved": [{ "id": 7, "from": "Imaging", "to": "Consultation", "priority": "High" }],
            "alerts": []
        })
    );

    let idle = serde_json::to_value(FlowResponse::idle()).unwrap();
    assert_eq!(idle, json!({ "status": "idle", "moved": [] }));
}

#[test]
fn test_config_response_nests_config() {
    let body = serde_json::to_value(ConfigResponse::updated(AutoBalanceConfig::default())).unwrap();
    assert_eq!(
        body,
        json!({
            "status": "success",
            "config": { "crowd_threshold": 40, "max_moves_per_stage": 3 }
        })
    );
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

#[test]
fn test_flow_errors_map_to_status_codes() {
    let not_found = ApiError::from(FlowError::NotFound(PatientId(9)));
    assert_eq!(not_found.status, StatusCode::NOT_FOUND);
    assert!(not_found.message.contains('9'));

    for err in [
        FlowError::InvalidStage("Cafeteria".to_string()),
        FlowError::InvalidConfig("crowd_threshold".to_string()),
        FlowError::MissingArgument("id"),
    ] {
        assert_eq!(ApiError::from(err).status, StatusCode::BAD_REQUEST);
    }
}
