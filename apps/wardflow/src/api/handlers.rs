//! # API Endpoint Handlers
//!
//! Each handler takes the hospital lock once, runs one engine operation and
//! releases it before responding. Anything that draws randomness or changes
//! state takes the write lock; plain reads take the read lock.

use super::{
    AppState,
    types::{
        ApiError, ConfigResponse, FlowModeRequest, FlowModeResponse, FlowResponse, HealthResponse,
        MoveRequest, StatusResponse,
    },
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use wardflow_core::{
    Alert, AutoBalanceConfig, BalanceOutcome, ConfigUpdate, DistributionView, FlowError, Overview,
    Patient, PatientId, Resource, Stage, StaffMember, WaitTimes,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// HEALTH
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

// =============================================================================
// DASHBOARD READS
// =============================================================================

/// Headline metrics and the raw distribution.
pub async fn overview_handler(State(state): State<AppState>) -> Json<Overview> {
    let hospital = state.hospital.read().await;
    Json(hospital.overview())
}

/// Chart-ready distribution with display jitter.
pub async fn distribution_handler(State(state): State<AppState>) -> Json<DistributionView> {
    let mut hospital = state.hospital.write().await;
    Json(hospital.distribution_view())
}

/// Patient listing with display jitter on queued patients.
pub async fn patients_handler(State(state): State<AppState>) -> Json<Vec<Patient>> {
    let mut hospital = state.hospital.write().await;
    Json(hospital.patients_view())
}

pub async fn alerts_handler(State(state): State<AppState>) -> Json<Vec<Alert>> {
    let hospital = state.hospital.read().await;
    Json(hospital.alerts())
}

pub async fn wait_times_handler(State(state): State<AppState>) -> Json<WaitTimes> {
    let mut hospital = state.hospital.write().await;
    Json(hospital.wait_times_view())
}

/// Staff roster, also served as the doctors list.
pub async fn staff_handler(State(state): State<AppState>) -> Json<Vec<StaffMember>> {
    let hospital = state.hospital.read().await;
    Json(hospital.staff())
}

pub async fn resources_handler(State(state): State<AppState>) -> Json<Vec<Resource>> {
    let hospital = state.hospital.read().await;
    Json(hospital.resources())
}

// =============================================================================
// FLOW MODE
// =============================================================================

pub async fn get_flow_mode_handler(State(state): State<AppState>) -> Json<FlowModeResponse> {
    let hospital = state.hospital.read().await;
    Json(FlowModeResponse::current(hospital.is_auto()))
}

pub async fn set_flow_mode_handler(
    State(state): State<AppState>,
    payload: Result<Json<FlowModeRequest>, JsonRejection>,
) -> ApiResult<FlowModeResponse> {
    let Json(request) = payload?;

    let mut hospital = state.hospital.write().await;
    hospital.set_auto(request.auto);
    tracing::info!(auto = request.auto, "Flow mode updated");

    Ok(Json(FlowModeResponse::updated(request.auto)))
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// Automatic advance of every eligible patient.
pub async fn advance_handler(State(state): State<AppState>) -> Json<FlowResponse> {
    let mut hospital = state.hospital.write().await;
    let moved = hospital.advance();
    tracing::info!(moved = moved.len(), "Automatic advance");

    Json(FlowResponse::success(moved, hospital.alerts()))
}

/// Manual move of one patient to a named stage.
pub async fn move_patient_handler(
    State(state): State<AppState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<FlowResponse> {
    let Json(request) = payload?;
    let id = request.id.ok_or(FlowError::MissingArgument("id"))?;
    let label = request
        .to_stage
        .ok_or(FlowError::MissingArgument("to_stage"))?;
    let target: Stage = label.parse()?;

    let mut hospital = state.hospital.write().await;
    match hospital.move_patient(PatientId(id), target)? {
        Some(record) => {
            tracing::debug!(
                patient = %record.id,
                from = %record.from,
                to = %record.to,
                "Manual move"
            );
            Ok(Json(FlowResponse::success(vec![record], hospital.alerts())))
        }
        None => Ok(Json(FlowResponse::unchanged())),
    }
}

/// Auto-balance, gated on flow mode.
pub async fn check_balance_handler(State(state): State<AppState>) -> Json<FlowResponse> {
    let mut hospital = state.hospital.write().await;
    match hospital.check_balance() {
        BalanceOutcome::Idle => Json(FlowResponse::idle()),
        BalanceOutcome::Balanced(moved) => {
            if !moved.is_empty() {
                tracing::info!(moved = moved.len(), "Auto-balance");
            }
            Json(FlowResponse::success(moved, hospital.alerts()))
        }
    }
}

// =============================================================================
// AUTO-BALANCE CONFIG
// =============================================================================

pub async fn get_config_handler(State(state): State<AppState>) -> Json<AutoBalanceConfig> {
    let hospital = state.hospital.read().await;
    Json(hospital.config())
}

/// Partial config update; nothing changes if any present field is invalid.
pub async fn update_config_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConfigUpdate>, JsonRejection>,
) -> ApiResult<ConfigResponse> {
    let Json(update) = payload?;

    let mut hospital = state.hospital.write().await;
    let config = hospital.update_config(update)?;
    tracing::info!(
        crowd_threshold = config.crowd_threshold,
        max_moves_per_stage = config.max_moves_per_stage,
        "Auto-balance config updated"
    );

    Ok(Json(ConfigResponse::updated(config)))
}

// =============================================================================
// SIMULATION
// =============================================================================

pub async fn simulate_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let mut hospital = state.hospital.write().await;
    let report = hospital.simulate_tick();
    tracing::info!(arrivals = report.arrivals.len(), "Simulation tick");

    Json(StatusResponse::success(
        "Hospital activity simulation completed",
    ))
}

pub async fn reset_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let mut hospital = state.hospital.write().await;
    hospital.reset();
    tracing::info!("Hospital state reset");

    Json(StatusResponse::success("Data reset to initial state"))
}
