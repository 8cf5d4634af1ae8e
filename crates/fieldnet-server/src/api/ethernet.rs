//! Ethernet Endpoint
//!
//! POST /api/ethernet - configure wired team networks synchronously

use super::wifi::{error_response, AssignmentRequest};
use super::AppState;
use crate::device::DeviceController;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use fieldnet_core::DesiredAssignment;

/// POST /api/ethernet - Configure the switch's team networks
///
/// Unlike WiFi this waits for the device; device errors come back as 502.
#[tracing::instrument(skip(state))]
pub async fn configure_ethernet<C: DeviceController>(
    State(state): State<AppState<C>>,
    Json(request): Json<AssignmentRequest>,
) -> impl IntoResponse {
    let desired = match DesiredAssignment::try_from(request) {
        Ok(desired) => desired,
        Err(e) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, e),
    };

    match state.switch.configure_team_ethernet(&desired).await {
        Ok(()) => (StatusCode::OK, Json(desired)).into_response(),
        Err(e) => error_response(StatusCode::BAD_GATEWAY, e),
    }
}
