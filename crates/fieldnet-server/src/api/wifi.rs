//! WiFi Endpoints
//!
//! - POST /api/wifi - queue a desired assignment
//! - GET /api/wifi/status - last observed status and reconciler progress

use super::AppState;
use crate::access_point::ReconcileProgress;
use crate::device::DeviceController;
use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use fieldnet_core::{AssignmentError, DesiredAssignment, ObservedStatus, SLOT_COUNT};
use serde::{Deserialize, Serialize};

/// Body for POST /api/wifi and POST /api/ethernet
///
/// One entry per slot in red1..blue3 order; `null` or `0` leaves a slot empty.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignmentRequest {
    pub teams: [Option<u32>; SLOT_COUNT],
}

impl TryFrom<AssignmentRequest> for DesiredAssignment {
    type Error = AssignmentError;

    fn try_from(request: AssignmentRequest) -> Result<Self, Self::Error> {
        DesiredAssignment::from_numbers(request.teams)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub(crate) fn new(error: impl ToString) -> Json<Self> {
        Json(Self {
            error: error.to_string(),
        })
    }
}

/// JSON error body with the given status.
pub(crate) fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (status, ErrorResponse::new(error)).into_response()
}

/// Response for GET /api/wifi/status
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiStatusResponse {
    pub access_point: String,
    pub status: ObservedStatus,
    pub progress: ReconcileProgress,
}

/// POST /api/wifi - Queue a WiFi assignment
///
/// Returns 202 once queued; the device is configured in the background.
#[tracing::instrument(skip(state))]
pub async fn configure_wifi<C: DeviceController>(
    State(state): State<AppState<C>>,
    Json(request): Json<AssignmentRequest>,
) -> impl IntoResponse {
    let desired = match DesiredAssignment::try_from(request) {
        Ok(desired) => desired,
        Err(e) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, e),
    };

    match state.access_point.configure_team_wifi(desired) {
        Ok(()) => (StatusCode::ACCEPTED, Json(desired)).into_response(),
        Err(e) => error_response(StatusCode::SERVICE_UNAVAILABLE, e),
    }
}

/// GET /api/wifi/status - Observed access point status
#[tracing::instrument(skip(state))]
pub async fn get_status<C: DeviceController>(
    State(state): State<AppState<C>>,
) -> Json<WifiStatusResponse> {
    Json(WifiStatusResponse {
        access_point: state.access_point.name().to_string(),
        status: state.access_point.status(),
        progress: state.access_point.progress(),
    })
}
