use axum::{extract::State, Json};

use super::dto::{HealthChecks, HealthState, HealthStatus};
use crate::state::AppState;

/// Health check
///
/// Reports version, uptime and whether Discord notifications are active.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let monitored_stations = state.stations.read().await.monitored.len();

    let status = if state.notifications_enabled {
        HealthState::Healthy
    } else {
        HealthState::Degraded
    };

    Json(HealthStatus {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
        checks: HealthChecks {
            notifications_enabled: state.notifications_enabled,
            monitored_stations,
        },
    })
}
