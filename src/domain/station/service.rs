use tracing::info;
use validator::Validate;

use super::dto::{ControlView, NewStation, StationAction};
use crate::state::{AppState, Stations};
use crate::utils::error::AppError;

pub struct StationService;

impl StationService {
    /// Apply a form action to the shared state
    pub async fn apply(state: &AppState, action: StationAction) -> Result<(), AppError> {
        match action {
            StationAction::Add(raw) => Self::add_station(state, &raw).await?,
            StationAction::Remove(station) => Self::remove_station(state, &station).await,
            StationAction::ToggleDebug => {
                Self::toggle_debug(state).await;
            }
            StationAction::Nothing => {}
        }
        Ok(())
    }

    /// Start monitoring a station. Blank input is silently ignored.
    ///
    /// The length limit applies to the normalized identifier.
    pub async fn add_station(state: &AppState, raw: &str) -> Result<(), AppError> {
        let Some(station) = Stations::normalize(raw) else {
            return Ok(());
        };
        let candidate = NewStation { station };
        candidate.validate()?;

        let added = state.stations.write().await.add(&candidate.station);
        if let Some(station) = added {
            info!(station = %station, "Station added");
            state.log(format!("Started monitoring {}", station));
        }
        Ok(())
    }

    /// Stop monitoring a station and forget its status
    pub async fn remove_station(state: &AppState, station: &str) {
        let station = station.trim();
        let removed = state.stations.write().await.remove(station);
        if removed {
            info!(station = %station, "Station removed");
            state.log(format!("Stopped monitoring {}", station));
        }
    }

    /// Flip debug mode and return the new value
    pub async fn toggle_debug(state: &AppState) -> bool {
        let enabled = state.stations.write().await.toggle_debug();
        state.log(format!(
            "Debug mode {}",
            if enabled { "ENABLED" } else { "DISABLED" }
        ));
        enabled
    }

    pub async fn snapshot(state: &AppState) -> ControlView {
        let (stations, statuses, debug_mode) = {
            let guard = state.stations.read().await;
            (
                guard.sorted(),
                guard
                    .statuses
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
                guard.debug_mode,
            )
        };

        ControlView {
            stations,
            statuses,
            debug_mode,
            logs: state.activity_snapshot(),
        }
    }
}
