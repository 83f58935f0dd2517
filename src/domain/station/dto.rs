use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Longest normalized identifier that can be monitored
pub const MAX_STATION_LEN: usize = 32;

/// Control page form submission.
///
/// Exactly one submit button name is present per request; the first one
/// found in the order add, remove, toggle wins.
#[derive(Debug, Default, Deserialize)]
pub struct StationForm {
    pub add_station: Option<String>,
    pub station: Option<String>,
    pub remove_station: Option<String>,
    pub toggle_debug: Option<String>,
}

/// Trimmed, uppercased identifier about to be monitored
#[derive(Debug, Validate)]
pub struct NewStation {
    #[validate(length(max = 32, message = "station identifier is too long"))]
    pub station: String,
}

/// What a form submission asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationAction {
    Add(String),
    Remove(String),
    ToggleDebug,
    Nothing,
}

impl StationForm {
    pub fn action(self) -> StationAction {
        if self.add_station.is_some() {
            StationAction::Add(self.station.unwrap_or_default())
        } else if let Some(station) = self.remove_station {
            StationAction::Remove(station)
        } else if self.toggle_debug.is_some() {
            StationAction::ToggleDebug
        } else {
            StationAction::Nothing
        }
    }
}

/// Read-only view of the control state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlView {
    /// Sorted monitored stations
    pub stations: Vec<String>,
    /// Last known online flag per station; stations not yet polled are absent
    pub statuses: BTreeMap<String, bool>,
    pub debug_mode: bool,
    pub logs: Vec<String>,
}
