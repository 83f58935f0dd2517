use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tokio::sync::RwLock;

use crate::monitoring::ActivityLog;

/// Monitored stations, their last-known status and the debug switch.
#[derive(Debug, Default)]
pub struct Stations {
    pub monitored: HashSet<String>,
    /// station -> online at the last tick
    pub statuses: HashMap<String, bool>,
    pub debug_mode: bool,
}

impl Stations {
    /// Trim and uppercase a raw identifier. `None` when nothing is left.
    pub fn normalize(raw: &str) -> Option<String> {
        let station = raw.trim().to_uppercase();
        if station.is_empty() {
            None
        } else {
            Some(station)
        }
    }

    /// Returns the normalized station, or `None` if the input was blank.
    pub fn add(&mut self, raw: &str) -> Option<String> {
        let station = Self::normalize(raw)?;
        self.monitored.insert(station.clone());
        Some(station)
    }

    /// Drops the station and its status entry. Returns whether it was monitored.
    pub fn remove(&mut self, station: &str) -> bool {
        self.statuses.remove(station);
        self.monitored.remove(station)
    }

    /// Flips the debug switch and returns the new value.
    pub fn toggle_debug(&mut self) -> bool {
        self.debug_mode = !self.debug_mode;
        self.debug_mode
    }

    pub fn sorted(&self) -> Vec<String> {
        let mut stations: Vec<String> = self.monitored.iter().cloned().collect();
        stations.sort();
        stations
    }
}

/// Shared application state, handed to both the router and the tracker task.
#[derive(Clone)]
pub struct AppState {
    pub stations: Arc<RwLock<Stations>>,
    pub activity: Arc<Mutex<ActivityLog>>,
    pub notifications_enabled: bool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(notifications_enabled: bool) -> Self {
        Self {
            stations: Arc::new(RwLock::new(Stations::default())),
            activity: Arc::new(Mutex::new(ActivityLog::new())),
            notifications_enabled,
            started_at: Instant::now(),
        }
    }

    /// Append a line to the activity log
    pub fn log(&self, message: impl Into<String>) {
        self.activity_guard().push(message);
    }

    /// Copy of the activity log, oldest first
    pub fn activity_snapshot(&self) -> Vec<String> {
        self.activity_guard().entries()
    }

    fn activity_guard(&self) -> MutexGuard<'_, ActivityLog> {
        self.activity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
