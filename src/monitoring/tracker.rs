//! Station status tracker
//!
//! Every tick fetches the online set from the feed, compares it with the
//! last-known status of each monitored station and notifies on transitions.
//! Failures are logged to the activity log and never stop the loop.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

use super::discord_notifier::{Delivery, NotifyError, Notifier};
use super::feed::FeedSource;
use crate::state::{AppState, Stations};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(7);
pub const DEBUG_PING: &str = "🧪 Debug mode test ping";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Online,
    Offline,
}

/// A station whose online flag changed since the previous tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub station: String,
    pub kind: TransitionKind,
}

impl Transition {
    pub fn notification(&self) -> String {
        match self.kind {
            TransitionKind::Online => format!("🟢 **{}** is now ONLINE", self.station),
            TransitionKind::Offline => format!("🔴 **{}** is now OFFLINE", self.station),
        }
    }

    pub fn log_line(&self) -> String {
        match self.kind {
            TransitionKind::Online => format!("{} logged ON", self.station),
            TransitionKind::Offline => format!("{} logged OFF", self.station),
        }
    }
}

/// Summary of one tick
#[derive(Debug, Default)]
pub struct TickReport {
    pub feed_ok: bool,
    pub transitions: Vec<Transition>,
    pub notifications_attempted: usize,
    pub notifications_sent: usize,
}

/// Compare the online set against the recorded statuses.
///
/// Records the fresh status of every monitored station and drops status
/// entries of stations that are no longer monitored. Returned transitions
/// are sorted by station.
pub fn diff_statuses(stations: &mut Stations, online: &HashSet<String>) -> Vec<Transition> {
    let Stations {
        monitored,
        statuses,
        ..
    } = stations;

    let mut transitions = Vec::new();
    for station in monitored.iter() {
        let is_online = online.contains(station);
        let was_online = statuses.get(station).copied().unwrap_or(false);

        let kind = match (was_online, is_online) {
            (false, true) => Some(TransitionKind::Online),
            (true, false) => Some(TransitionKind::Offline),
            _ => None,
        };
        if let Some(kind) = kind {
            transitions.push(Transition {
                station: station.clone(),
                kind,
            });
        }

        statuses.insert(station.clone(), is_online);
    }

    statuses.retain(|station, _| monitored.contains(station));
    transitions.sort_by(|a, b| a.station.cmp(&b.station));
    transitions
}

/// Poll-compare-notify loop
pub struct Tracker<F: FeedSource, N: Notifier> {
    state: AppState,
    feed: Arc<F>,
    notifier: Arc<N>,
    interval: Duration,
}

impl<F: FeedSource, N: Notifier> Tracker<F, N> {
    pub fn new(state: AppState, feed: Arc<F>, notifier: Arc<N>) -> Self {
        Self {
            state,
            feed,
            notifier,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one poll-compare-notify cycle
    #[instrument(skip(self), level = "debug")]
    pub async fn tick(&self) -> TickReport {
        self.state.log("monitor tick");
        let mut report = TickReport::default();

        match self.feed.fetch_online().await {
            Ok(snapshot) => {
                report.feed_ok = true;
                if let Some(warning) = &snapshot.warning {
                    warn!(warning = %warning, "Feed payload without controller list");
                    self.state.log(format!("WARNING: {}", warning));
                }

                // lock released before any notification goes out
                let transitions = {
                    let mut stations = self.state.stations.write().await;
                    diff_statuses(&mut stations, &snapshot.online)
                };

                for transition in &transitions {
                    info!(
                        station = %transition.station,
                        kind = ?transition.kind,
                        "Station status changed"
                    );
                    report.notifications_attempted += 1;
                    if self.notify(&transition.notification()).await {
                        report.notifications_sent += 1;
                    }
                    self.state.log(transition.log_line());
                }
                report.transitions = transitions;
            }
            Err(e) => {
                error!(error = %e, "Feed fetch failed");
                self.state.log(format!("ERROR in feed section: {}", e));
            }
        }

        let debug_mode = self.state.stations.read().await.debug_mode;
        if debug_mode {
            report.notifications_attempted += 1;
            if self.notify(DEBUG_PING).await {
                report.notifications_sent += 1;
            }
            self.state.log("Debug ping sent");
        }

        report
    }

    /// Send one message and record the outcome. Returns whether it was delivered.
    async fn notify(&self, message: &str) -> bool {
        match self.notifier.send(message).await {
            Ok(Delivery::Sent) => {
                self.state.log("Discord message sent");
                true
            }
            Ok(Delivery::Disabled) => {
                self.state.log("Discord disabled, skipped message");
                false
            }
            Err(NotifyError::Forbidden) => {
                self.state
                    .log("ERROR: Discord Forbidden (missing permissions)");
                false
            }
            Err(e) => {
                self.state.log(format!("ERROR sending Discord message: {}", e));
                false
            }
        }
    }

    /// Tick forever on a fixed interval
    pub async fn run_loop(&self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting station tracker loop"
        );
        self.state.log("monitor task started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = self.tick().await;
            debug!(
                feed_ok = report.feed_ok,
                transitions = report.transitions.len(),
                notifications_sent = report.notifications_sent,
                "Tick finished"
            );
        }
    }
}
