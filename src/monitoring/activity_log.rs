//! Bounded, timestamped activity log rendered on the control page.

use std::collections::VecDeque;

use chrono::Local;

/// Maximum number of retained entries; the oldest go first.
pub const MAX_LOG_ENTRIES: usize = 300;

#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<String>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_LOG_ENTRIES + 1),
        }
    }

    /// Stamp `message` with the local wall-clock time and append it.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        let entry = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        tracing::info!(target: "station_watch::activity", "{}", message);

        self.entries.push_back(entry);
        while self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
