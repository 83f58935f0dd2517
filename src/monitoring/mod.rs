//! Station monitoring
//!
//! - Feed polling and callsign extraction
//! - Discord notifications
//! - The poll-compare-notify tracker loop
//! - The bounded activity log shown on the control page

pub mod activity_log;
pub mod discord_notifier;
pub mod feed;
pub mod tracker;

pub use activity_log::{ActivityLog, MAX_LOG_ENTRIES};
pub use discord_notifier::{Delivery, DiscordNotifier, Notifier, NotifyError};
pub use feed::{FeedError, FeedSnapshot, FeedSource, VatsimFeed};
pub use tracker::{diff_statuses, TickReport, Tracker, Transition, TransitionKind};
