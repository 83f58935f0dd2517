//! Network data feed client
//!
//! Fetches the public VATSIM data document and extracts the callsigns of
//! every controller currently online.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

/// Request timeout for a single feed fetch
const FEED_TIMEOUT: Duration = Duration::from_secs(10);

pub const CONTROLLERS_WARNING: &str = "feed 'controllers' key is missing or invalid";

/// Online callsigns extracted from one feed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub online: HashSet<String>,
    /// Set when the document had no usable controller list
    pub warning: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Request(String),
    #[error("feed returned HTTP {0}")]
    Status(u16),
    #[error("feed payload is malformed: {0}")]
    Malformed(String),
}

/// Source of the currently-online station set
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_online(&self) -> Result<FeedSnapshot, FeedError>;
}

/// HTTP client for the VATSIM v3 data feed
#[derive(Debug, Clone)]
pub struct VatsimFeed {
    url: String,
    client: Client,
}

impl VatsimFeed {
    pub fn new(url: impl Into<String>) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(FEED_TIMEOUT)
            .build()
            .map_err(|e| FeedError::Request(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for VatsimFeed {
    #[instrument(skip(self), fields(url = %self.url), level = "debug")]
    async fn fetch_online(&self) -> Result<FeedSnapshot, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        let snapshot = parse_online_callsigns(&body)?;
        debug!(online = snapshot.online.len(), "Feed fetched");
        Ok(snapshot)
    }
}

/// Extract online callsigns from a feed document.
///
/// A missing or non-array `controllers` field yields an empty set plus a
/// warning. Entries without a string `callsign` are skipped.
pub fn parse_online_callsigns(document: &Value) -> Result<FeedSnapshot, FeedError> {
    let root = document
        .as_object()
        .ok_or_else(|| FeedError::Malformed("document root is not an object".to_string()))?;

    let snapshot = match root.get("controllers").and_then(Value::as_array) {
        Some(controllers) => FeedSnapshot {
            online: controllers
                .iter()
                .filter_map(|c| c.get("callsign").and_then(Value::as_str))
                .map(str::to_string)
                .collect(),
            warning: None,
        },
        None => FeedSnapshot {
            online: HashSet::new(),
            warning: Some(CONTROLLERS_WARNING.to_string()),
        },
    };

    Ok(snapshot)
}
