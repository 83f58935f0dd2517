use std::env;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://data.vatsim.net/v3/vatsim-data.json";
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 7;
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Logging settings, read before anything else so later failures are recorded
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub dir: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dir = lookup("LOG_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());
        Self { dir }
    }
}

/// Discord bot settings. Present only when a bot token is configured.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub guild_id: u64,
    pub channel_id: u64,
    pub role_id: u64,
    pub api_base: String,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub poll_interval: Duration,
    pub feed_url: String,
    /// `None` disables notifications entirely
    pub discord: Option<DiscordConfig>,
}

impl AppConfig {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };

        let poll_secs: u64 = match lookup("POLL_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidInterval)?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };
        if poll_secs == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        let feed_url = lookup("FEED_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

        let discord = match lookup("DISCORD_TOKEN").filter(|t| !t.trim().is_empty()) {
            Some(token) => Some(DiscordConfig {
                token: token.trim().to_string(),
                guild_id: required_id(&lookup, "GUILD_ID")?,
                channel_id: required_id(&lookup, "CHANNEL_ID")?,
                role_id: required_id(&lookup, "ROLE_ID")?,
                api_base: lookup("DISCORD_API_BASE")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string()),
            }),
            None => {
                tracing::warn!("DISCORD_TOKEN is not set, Discord notifications are disabled");
                None
            }
        };

        Ok(Self {
            server_port,
            poll_interval: Duration::from_secs(poll_secs),
            feed_url,
            discord,
        })
    }
}

fn required_id<F>(lookup: &F, key: &'static str) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::MissingVar(key))?;
    raw.trim().parse().map_err(|_| ConfigError::InvalidId(key))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("POLL_INTERVAL_SECS must be a positive integer")]
    InvalidInterval,
    #[error("{0} environment variable is required when DISCORD_TOKEN is set")]
    MissingVar(&'static str),
    #[error("{0} must be a numeric Discord id")]
    InvalidId(&'static str),
}
