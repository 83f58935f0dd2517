//! Discord notifier for station status changes
//!
//! Posts role-mentioning messages to a guild channel through the Discord
//! REST API using a bot token. With no token configured every send is a
//! no-op that reports [`Delivery::Disabled`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::DiscordConfig;

/// Upper bound for a single Discord API call, body included
pub const DISCORD_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a send that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Disabled,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Discord Forbidden (missing permissions)")]
    Forbidden,
    #[error("channel {channel_id} does not belong to guild {guild_id}")]
    WrongGuild { channel_id: u64, guild_id: u64 },
    #[error("Discord API error: {status} - {body}")]
    Http { status: u16, body: String },
    #[error("Discord request failed: {0}")]
    Transport(String),
}

/// Outbound notification channel
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<Delivery, NotifyError>;

    fn is_enabled(&self) -> bool;
}

/// Create-message payload
#[derive(Debug, Serialize)]
pub struct DiscordMessage {
    pub content: String,
    pub allowed_mentions: AllowedMentions,
}

/// Restricts pings to the configured role
#[derive(Debug, Serialize)]
pub struct AllowedMentions {
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelInfo {
    #[serde(default)]
    guild_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentUser {
    username: String,
}

/// Discord bot notifier
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    config: Option<DiscordConfig>,
    client: Client,
}

impl DiscordNotifier {
    pub fn new(config: DiscordConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            config: Some(config),
            client: build_client(DISCORD_TIMEOUT)?,
        })
    }

    /// Notifier that never talks to Discord
    pub fn disabled() -> Self {
        Self {
            config: None,
            client: Client::new(),
        }
    }

    pub fn from_config(config: Option<DiscordConfig>) -> Result<Self, NotifyError> {
        match config {
            Some(c) => Self::new(c),
            None => Ok(Self::disabled()),
        }
    }

    /// Replace the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, NotifyError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Verify the bot token and return the bot's username.
    ///
    /// `Ok(None)` when notifications are disabled.
    pub async fn connect(&self) -> Result<Option<String>, NotifyError> {
        let Some(config) = &self.config else {
            return Ok(None);
        };

        let url = format!("{}/users/@me", config.api_base);
        let response = self.authorized_get(config, &url).await?;
        let response = check_status(response).await?;
        let user: CurrentUser = response
            .json()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        info!(username = %user.username, "Discord bot authenticated");
        Ok(Some(user.username))
    }

    /// Make sure the configured channel lives in the configured guild
    async fn verify_channel(&self, config: &DiscordConfig) -> Result<(), NotifyError> {
        let url = format!("{}/channels/{}", config.api_base, config.channel_id);
        let response = self.authorized_get(config, &url).await?;
        let response = check_status(response).await?;
        let channel: ChannelInfo = response
            .json()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if channel.guild_id.as_deref() != Some(config.guild_id.to_string().as_str()) {
            return Err(NotifyError::WrongGuild {
                channel_id: config.channel_id,
                guild_id: config.guild_id,
            });
        }
        Ok(())
    }

    async fn authorized_get(
        &self,
        config: &DiscordConfig,
        url: &str,
    ) -> Result<Response, NotifyError> {
        self.client
            .get(url)
            .header(AUTHORIZATION, bot_auth(&config.token))
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    #[instrument(skip(self, message), level = "debug")]
    async fn send(&self, message: &str) -> Result<Delivery, NotifyError> {
        let Some(config) = &self.config else {
            debug!("Discord notifications disabled, skipping");
            return Ok(Delivery::Disabled);
        };

        self.verify_channel(config).await?;

        let payload = build_message(config.role_id, message);
        let url = format!(
            "{}/channels/{}/messages",
            config.api_base, config.channel_id
        );

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, bot_auth(&config.token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Discord");
                NotifyError::Transport(e.to_string())
            })?;

        check_status(response).await?;
        Ok(Delivery::Sent)
    }

    fn is_enabled(&self) -> bool {
        self.config.is_some()
    }
}

fn build_client(timeout: Duration) -> Result<Client, NotifyError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| NotifyError::Transport(e.to_string()))
}

fn bot_auth(token: &str) -> String {
    format!("Bot {}", token)
}

/// Message mentioning the role, with pings limited to that role
pub fn build_message(role_id: u64, message: &str) -> DiscordMessage {
    DiscordMessage {
        content: format!("<@&{}> {}", role_id, message),
        allowed_mentions: AllowedMentions {
            roles: vec![role_id.to_string()],
        },
    }
}

async fn check_status(response: Response) -> Result<Response, NotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_failure(status, body))
}

/// Error for a failed Discord response; 403 maps to `Forbidden`
pub fn classify_failure(status: StatusCode, body: String) -> NotifyError {
    if status == StatusCode::FORBIDDEN {
        error!(status = %status, "Discord refused the request");
        NotifyError::Forbidden
    } else {
        error!(status = %status, body = %body, "Discord API returned error");
        NotifyError::Http {
            status: status.as_u16(),
            body,
        }
    }
}
