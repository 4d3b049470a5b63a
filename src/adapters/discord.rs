use crate::config::TomlConfig;
use crate::domain::model::Participant;
use crate::domain::ports::{DeliveryChannel, GroupAnnouncer};
use crate::utils::error::{DealerError, DeliveryError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// JSON error code Discord returns when a user does not accept DMs.
const CANNOT_MESSAGE_USER: u64 = 50007;

/// Sends DMs and channel messages through the Discord HTTP API.
#[derive(Debug, Clone)]
pub struct DiscordRest {
    client: Client,
    api_base: String,
    token: String,
    announce_channel_id: String,
}

#[derive(Debug, Deserialize)]
struct DmChannel {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<u64>,
    message: Option<String>,
}

impl DiscordRest {
    pub fn new(
        api_base: &str,
        token: &str,
        announce_channel_id: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            announce_channel_id: announce_channel_id.to_string(),
        })
    }

    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        Self::new(
            config.api_base(),
            config.token()?,
            config.announce_channel_id()?,
            Duration::from_secs(config.request_timeout_seconds()),
        )
    }

    async fn open_dm(&self, recipient_id: &str) -> std::result::Result<String, DeliveryError> {
        let url = format!("{}/users/@me/channels", self.api_base);
        tracing::debug!("Opening DM channel with {}", recipient_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(&json!({ "recipient_id": recipient_id }))
            .send()
            .await
            .map_err(transport_error)?;

        let channel: DmChannel = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;
        Ok(channel.id)
    }

    async fn post_message(
        &self,
        channel_id: &str,
        content: &str,
    ) -> std::result::Result<(), DeliveryError> {
        let url = format!("{}/channels/{}/messages", self.api_base, channel_id);
        tracing::debug!("Posting message to channel {}", channel_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).await?;
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> DeliveryError {
    if e.is_timeout() {
        DeliveryError::Transport(format!("request timed out: {}", e))
    } else {
        DeliveryError::Transport(e.to_string())
    }
}

async fn check_status(response: Response) -> std::result::Result<Response, DeliveryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if let Ok(ApiError {
        code: Some(CANNOT_MESSAGE_USER),
        message,
    }) = serde_json::from_str::<ApiError>(&body)
    {
        return Err(DeliveryError::Unreachable(
            message.unwrap_or_else(|| "Cannot send messages to this user".to_string()),
        ));
    }

    Err(DeliveryError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DeliveryChannel for DiscordRest {
    async fn send_private(
        &self,
        participant: &Participant,
        message: &str,
    ) -> std::result::Result<(), DeliveryError> {
        let address = participant.user_id.as_str();
        if address.is_empty() || !address.chars().all(|c| c.is_ascii_digit()) {
            return Err(DeliveryError::InvalidAddress {
                address: address.to_string(),
            });
        }

        let dm_channel = self.open_dm(address).await?;
        self.post_message(&dm_channel, message).await
    }
}

#[async_trait]
impl GroupAnnouncer for DiscordRest {
    async fn announce(&self, message: &str) -> Result<()> {
        self.post_message(&self.announce_channel_id, message)
            .await
            .map_err(|e| DealerError::AnnouncementError {
                message: e.to_string(),
            })
    }
}
