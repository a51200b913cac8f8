use crate::chat::ChatClient;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API client for `sendMessage`
pub struct TelegramClient {
    client: Client,
    token: String,
    api_base: String,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            token: token.into(),
            api_base: API_BASE.to_string(),
        })
    }

    /// Point the client at another Bot API server (local bot-api, tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl ChatClient for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .context("Failed to reach Telegram")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Telegram response")?;

        if !status.is_success() {
            warn!("Telegram sendMessage returned {}", status);
            bail!("Telegram sendMessage failed with {}: {}", status, body);
        }

        debug!("Telegram sendMessage to chat {}: {}", chat_id, body);
        Ok(())
    }
}
