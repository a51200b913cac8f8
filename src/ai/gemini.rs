use crate::ai::{PriceAdvisor, SYSTEM_INSTRUCTION};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

const API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Gemini `generateContent` over REST
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_base: API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        )
    }
}

fn build_request(prompt: &str) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
    })
}

/// First text part of the first candidate
fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .find_map(|part| part.text)
}

#[async_trait]
impl PriceAdvisor for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Sending {} byte prompt to {}", prompt.len(), self.model);

        let response = self
            .client
            .post(self.endpoint())
            .json(&build_request(prompt))
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned {}: {}", status, body);
            bail!("Gemini returned {}", status);
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to decode Gemini response")?;
        let text = extract_text(parsed).ok_or_else(|| anyhow!("Gemini returned no text candidate"))?;

        info!("Gemini replied with {} bytes", text.len());
        Ok(text)
    }
}
